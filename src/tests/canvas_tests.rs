//! 画布与预览绘制单元测试

use super::{node_at, render};
use crate::canvas::Canvas;
use crate::renderer::painter;
use crate::{blend_rgba8, Color, Rect};
use serde_json::json;

#[test]
fn test_fill_rect() {
    let mut canvas = Canvas::new(10, 10);
    canvas.clear(Color::WHITE);
    canvas.fill_rect(&Rect::new(2.0, 2.0, 4.0, 4.0), Color::BLACK);

    assert_eq!(canvas.get_pixel(3, 3), Color::BLACK);
    assert_eq!(canvas.get_pixel(7, 7), Color::WHITE);
    assert_eq!(canvas.get_pixel(20, 20), Color::TRANSPARENT);
}

/// 半透明红色叠加在白色上
#[test]
fn test_blend() {
    assert_eq!(blend_rgba8([255, 0, 0, 128], [255, 255, 255, 255]), [255, 127, 127, 255]);
    assert_eq!(blend_rgba8([0, 0, 0, 0], [1, 2, 3, 4]), [1, 2, 3, 4]);
}

/// 裁剪区域之外不绘制
#[test]
fn test_clip() {
    let mut canvas = Canvas::new(10, 10);
    canvas.push_clip(Rect::new(0.0, 0.0, 5.0, 10.0));
    canvas.fill_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
    canvas.pop_clip();

    assert_eq!(canvas.get_pixel(2, 5), Color::BLACK);
    assert_eq!(canvas.get_pixel(7, 5), Color::TRANSPARENT);
}

/// 圆角之外的角落像素保持透明
#[test]
fn test_rounded_corner() {
    let mut canvas = Canvas::new(20, 20);
    canvas.fill_rounded_rect(&Rect::new(0.0, 0.0, 20.0, 20.0), 8.0, Color::BLACK);

    assert_eq!(canvas.get_pixel(0, 0), Color::TRANSPARENT);
    assert_eq!(canvas.get_pixel(10, 10), Color::BLACK);
}

/// 按钮背景画在布局给出的位置上
#[test]
fn test_paint_button_background() {
    let card = render(
        json!({
            "type": "view",
            "style": { "padding": 10, "backgroundColor": "#FFFFFF" },
            "children": [{ "type": "button", "label": "Buy", "interactionId": "buy" }]
        }),
        200.0,
    );
    let (_, button) = node_at(&card, &[0]);

    let mut canvas = Canvas::new(200, card.layout.frame.bottom().ceil() as u32);
    painter::paint(&card, &mut canvas, None);

    let x = (button.frame.x + 2.0) as u32;
    let y = (button.frame.y + button.frame.height / 2.0) as u32;
    assert_eq!(canvas.get_pixel(x, y).to_rgba8(), Color::SYSTEM_BLUE.to_rgba8());
    // 父容器背景
    assert_eq!(canvas.get_pixel(2, 2).to_rgba8(), [255, 255, 255, 255]);
}

/// 预览绘制与布局按同样的宽度折行
#[test]
fn test_paint_wrapped_text() {
    let card = render(
        json!({
            "type": "view",
            "style": { "width": 100 },
            "children": [
                { "type": "text", "content": "The quick brown fox jumps over the lazy dog!" }
            ]
        }),
        375.0,
    );

    let mut canvas = Canvas::new(100, card.layout.frame.bottom().ceil() as u32);
    painter::paint(&card, &mut canvas, None);

    // 第二行第一个字符 'r' 的方块
    assert_eq!(canvas.get_pixel(3, 26).to_rgba8(), [0, 0, 0, 255]);
    // 第四行第二个字符是空格
    assert_eq!(canvas.get_pixel(11, 62).to_rgba8(), [0, 0, 0, 0]);
}
