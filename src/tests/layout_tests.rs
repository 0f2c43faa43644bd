//! 布局单元测试
//! 百分比、权重、fill、宽高比、叠放等尺寸规则在 Taffy 上的结果

use super::{approx, node_at, render, render_with};
use crate::config::{FillPrecedence, RenderConfig};
use crate::layout::count_nodes;
use crate::loader::StaticImageSource;
use crate::renderer::AxisSize;
use serde_json::json;

/// 测试百分比宽度按父容器同轴尺寸计算
#[test]
fn test_percent_width() {
    let card = render(
        json!({
            "type": "view",
            "style": { "width": 200, "flexDirection": "row" },
            "children": [
                { "type": "view", "style": { "width": "50%", "height": 10 } },
                { "type": "view", "style": { "width": "0%", "height": 10 } }
            ]
        }),
        375.0,
    );

    let (_, half) = node_at(&card, &[0]);
    let (_, zero) = node_at(&card, &[1]);
    assert!(approx(card.layout.frame.width, 200.0));
    assert!(approx(half.frame.width, 100.0));
    assert!(approx(zero.frame.width, 0.0));
}

/// 数字前缀非法的百分比按自然尺寸处理
#[test]
fn test_invalid_percent_is_natural() {
    let card = render(
        json!({
            "type": "view",
            "style": { "flexDirection": "row" },
            "children": [
                { "type": "text", "content": "abcde", "style": { "fontSize": 10, "width": "abc%" } }
            ]
        }),
        375.0,
    );

    let (drawable, layout) = node_at(&card, &[0]);
    assert_eq!(drawable.box_style().width, AxisSize::Natural);
    // 5 个字符 * 10 * 0.6
    assert!(approx(layout.frame.width, 30.0));
    // 一行：10 + 4
    assert!(approx(layout.frame.height, 14.0));
}

/// 测试权重按比例分配主轴空间
#[test]
fn test_weights_split_row() {
    let card = render(
        json!({
            "type": "view",
            "style": { "width": 400, "flexDirection": "row" },
            "children": [
                { "type": "view", "style": { "weight": 1, "height": 20 } },
                { "type": "view", "style": { "weight": 1, "height": 20 } },
                { "type": "view", "style": { "flex": 2, "height": 20 } }
            ]
        }),
        375.0,
    );

    let widths: Vec<f32> = card.layout.children.iter().map(|c| c.frame.width).collect();
    assert!(approx(widths[0], 100.0));
    assert!(approx(widths[1], 100.0));
    assert!(approx(widths[2], 200.0));
    assert!(approx(card.layout.children[2].frame.x, 200.0));
}

/// 权重优先于 fill
#[test]
fn test_weight_beats_fill() {
    let card = render(
        json!({
            "type": "view",
            "style": { "width": 300, "flexDirection": "row" },
            "children": [
                { "type": "view", "style": { "weight": 1, "fillWidth": true, "height": 10 } },
                { "type": "view", "style": { "weight": 2, "height": 10 } }
            ]
        }),
        375.0,
    );

    assert!(approx(card.layout.children[0].frame.width, 100.0));
    assert!(approx(card.layout.children[1].frame.width, 200.0));
}

/// 宽高比配合 fillWidth 推导高度
#[test]
fn test_aspect_ratio_fill_width() {
    let card = render(
        json!({
            "type": "view",
            "style": { "width": 300 },
            "children": [
                {
                    "type": "image",
                    "url": "https://cdn.example.com/banner.png",
                    "style": { "aspectRatio": "300/100", "fillWidth": true }
                }
            ]
        }),
        375.0,
    );

    let (_, image) = node_at(&card, &[0]);
    assert!(approx(image.frame.width, 300.0));
    assert!(approx(image.frame.height, 100.0));
}

/// 交叉轴 fill 在有外边距时拉伸而不是溢出
#[test]
fn test_cross_axis_fill_with_margin() {
    let card = render(
        json!({
            "type": "view",
            "style": { "width": 300 },
            "children": [
                { "type": "view", "style": { "fillWidth": true, "marginHorizontal": 10, "height": 20 } }
            ]
        }),
        375.0,
    );

    let (_, child) = node_at(&card, &[0]);
    assert!(approx(child.frame.x, 10.0));
    assert!(approx(child.frame.width, 280.0));
}

/// 主轴 fill 给固定尺寸的兄弟让出空间
#[test]
fn test_main_axis_fill_shares_space() {
    let card = render(
        json!({
            "type": "view",
            "style": { "width": 300, "flexDirection": "row" },
            "children": [
                { "type": "view", "style": { "width": 100, "height": 10 } },
                { "type": "view", "style": { "width": -1, "height": 10 } }
            ]
        }),
        375.0,
    );

    assert!(approx(card.layout.children[0].frame.width, 100.0));
    assert!(approx(card.layout.children[1].frame.width, 200.0));
}

/// fillWidth 与显式宽度同时存在时由配置决定
#[test]
fn test_fill_precedence_policy() {
    let payload = json!({
        "type": "view",
        "style": { "width": 300 },
        "children": [
            { "type": "view", "style": { "width": 50, "fillWidth": true, "height": 10 } }
        ]
    });

    let fill = render(payload.clone(), 375.0);
    assert!(approx(fill.layout.children[0].frame.width, 300.0));

    let config = RenderConfig::default().with_fill_precedence(FillPrecedence::Explicit);
    let explicit = render_with(payload, 375.0, config, StaticImageSource::new());
    assert!(approx(explicit.layout.children[0].frame.width, 50.0));
}

/// 测试列布局依次排列并累加外边距与内边距
#[test]
fn test_column_stacking() {
    let card = render(
        json!({
            "type": "view",
            "style": { "padding": 10, "width": 200 },
            "children": [
                { "type": "view", "style": { "height": 30, "width": 50, "marginBottom": 5 } },
                { "type": "view", "style": { "height": 20, "width": 50 } }
            ]
        }),
        375.0,
    );

    let first = &card.layout.children[0];
    let second = &card.layout.children[1];
    assert!(approx(first.frame.x, 10.0));
    assert!(approx(first.frame.y, 10.0));
    assert!(approx(second.frame.y, 45.0));
    assert!(approx(card.layout.frame.height, 75.0));
    assert!(approx(card.layout.content.width, 180.0));
}

/// 叠放容器中子元素从同一原点开始
#[test]
fn test_overlay_stacks_children() {
    let card = render(
        json!({
            "type": "view",
            "style": { "flexDirection": "overlay", "width": 100, "height": 100, "marginTop": 7 },
            "children": [
                { "type": "view", "style": { "width": 50, "height": 50, "weight": 3 } },
                { "type": "view", "style": { "width": 20, "height": 20 } }
            ]
        }),
        375.0,
    );

    let back = &card.layout.children[0];
    let front = &card.layout.children[1];
    assert!(approx(card.layout.frame.y, 7.0));
    assert!(approx(back.frame.x, front.frame.x));
    assert!(approx(back.frame.y, front.frame.y));
    assert!(approx(back.frame.y, 7.0));
    // 叠放中权重不生效
    assert!(approx(back.frame.width, 50.0));
}

/// 居中对齐
#[test]
fn test_justify_center() {
    let card = render(
        json!({
            "type": "view",
            "style": { "width": 200, "flexDirection": "row", "justifyContent": "center" },
            "children": [
                { "type": "view", "style": { "width": 50, "height": 10 } }
            ]
        }),
        375.0,
    );

    assert!(approx(card.layout.children[0].frame.x, 75.0));
}

#[test]
fn test_count_nodes() {
    let card = render(
        json!({
            "type": "view",
            "children": [
                { "type": "text", "content": "a" },
                { "type": "view", "children": [{ "type": "text", "content": "b" }] }
            ]
        }),
        375.0,
    );
    assert_eq!(count_nodes(&card.layout), 4);
}

/// 列容器高度不限时，带权重的子元素保留自然内容高度
#[test]
fn test_weight_in_column_keeps_content() {
    let card = render(
        json!({
            "type": "view",
            "style": { "width": 300 },
            "children": [
                { "type": "text", "content": "hello", "style": { "weight": 1 } },
                { "type": "text", "content": "world" },
                { "type": "button", "label": "Go", "style": { "weight": 1 } }
            ]
        }),
        375.0,
    );

    let (drawable, weighted) = node_at(&card, &[0]);
    assert_eq!(drawable.box_style().height, AxisSize::Weighted(1.0));
    assert!(approx(weighted.frame.height, 18.0));
    assert!(approx(card.layout.children[1].frame.y, 18.0));
    // 按钮：一行 18 加上下内边距 16
    assert!(approx(card.layout.children[2].frame.height, 34.0));
    assert!(approx(card.layout.frame.height, 78.0));
}

/// 文本按容器宽度折行，高度随行数增加
#[test]
fn test_text_wraps_in_column() {
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

    let (_, text) = node_at(&card, &[0]);
    assert!(approx(card.layout.frame.width, 100.0));
    assert!(text.frame.width <= 100.0);
    // 每行 11 个字符，共 4 行
    assert!(approx(text.frame.height, 72.0));
    assert!(approx(card.layout.frame.height, 72.0));
}

/// 行容器中文本收缩到剩余宽度后折行
#[test]
fn test_text_wraps_in_row() {
    let card = render(
        json!({
            "type": "view",
            "style": { "width": 200, "flexDirection": "row" },
            "children": [
                { "type": "view", "style": { "width": 100, "height": 10 } },
                { "type": "text", "content": "The quick brown fox jumps over the lazy dog!" }
            ]
        }),
        375.0,
    );

    let (_, text) = node_at(&card, &[1]);
    assert!(approx(text.frame.x, 100.0));
    assert!(approx(text.frame.width, 100.0));
    assert!(approx(text.frame.height, 72.0));
}

/// 按钮标签不折行
#[test]
fn test_button_label_does_not_wrap() {
    let card = render(
        json!({
            "type": "view",
            "style": { "width": 100 },
            "children": [
                { "type": "button", "label": "A very long call to action label", "interactionId": "cta" }
            ]
        }),
        375.0,
    );

    let (_, button) = node_at(&card, &[0]);
    assert!(approx(button.frame.height, 34.0));
}
