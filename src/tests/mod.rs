//! 单元测试模块
//! 覆盖样式解析、节点树、布局、组件、交互、消息桥接、图片加载与预览绘制

pub mod style_tests;
pub mod layout_tests;
pub mod event_tests;
pub mod canvas_tests;

use crate::config::RenderConfig;
use crate::layout::{Available, LayoutNode};
use crate::loader::StaticImageSource;
use crate::renderer::Drawable;
use crate::runtime::{CardSession, RenderedCard};
use crate::template::Template;
use serde_json::Value;
use std::sync::Arc;

/// 用默认配置渲染一个负载，图片一律处于加载中
pub fn render(payload: Value, width: f32) -> RenderedCard {
    render_with(payload, width, RenderConfig::default(), StaticImageSource::new())
}

pub fn render_with(payload: Value, width: f32, config: RenderConfig, images: StaticImageSource) -> RenderedCard {
    let template = Template::from_value(&payload).unwrap();
    let mut session = CardSession::new(template, config).with_image_source(Arc::new(images));
    session.render(Available::with_width(width)).unwrap().clone()
}

/// 按子节点下标路径取布局与绘制节点
pub fn node_at<'a>(card: &'a RenderedCard, path: &[usize]) -> (&'a Drawable, &'a LayoutNode) {
    let mut drawable = &card.tree;
    let mut layout = &card.layout;
    for &i in path {
        drawable = &drawable.children()[i];
        layout = &layout.children[i];
    }
    (drawable, layout)
}

pub fn approx(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < 0.5
}
