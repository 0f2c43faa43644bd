//! text 组件 - 文本

use super::base::*;
use crate::parser::Node;
use crate::renderer::drawable::{Drawable, Intrinsic, TextDrawable};
use crate::renderer::style_resolver::ResolvedStyle;

pub struct TextComponent;

impl TextComponent {
    pub fn build(node: &Node, style: &ResolvedStyle, sizing: Sizing, ctx: &ComponentContext) -> Drawable {
        let content = node.content.clone().unwrap_or_default();
        let measured = ctx.measurer.measure(&content, style.font_size, style.font_weight);

        Drawable::Text(TextDrawable {
            content,
            font_size: style.font_size,
            font_weight: style.font_weight,
            color: style.text_color,
            line_limit: None,
            box_style: build_box_style(style, sizing, Intrinsic::of(measured)),
        })
    }
}
