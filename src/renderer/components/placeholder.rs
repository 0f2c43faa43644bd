//! 不支持的节点类型 - 渲染一个带类型名的可见提示，便于集成方发现数据问题

use super::base::*;
use crate::renderer::drawable::{Drawable, Intrinsic, PlaceholderDrawable};
use crate::renderer::style_resolver::{FontWeight, ResolvedStyle};
use log::debug;

pub const PLACEHOLDER_FONT_SIZE: f32 = 12.0;

pub struct PlaceholderComponent;

impl PlaceholderComponent {
    pub fn build(type_name: &str, style: &ResolvedStyle, sizing: Sizing, ctx: &ComponentContext) -> Drawable {
        debug!("rendering placeholder for unsupported node type {:?}", type_name);

        let message = if type_name.is_empty() {
            "Unsupported component (missing type)".to_string()
        } else {
            format!("Unsupported component: {}", type_name)
        };
        let measured = ctx.measurer.measure(&message, PLACEHOLDER_FONT_SIZE, FontWeight::Regular);

        Drawable::Placeholder(PlaceholderDrawable {
            type_name: type_name.to_string(),
            message,
            box_style: build_box_style(style, sizing, Intrinsic::of(measured)),
        })
    }
}
