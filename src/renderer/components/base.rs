//! 组件基础定义

use crate::config::RenderConfig;
use crate::loader::ImageSource;
use crate::renderer::drawable::{AxisSize, BoxStyle, Intrinsic};
use crate::renderer::style_resolver::ResolvedStyle;
use crate::text::TextMeasurer;

/// 组件上下文
pub struct ComponentContext<'a> {
    pub config: &'a RenderConfig,
    pub measurer: &'a dyn TextMeasurer,
    pub images: &'a dyn ImageSource,
}

/// 解释器为节点确定的宽高规则
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizing {
    pub width: AxisSize,
    pub height: AxisSize,
}

impl Sizing {
    pub const NATURAL: Sizing = Sizing { width: AxisSize::Natural, height: AxisSize::Natural };
}

/// 由解析样式构建盒属性
pub fn build_box_style(style: &ResolvedStyle, sizing: Sizing, intrinsic: Intrinsic) -> BoxStyle {
    BoxStyle {
        background: style.background_color,
        border: style.border,
        margin: style.margin,
        padding: style.padding,
        width: sizing.width,
        height: sizing.height,
        aspect_ratio: style.aspect_ratio,
        intrinsic,
    }
}
