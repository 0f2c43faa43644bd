//! 卡片渲染器 - 将节点树解释为绘制描述树

mod style_resolver;
pub mod drawable;
pub mod interpreter;
pub mod components;
pub mod painter;

pub use style_resolver::{
    parse_aspect_ratio, parse_percentage, Alignment, Axis, Border, ContentScale, FlexDirection,
    FontWeight, LengthSpec, ResolvedStyle, StyleResolver,
};
pub use drawable::{
    AxisSize, BoxStyle, ButtonDrawable, ContainerDrawable, Drawable, ImageDrawable, ImagePhase,
    Intrinsic, PlaceholderDrawable, TapAction, TextDrawable,
};
pub use interpreter::{LayoutContext, LayoutInterpreter};
