//! 卡片组件 - 按节点类型生成绘制节点
//! view / text / image / button 以及不支持类型的占位

mod base;
mod view;
mod text;
mod button;
mod image;
mod placeholder;

pub use base::*;
pub use view::ViewComponent;
pub use text::TextComponent;
pub use button::ButtonComponent;
pub use image::{place_image, ImageComponent};
pub use placeholder::{PlaceholderComponent, PLACEHOLDER_FONT_SIZE};
