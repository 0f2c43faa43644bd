//! view 组件 - 容器

use super::base::*;
use crate::renderer::drawable::{ContainerDrawable, Drawable, Intrinsic};
use crate::renderer::style_resolver::ResolvedStyle;

pub struct ViewComponent;

impl ViewComponent {
    pub fn build(style: &ResolvedStyle, sizing: Sizing, children: Vec<Drawable>) -> Drawable {
        Drawable::Container(ContainerDrawable {
            direction: style.flex_direction,
            justify_content: style.justify_content,
            align_items: style.align_items,
            children,
            box_style: build_box_style(style, sizing, Intrinsic::AUTO),
        })
    }
}
