//! button 组件 - 按钮
//!
//! 默认样式：白色文字、蓝色背景、圆角 4、底部外边距 8。
//! 标签始终单行显示，多余的行折叠为省略号。

use super::base::*;
use crate::geometry::Edges;
use crate::parser::Node;
use crate::renderer::drawable::{
    AxisSize, BoxStyle, ButtonDrawable, Drawable, Intrinsic, TapAction, TextDrawable,
};
use crate::renderer::style_resolver::{Border, ResolvedStyle};
use log::debug;
use url::Url;

pub struct ButtonComponent;

impl ButtonComponent {
    pub fn build(node: &Node, style: &ResolvedStyle, sizing: Sizing, ctx: &ComponentContext) -> Drawable {
        let defaults = &ctx.config.button;
        let mut style = style.clone();

        if style.background_color.is_none() {
            style.background_color = Some(defaults.background);
        }
        if !style.has_border_radius {
            style.border.radius = defaults.border_radius;
        }
        if !style.has_margin_bottom {
            style.margin.bottom = defaults.bottom_margin;
        }
        if !style.has_padding {
            style.padding = Edges::symmetric(defaults.padding_vertical, defaults.padding_horizontal);
        }

        let mut label = TextDrawable {
            content: node.label.clone().unwrap_or_default(),
            font_size: style.font_size,
            font_weight: style.font_weight,
            color: Some(style.text_color.unwrap_or(defaults.text_color)),
            line_limit: Some(1),
            box_style: BoxStyle {
                background: None,
                border: Border::default(),
                margin: Edges::ZERO,
                padding: Edges::ZERO,
                width: AxisSize::Natural,
                height: AxisSize::Natural,
                aspect_ratio: None,
                intrinsic: Intrinsic::AUTO,
            },
        };
        let line = label.display_lines().concat();
        let measured = ctx.measurer.measure(&line, label.font_size, label.font_weight);
        label.box_style.intrinsic = Intrinsic::of(measured);

        Drawable::Button(ButtonDrawable {
            label,
            action: Self::action(node),
            box_style: build_box_style(&style, sizing, Intrinsic::of(measured)),
        })
    }

    /// 无效或缺失的 URL 不影响点击回调，只是不携带 URL
    fn action(node: &Node) -> TapAction {
        let action_url = node.action_url.as_deref().and_then(|raw| match Url::parse(raw.trim()) {
            Ok(url) => Some(url),
            Err(err) => {
                debug!("ignoring invalid button actionUrl {:?}: {}", raw, err);
                None
            }
        });

        TapAction {
            interaction_id: node.interaction_id.clone().unwrap_or_default(),
            action_url,
        }
    }
}
