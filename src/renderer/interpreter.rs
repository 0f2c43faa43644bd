//! 布局解释器 - 递归遍历节点树，按类型分派并确定每个子节点的尺寸规则
//!
//! 主轴尺寸优先级：百分比 > 权重 > fill > 显式数值 > 自然尺寸；
//! 交叉轴相同但没有权重一项。fill 与显式数值的先后由 [`FillPrecedence`] 决定，
//! 数值 -1 始终表示 fill。

use super::components::{
    ButtonComponent, ComponentContext, ImageComponent, PlaceholderComponent, Sizing,
    TextComponent, ViewComponent,
};
use super::drawable::{AxisSize, Drawable};
use super::style_resolver::{Axis, FlexDirection, LengthSpec, ResolvedStyle, StyleResolver};
use crate::config::{FillPrecedence, RenderConfig};
use crate::loader::ImageSource;
use crate::parser::{Node, NodeType};
use crate::text::TextMeasurer;

/// 递归过程中向下传递的布局上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext {
    /// 父容器的排列方向
    pub parent: FlexDirection,
}

impl LayoutContext {
    /// 根节点按列容器的子元素处理
    pub fn root() -> Self {
        Self { parent: FlexDirection::Column }
    }

    pub fn within(parent: FlexDirection) -> Self {
        Self { parent }
    }
}

/// 布局解释器
pub struct LayoutInterpreter<'a> {
    config: &'a RenderConfig,
    resolver: StyleResolver<'a>,
    components: ComponentContext<'a>,
}

impl<'a> LayoutInterpreter<'a> {
    pub fn new(
        config: &'a RenderConfig,
        measurer: &'a dyn TextMeasurer,
        images: &'a dyn ImageSource,
    ) -> Self {
        Self {
            config,
            resolver: StyleResolver::new(config),
            components: ComponentContext { config, measurer, images },
        }
    }

    /// 渲染节点，对任何输入都返回一个绘制节点
    pub fn render(&self, node: &Node, ctx: LayoutContext) -> Drawable {
        let style = self.resolver.resolve(&node.style, ctx.parent);
        let sizing = self.sizing(&style, ctx.parent);

        match &node.node_type {
            NodeType::View => {
                let child_ctx = LayoutContext::within(style.flex_direction);
                let children = node
                    .children
                    .iter()
                    .map(|child| self.render(child, child_ctx))
                    .collect();
                ViewComponent::build(&style, sizing, children)
            }
            NodeType::Text => TextComponent::build(node, &style, sizing, &self.components),
            NodeType::Image => ImageComponent::build(node, &style, sizing, &self.components),
            NodeType::Button => ButtonComponent::build(node, &style, sizing, &self.components),
            NodeType::Unsupported(type_name) => {
                PlaceholderComponent::build(type_name, &style, sizing, &self.components)
            }
        }
    }

    pub fn sizing(&self, style: &ResolvedStyle, parent: FlexDirection) -> Sizing {
        Sizing {
            width: self.axis_size(style, Axis::Horizontal, parent),
            height: self.axis_size(style, Axis::Vertical, parent),
        }
    }

    fn axis_size(&self, style: &ResolvedStyle, axis: Axis, parent: FlexDirection) -> AxisSize {
        let (spec, fill_flag) = match axis {
            Axis::Horizontal => (style.width, style.fill_width),
            Axis::Vertical => (style.height, style.fill_height),
        };

        if let LengthSpec::Percent(p) = spec {
            return AxisSize::Percent(p);
        }
        if parent.main_axis() == Some(axis) && style.weight > 0.0 {
            return AxisSize::Weighted(style.weight);
        }

        match spec {
            LengthSpec::Fill => AxisSize::Fill,
            LengthSpec::Points(v) if fill_flag => match self.config.fill_precedence {
                FillPrecedence::Fill => AxisSize::Fill,
                FillPrecedence::Explicit => AxisSize::Fixed(v),
            },
            LengthSpec::Points(v) => AxisSize::Fixed(v),
            LengthSpec::Auto if fill_flag => AxisSize::Fill,
            LengthSpec::Auto | LengthSpec::Percent(_) => AxisSize::Natural,
        }
    }
}
