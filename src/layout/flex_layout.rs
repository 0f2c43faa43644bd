//! 盒布局 (使用 Taffy - Rust 实现的 Flexbox 布局)
//!
//! 行/列容器映射为 flex 容器，叠放容器映射为单格 grid。
//! 文本叶子带测量函数，按分到的宽度折行后得出高度。
//! 结果与绘制树一一对应，坐标为绝对坐标。

use crate::error::LayoutError;
use crate::geometry::Edges;
use crate::renderer::{
    Alignment, Axis, AxisSize, BoxStyle, Drawable, FlexDirection as CardDirection, TextDrawable,
};
use crate::text::TextMeasurer;
use crate::Rect as GeoRect;
use serde::Serialize;
use taffy::prelude::*;
use taffy::TaffyError;

/// 单个节点的布局结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    /// 边框盒
    pub frame: GeoRect,
    /// 去掉边框与内边距后的内容区
    pub content: GeoRect,
    pub children: Vec<LayoutNode>,
}

/// 可用空间，高度为 `None` 时不限制
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Available {
    pub width: f32,
    pub height: Option<f32>,
}

impl Available {
    pub fn with_width(width: f32) -> Self {
        Self { width, height: None }
    }

    pub fn new(width: f32, height: Option<f32>) -> Self {
        Self { width, height }
    }
}

/// 需要按可用宽度折行测量的文本叶子
struct TextLeaf {
    text: TextDrawable,
}

/// 卡片布局计算
pub struct CardLayout {
    taffy: TaffyTree<TextLeaf>,
}

impl Default for CardLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl CardLayout {
    pub fn new() -> Self {
        Self { taffy: TaffyTree::new() }
    }

    /// 计算整棵绘制树的布局，文本用 `measurer` 折行测量
    pub fn compute(
        drawable: &Drawable,
        available: Available,
        measurer: &dyn TextMeasurer,
    ) -> Result<LayoutNode, LayoutError> {
        let mut layout = Self::new();
        let node = layout.build(drawable, CardDirection::Column)?;

        let root = layout
            .taffy
            .new_with_children(
                Style {
                    display: Display::Flex,
                    flex_direction: FlexDirection::Column,
                    align_items: Some(AlignItems::FlexStart),
                    size: Size {
                        width: length(available.width),
                        height: available.height.map(Dimension::Length).unwrap_or(Dimension::Auto),
                    },
                    ..Default::default()
                },
                &[node],
            )
            .map_err(engine)?;

        let space = Size {
            width: AvailableSpace::Definite(available.width),
            height: available
                .height
                .map(AvailableSpace::Definite)
                .unwrap_or(AvailableSpace::MaxContent),
        };
        layout
            .taffy
            .compute_layout_with_measure(root, space, |known, avail, _node, leaf| match leaf {
                Some(leaf) => measure_text(&leaf.text, measurer, known, avail),
                None => Size::ZERO,
            })
            .map_err(engine)?;

        layout.collect(drawable, node, 0.0, 0.0)
    }

    fn build(&mut self, drawable: &Drawable, parent: CardDirection) -> Result<NodeId, LayoutError> {
        let wraps = matches!(drawable, Drawable::Text(text) if text.line_limit.is_none());
        let style = child_style(drawable.box_style(), parent, wraps);

        match drawable {
            Drawable::Container(container) => {
                let children = container
                    .children
                    .iter()
                    .map(|child| self.build(child, container.direction))
                    .collect::<Result<Vec<_>, _>>()?;
                let style = container_style(style, container.direction, container.justify_content, container.align_items);
                self.taffy.new_with_children(style, &children).map_err(engine)
            }
            Drawable::Text(text) if wraps => self
                .taffy
                .new_leaf_with_context(style, TextLeaf { text: text.clone() })
                .map_err(engine),
            _ => self.taffy.new_leaf(style).map_err(engine),
        }
    }

    fn collect(
        &self,
        drawable: &Drawable,
        node: NodeId,
        offset_x: f32,
        offset_y: f32,
    ) -> Result<LayoutNode, LayoutError> {
        let layout = self.taffy.layout(node).map_err(engine)?;
        let frame = GeoRect::new(
            offset_x + layout.location.x,
            offset_y + layout.location.y,
            layout.size.width,
            layout.size.height,
        );
        let content = frame.inset_by(&drawable.box_style().insets());

        let child_nodes = self.taffy.children(node).map_err(engine)?;
        let children = drawable
            .children()
            .iter()
            .zip(child_nodes)
            .map(|(child, child_node)| self.collect(child, child_node, frame.x, frame.y))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LayoutNode { frame, content, children })
    }
}

fn engine(err: TaffyError) -> LayoutError {
    LayoutError::Engine(err.to_string())
}

/// 按内容区可用宽度折行；最小内容宽度时逐字折行，最大内容宽度时不折行
fn measure_text(
    text: &TextDrawable,
    measurer: &dyn TextMeasurer,
    known: Size<Option<f32>>,
    available: Size<AvailableSpace>,
) -> Size<f32> {
    if let Size { width: Some(width), height: Some(height) } = known {
        return Size { width, height };
    }

    let max_width = match available.width {
        AvailableSpace::Definite(width) => Some(width),
        AvailableSpace::MinContent => Some(0.0),
        AvailableSpace::MaxContent => None,
    };
    let lines = text.wrapped_lines(measurer, max_width);
    let measured = measurer.measure(&lines.join("\n"), text.font_size, text.font_weight);

    Size {
        width: known.width.unwrap_or(measured.width),
        height: known.height.unwrap_or(measured.height),
    }
}

/// 节点在父容器中的样式：尺寸、外边距、内边距、边框
///
/// `wraps` 的文本叶子自然尺寸交给测量函数，行内可收缩以便折行。
fn child_style(box_style: &BoxStyle, parent: CardDirection, wraps: bool) -> Style {
    let insets = box_style.insets();
    let mut style = Style {
        margin: Rect {
            left: length(box_style.margin.left),
            right: length(box_style.margin.right),
            top: length(box_style.margin.top),
            bottom: length(box_style.margin.bottom),
        },
        padding: Rect {
            left: length(box_style.padding.left),
            right: length(box_style.padding.right),
            top: length(box_style.padding.top),
            bottom: length(box_style.padding.bottom),
        },
        border: Rect {
            left: length(box_style.border.width),
            right: length(box_style.border.width),
            top: length(box_style.border.width),
            bottom: length(box_style.border.width),
        },
        aspect_ratio: box_style.aspect_ratio,
        flex_shrink: 0.0,
        ..Default::default()
    };

    if matches!(parent, CardDirection::Overlay) {
        style.grid_row = Line { start: line(1), end: auto() };
        style.grid_column = Line { start: line(1), end: auto() };
    }

    if wraps && parent == CardDirection::Row && box_style.width == AxisSize::Natural {
        style.flex_shrink = 1.0;
    }

    apply_axis(&mut style, box_style, Axis::Horizontal, parent, &insets, wraps);
    apply_axis(&mut style, box_style, Axis::Vertical, parent, &insets, wraps);
    style
}

fn apply_axis(
    style: &mut Style,
    box_style: &BoxStyle,
    axis: Axis,
    parent: CardDirection,
    insets: &Edges,
    wraps: bool,
) {
    let is_main = parent.main_axis() == Some(axis);
    let (rule, intrinsic, inset, margin) = match axis {
        Axis::Horizontal => (
            box_style.width,
            box_style.intrinsic.width,
            insets.horizontal(),
            box_style.margin.horizontal(),
        ),
        Axis::Vertical => (
            box_style.height,
            box_style.intrinsic.height,
            insets.vertical(),
            box_style.margin.vertical(),
        ),
    };

    let dimension = match rule {
        AxisSize::Percent(p) => percent(p / 100.0),
        AxisSize::Fixed(v) => length(v),
        AxisSize::Natural if wraps => Dimension::Auto,
        AxisSize::Natural => match intrinsic {
            Some(v) => length(v + inset),
            None => Dimension::Auto,
        },
        AxisSize::Weighted(weight) => {
            style.flex_grow = weight;
            style.flex_shrink = 1.0;
            style.flex_basis = length(0.0);
            // 自然内容尺寸是下限，只分配剩余空间
            if let (Some(v), false) = (intrinsic, wraps) {
                set_min(style, axis, length(v + inset));
            }
            Dimension::Auto
        }
        AxisSize::Fill if is_main => {
            // 占满主轴，同时给兄弟节点的自然尺寸让出空间
            style.flex_shrink = 1.0;
            set_min(style, axis, length(0.0));
            percent(1.0)
        }
        AxisSize::Fill if margin == 0.0 => percent(1.0),
        AxisSize::Fill => {
            stretch_cross(style, axis, parent);
            Dimension::Auto
        }
    };

    match axis {
        Axis::Horizontal => style.size.width = dimension,
        Axis::Vertical => style.size.height = dimension,
    }
}

fn set_min(style: &mut Style, axis: Axis, value: Dimension) {
    match axis {
        Axis::Horizontal => style.min_size.width = value,
        Axis::Vertical => style.min_size.height = value,
    }
}

fn stretch_cross(style: &mut Style, axis: Axis, parent: CardDirection) {
    match (parent, axis) {
        (CardDirection::Overlay, Axis::Horizontal) => style.justify_self = Some(AlignItems::Stretch),
        _ => style.align_self = Some(AlignItems::Stretch),
    }
}

fn container_style(mut style: Style, direction: CardDirection, justify: Alignment, align: Alignment) -> Style {
    match direction {
        CardDirection::Row | CardDirection::Column => {
            style.display = Display::Flex;
            style.flex_direction = if direction == CardDirection::Row {
                FlexDirection::Row
            } else {
                FlexDirection::Column
            };
            style.justify_content = Some(justify_content(justify));
            style.align_items = Some(align_items(align));
        }
        CardDirection::Overlay => {
            style.display = Display::Grid;
            style.justify_items = Some(align_items(justify));
            style.align_items = Some(align_items(align));
        }
    }
    style
}

fn justify_content(alignment: Alignment) -> JustifyContent {
    match alignment {
        Alignment::Start | Alignment::Stretch => JustifyContent::FlexStart,
        Alignment::Center => JustifyContent::Center,
        Alignment::End => JustifyContent::FlexEnd,
        Alignment::SpaceBetween => JustifyContent::SpaceBetween,
        Alignment::SpaceAround => JustifyContent::SpaceAround,
        Alignment::SpaceEvenly => JustifyContent::SpaceEvenly,
    }
}

fn align_items(alignment: Alignment) -> AlignItems {
    match alignment {
        Alignment::Center => AlignItems::Center,
        Alignment::End => AlignItems::End,
        Alignment::Stretch => AlignItems::Stretch,
        _ => AlignItems::Start,
    }
}

/// 布局树中的节点总数
pub fn count_nodes(node: &LayoutNode) -> usize {
    1 + node.children.iter().map(count_nodes).sum::<usize>()
}
