//! 与宿主无关的绘制描述树
//!
//! 解释器输出 [`Drawable`]，布局与绘制由宿主侧单独遍历完成。

use super::style_resolver::{Alignment, Border, ContentScale, FlexDirection, FontWeight};
use crate::geometry::Edges;
use crate::loader::ImageHandle;
use crate::text::{wrap_lines, TextMeasurer};
use crate::{Color, Size};
use serde::Serialize;
use url::Url;

/// 单个轴上的尺寸规则
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisSize {
    /// 父容器同轴内容尺寸的百分比（0..=100）
    Percent(f32),
    /// 按权重分配主轴剩余空间
    Weighted(f32),
    /// 占满父容器该轴
    Fill,
    Fixed(f32),
    /// 内容自然尺寸
    Natural,
}

/// 固有内容尺寸，`None` 表示由布局推导（宽高比或子元素）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Intrinsic {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Intrinsic {
    pub const AUTO: Intrinsic = Intrinsic { width: None, height: None };

    pub fn of(size: Size) -> Self {
        Self { width: Some(size.width), height: Some(size.height) }
    }
}

/// 所有绘制节点共有的盒属性
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxStyle {
    pub background: Option<Color>,
    pub border: Border,
    pub margin: Edges,
    pub padding: Edges,
    pub width: AxisSize,
    pub height: AxisSize,
    pub aspect_ratio: Option<f32>,
    pub intrinsic: Intrinsic,
}

impl BoxStyle {
    /// 边框加内边距
    pub fn insets(&self) -> Edges {
        Edges::all(self.border.width).add(&self.padding)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Drawable {
    Container(ContainerDrawable),
    Text(TextDrawable),
    Image(ImageDrawable),
    Button(ButtonDrawable),
    Placeholder(PlaceholderDrawable),
}

impl Drawable {
    pub fn box_style(&self) -> &BoxStyle {
        match self {
            Drawable::Container(d) => &d.box_style,
            Drawable::Text(d) => &d.box_style,
            Drawable::Image(d) => &d.box_style,
            Drawable::Button(d) => &d.box_style,
            Drawable::Placeholder(d) => &d.box_style,
        }
    }

    pub fn children(&self) -> &[Drawable] {
        match self {
            Drawable::Container(d) => &d.children,
            _ => &[],
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Drawable::Container(_) => "container",
            Drawable::Text(_) => "text",
            Drawable::Image(_) => "image",
            Drawable::Button(_) => "button",
            Drawable::Placeholder(_) => "placeholder",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDrawable {
    pub direction: FlexDirection,
    pub justify_content: Alignment,
    pub align_items: Alignment,
    pub children: Vec<Drawable>,
    #[serde(flatten)]
    pub box_style: BoxStyle,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDrawable {
    pub content: String,
    pub font_size: f32,
    pub font_weight: FontWeight,
    /// `None` 表示使用宿主默认前景色
    pub color: Option<Color>,
    pub line_limit: Option<usize>,
    #[serde(flatten)]
    pub box_style: BoxStyle,
}

impl TextDrawable {
    /// 实际显示的行；超出行数限制时最后一行加省略号
    pub fn display_lines(&self) -> Vec<String> {
        limit_lines(self.content.split('\n').map(str::to_string).collect(), self.line_limit)
    }

    /// 按宽度折行后的显示行；有行数限制的文本（按钮标签）不折行
    pub fn wrapped_lines(&self, measurer: &dyn TextMeasurer, max_width: Option<f32>) -> Vec<String> {
        if self.line_limit.is_some() {
            return self.display_lines();
        }
        wrap_lines(measurer, &self.content, self.font_size, self.font_weight, max_width)
    }
}

fn limit_lines(mut lines: Vec<String>, limit: Option<usize>) -> Vec<String> {
    match limit {
        Some(limit) if lines.len() > limit => {
            lines.truncate(limit);
            if let Some(last) = lines.last_mut() {
                last.push('…');
            }
            lines
        }
        _ => lines,
    }
}

/// 图片在当前渲染时刻的状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ImagePhase {
    /// 加载中，显示进度占位
    Pending,
    Loaded { width: u32, height: u32 },
    /// 加载失败或 URL 无效，显示占位图形
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDrawable {
    pub url: Option<Url>,
    pub content_scale: ContentScale,
    pub phase: ImagePhase,
    /// 持有句柄使加载与节点生命周期绑定
    #[serde(skip)]
    pub handle: Option<ImageHandle>,
    #[serde(flatten)]
    pub box_style: BoxStyle,
}

/// 按钮点击动作
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TapAction {
    pub interaction_id: String,
    pub action_url: Option<Url>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonDrawable {
    pub label: TextDrawable,
    pub action: TapAction,
    #[serde(flatten)]
    pub box_style: BoxStyle,
}

/// 不支持的节点类型的可见提示
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderDrawable {
    pub type_name: String,
    pub message: String,
    #[serde(flatten)]
    pub box_style: BoxStyle,
}
