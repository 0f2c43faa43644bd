//! 样式解析器 - 将节点 style 字典解析为几何与绘制属性
//!
//! 解析永不失败：缺失、类型错误或越界的值都退回默认值。

use crate::config::RenderConfig;
use crate::geometry::Edges;
use crate::parser::StyleMap;
use crate::Color;
use log::trace;
use serde::{Deserialize, Serialize};

/// 坐标轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// 容器排列方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FlexDirection {
    Row,
    #[default]
    Column,
    /// 子元素叠放
    Overlay,
}

impl FlexDirection {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "row" => FlexDirection::Row,
            "column" => FlexDirection::Column,
            _ => FlexDirection::Overlay,
        }
    }

    /// 主轴；叠放容器没有主轴
    pub fn main_axis(&self) -> Option<Axis> {
        match self {
            FlexDirection::Row => Some(Axis::Horizontal),
            FlexDirection::Column => Some(Axis::Vertical),
            FlexDirection::Overlay => None,
        }
    }
}

/// justifyContent / alignItems 关键字
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    Stretch,
}

impl Alignment {
    /// 无法识别的值按 start 处理
    pub fn parse(value: &str) -> Self {
        let key: String = value
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "start" | "flexstart" | "leading" | "top" | "left" => Alignment::Start,
            "center" | "middle" => Alignment::Center,
            "end" | "flexend" | "trailing" | "bottom" | "right" => Alignment::End,
            "spacebetween" => Alignment::SpaceBetween,
            "spacearound" => Alignment::SpaceAround,
            "spaceevenly" => Alignment::SpaceEvenly,
            "stretch" => Alignment::Stretch,
            _ => Alignment::Start,
        }
    }
}

/// 字重
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FontWeight {
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
    Heavy,
    Black,
}

impl FontWeight {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "bold" | "700" => FontWeight::Bold,
            "semibold" | "600" => FontWeight::Semibold,
            "medium" | "500" => FontWeight::Medium,
            "regular" | "400" => FontWeight::Regular,
            "light" | "300" => FontWeight::Light,
            "thin" | "100" => FontWeight::Thin,
            "heavy" | "800" => FontWeight::Heavy,
            "black" | "900" => FontWeight::Black,
            _ => FontWeight::Regular,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, FontWeight::Semibold | FontWeight::Bold | FontWeight::Heavy | FontWeight::Black)
    }
}

/// 图片缩放模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentScale {
    /// 保持比例完整显示，可能留白
    #[default]
    Fit,
    /// 保持比例填满并裁剪到盒子
    Fill,
    /// 保持比例填满后硬裁剪
    Crop,
    /// 不缩放
    None,
}

impl ContentScale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fit" => Some(ContentScale::Fit),
            "fill" => Some(ContentScale::Fill),
            "crop" => Some(ContentScale::Crop),
            "none" => Some(ContentScale::None),
            _ => None,
        }
    }
}

/// width / height 的原始声明
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LengthSpec {
    #[default]
    Auto,
    Points(f32),
    /// 0..=100，不做截断
    Percent(f32),
    /// 数值 -1
    Fill,
}

impl LengthSpec {
    fn from_style(style: &StyleMap, key: &str) -> Self {
        if let Some(v) = style.float(key) {
            if v == -1.0 {
                return LengthSpec::Fill;
            }
            return if v >= 0.0 { LengthSpec::Points(v) } else { LengthSpec::Auto };
        }
        match style.string(key).and_then(parse_percentage) {
            Some(p) => LengthSpec::Percent(p),
            None => LengthSpec::Auto,
        }
    }
}

/// 边框
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Border {
    pub width: f32,
    pub color: Color,
    pub radius: f32,
}

impl Default for Border {
    fn default() -> Self {
        Self { width: 0.0, color: Color::TRANSPARENT, radius: 0.0 }
    }
}

/// 解析后的节点样式
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub background_color: Option<Color>,
    pub border: Border,
    pub margin: Edges,
    pub padding: Edges,
    pub width: LengthSpec,
    pub height: LengthSpec,
    pub fill_width: bool,
    pub fill_height: bool,
    /// 只在有主轴的父容器中生效
    pub weight: f32,
    pub aspect_ratio: Option<f32>,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub text_color: Option<Color>,
    pub content_scale: ContentScale,
    pub flex_direction: FlexDirection,
    pub justify_content: Alignment,
    pub align_items: Alignment,
    /// 是否声明过任何 padding 键
    pub has_padding: bool,
    pub has_margin_bottom: bool,
    pub has_border_radius: bool,
}

/// 样式解析器
pub struct StyleResolver<'a> {
    config: &'a RenderConfig,
}

impl<'a> StyleResolver<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// 解析节点样式，`parent` 为父容器排列方向
    pub fn resolve(&self, style: &StyleMap, parent: FlexDirection) -> ResolvedStyle {
        let padding_keys = [
            "padding", "paddingHorizontal", "paddingVertical",
            "paddingTop", "paddingRight", "paddingBottom", "paddingLeft",
        ];

        let weight = style
            .float("weight")
            .or_else(|| {
                let flex = style.float("flex");
                if flex.is_some() {
                    trace!("using legacy `flex` weight key");
                }
                flex
            })
            .filter(|w| *w >= 0.0)
            .unwrap_or(0.0);

        let resolved = ResolvedStyle {
            background_color: style.string("backgroundColor").and_then(Color::parse),
            border: Border {
                width: non_negative(style, "borderWidth").unwrap_or(0.0),
                color: style
                    .string("borderColor")
                    .and_then(Color::parse)
                    .unwrap_or(Color::TRANSPARENT),
                radius: non_negative(style, "borderRadius").unwrap_or(0.0),
            },
            margin: edges(style, "margin", |_| true),
            padding: edges(style, "padding", |v| v >= 0.0),
            width: LengthSpec::from_style(style, "width"),
            height: LengthSpec::from_style(style, "height"),
            fill_width: style.get_bool("fillWidth", false),
            fill_height: style.get_bool("fillHeight", false),
            weight: if parent.main_axis().is_some() { weight } else { 0.0 },
            aspect_ratio: style.string("aspectRatio").and_then(parse_aspect_ratio),
            font_size: style
                .float("fontSize")
                .filter(|v| *v > 0.0)
                .unwrap_or(self.config.font_size),
            font_weight: style.string("fontWeight").map(FontWeight::parse).unwrap_or_default(),
            text_color: style
                .string("textColor")
                .or_else(|| style.string("color"))
                .and_then(Color::parse),
            content_scale: style
                .string("contentScale")
                .and_then(ContentScale::parse)
                .unwrap_or(self.config.content_scale),
            flex_direction: style
                .string("flexDirection")
                .map(FlexDirection::parse)
                .unwrap_or_default(),
            justify_content: style.string("justifyContent").map(Alignment::parse).unwrap_or_default(),
            align_items: style.string("alignItems").map(Alignment::parse).unwrap_or_default(),
            has_padding: padding_keys
                .iter()
                .any(|k| style.float(k).is_some_and(|v| v >= 0.0)),
            has_margin_bottom: style.first_float(&["marginBottom", "marginVertical", "margin"]).is_some(),
            has_border_radius: non_negative(style, "borderRadius").is_some(),
        };

        trace!(
            "resolved style: width={:?} height={:?} weight={} fill=({}, {})",
            resolved.width, resolved.height, resolved.weight, resolved.fill_width, resolved.fill_height
        );
        resolved
    }
}

fn non_negative(style: &StyleMap, key: &str) -> Option<f32> {
    style.float(key).filter(|v| *v >= 0.0)
}

/// 单边键 > 轴向键 > 四边键
fn edges(style: &StyleMap, prefix: &str, valid: impl Fn(f32) -> bool) -> Edges {
    let get = |key: String| style.float(&key).filter(|v| valid(*v));
    let all = get(prefix.to_string()).unwrap_or(0.0);
    let horizontal = get(format!("{prefix}Horizontal")).unwrap_or(all);
    let vertical = get(format!("{prefix}Vertical")).unwrap_or(all);

    Edges {
        top: get(format!("{prefix}Top")).unwrap_or(vertical),
        right: get(format!("{prefix}Right")).unwrap_or(horizontal),
        bottom: get(format!("{prefix}Bottom")).unwrap_or(vertical),
        left: get(format!("{prefix}Left")).unwrap_or(horizontal),
    }
}

/// "50%" -> 50.0；前缀不是数字时返回 None
pub fn parse_percentage(value: &str) -> Option<f32> {
    let number = value.trim().strip_suffix('%')?;
    number.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// "W/H" -> W / H；格式错误或非正数时返回 None
pub fn parse_aspect_ratio(value: &str) -> Option<f32> {
    let (w, h) = value.split_once('/')?;
    let w = w.trim().parse::<f32>().ok()?;
    let h = h.trim().parse::<f32>().ok()?;
    if w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite() {
        Some(w / h)
    } else {
        None
    }
}
