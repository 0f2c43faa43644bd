//! 渲染配置 - 所有文档化的默认值集中在这里

use crate::error::ConfigError;
use crate::renderer::ContentScale;
use crate::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 同时设置显式宽高和 fillWidth/fillHeight 时谁优先
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FillPrecedence {
    /// fill 标记覆盖显式数值
    #[default]
    Fill,
    /// 显式数值覆盖 fill 标记
    Explicit,
}

/// 渲染配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub font_size: f32,
    pub image_default_height: f32,
    pub content_scale: ContentScale,
    pub fill_precedence: FillPrecedence,
    /// 行高 = 字号 + 该值
    pub line_height_extra: f32,
    /// 估算字符宽度 = 字号 * 该值
    pub char_width_factor: f32,
    pub button: ButtonDefaults,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            image_default_height: 80.0,
            content_scale: ContentScale::Fit,
            fill_precedence: FillPrecedence::Fill,
            line_height_extra: 4.0,
            char_width_factor: 0.6,
            button: ButtonDefaults::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonDefaults {
    pub text_color: Color,
    pub background: Color,
    pub border_radius: f32,
    pub bottom_margin: f32,
    pub padding_horizontal: f32,
    pub padding_vertical: f32,
}

impl Default for ButtonDefaults {
    fn default() -> Self {
        Self {
            text_color: Color::WHITE,
            background: Color::SYSTEM_BLUE,
            border_radius: 4.0,
            bottom_margin: 8.0,
            padding_horizontal: 16.0,
            padding_vertical: 8.0,
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_fill_precedence(mut self, precedence: FillPrecedence) -> Self {
        self.fill_precedence = precedence;
        self
    }
}
