//! 颜色模块

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 系统色板
static NAMED_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    HashMap::from([
        ("red", Color::from_hex(0xFF3B30)),
        ("blue", Color::SYSTEM_BLUE),
        ("green", Color::from_hex(0x34C759)),
        ("yellow", Color::from_hex(0xFFCC00)),
        ("gray", Color::from_hex(0x8E8E93)),
        ("grey", Color::from_hex(0x8E8E93)),
        ("black", Color::BLACK),
        ("white", Color::WHITE),
    ])
});

/// RGBA 颜色，分量归一化到 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self::rgba8(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
            255,
        )
    }

    /// 转为 8 位分量，供光栅化使用
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// 解析样式中的颜色字符串
    ///
    /// `#RGB` / `#RRGGBB` / `#RRGGBBAA` 以及少量颜色名。
    /// 以 `#` 开头但长度或数字非法时返回不透明黑色；其他无法识别的值返回 `None`。
    pub fn parse(value: &str) -> Option<Color> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Some(Self::parse_hex(hex).unwrap_or(Color::BLACK));
        }
        Self::named(value)
    }

    fn parse_hex(hex: &str) -> Option<Color> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Color::rgba8(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, 255)),
            6 => Some(Color::rgba8(pair(0)?, pair(2)?, pair(4)?, 255)),
            8 => Some(Color::rgba8(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    /// 颜色名（不区分大小写）
    pub fn named(name: &str) -> Option<Color> {
        NAMED_COLORS.get(name.to_ascii_lowercase().as_str()).copied()
    }

    // 预定义颜色
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// #007AFF
    pub const SYSTEM_BLUE: Color = Color::new(0.0, 122.0 / 255.0, 1.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// 源颜色按 alpha 混合到目标像素上
#[inline]
pub fn blend_rgba8(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let src_a = src[3] as u32;
    let dst_a = dst[3] as u32;
    let inv_src_a = 255 - src_a;
    let out_a = src_a + (dst_a * inv_src_a) / 255;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let dst_factor = (dst_a * inv_src_a) / 255;
    let mix = |s: u8, d: u8| ((s as u32 * src_a + d as u32 * dst_factor) / out_a) as u8;
    [mix(src[0], dst[0]), mix(src[1], dst[1]), mix(src[2], dst[2]), out_a as u8]
}
