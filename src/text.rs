//! 文本测量 - 估算字宽或使用 fontdue 字体度量

use crate::renderer::FontWeight;
use crate::Size;
use fontdue::{Font, FontSettings, Metrics};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// 文本测量接口，返回自然尺寸
pub trait TextMeasurer: Send + Sync {
    fn measure(&self, text: &str, font_size: f32, weight: FontWeight) -> Size;
}

/// 无字体时的估算：每个字符宽度固定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedMetrics {
    pub char_width_factor: f32,
    pub line_height_extra: f32,
}

impl Default for EstimatedMetrics {
    fn default() -> Self {
        Self { char_width_factor: 0.6, line_height_extra: 4.0 }
    }
}

impl EstimatedMetrics {
    pub fn new(char_width_factor: f32, line_height_extra: f32) -> Self {
        Self { char_width_factor, line_height_extra }
    }
}

impl TextMeasurer for EstimatedMetrics {
    fn measure(&self, text: &str, font_size: f32, weight: FontWeight) -> Size {
        let mut char_width = font_size * self.char_width_factor;
        if weight.is_bold() {
            char_width *= 1.1;
        }
        let (longest, lines) = line_stats(text, |line| line.chars().count() as f32 * char_width);
        Size::new(longest, lines as f32 * (font_size + self.line_height_extra))
    }
}

/// 基于字体文件的度量，同时为预览绘制提供字形光栅化
pub struct FontMetrics {
    font: Font,
    /// (char, size) -> (Metrics, Bitmap)
    cache: Arc<Mutex<HashMap<(char, u32), (Metrics, Vec<u8>)>>>,
}

impl FontMetrics {
    pub fn from_bytes(font_data: &[u8]) -> Result<Self, String> {
        let font = Font::from_bytes(font_data, FontSettings::default())?;
        Ok(Self {
            font,
            cache: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = std::fs::read(path.as_ref())
            .map_err(|e| format!("Failed to read font file: {}", e))?;
        Self::from_bytes(&data)
    }

    pub fn line_height(&self, font_size: f32) -> f32 {
        self.font
            .horizontal_line_metrics(font_size)
            .map(|m| m.new_line_size)
            .unwrap_or(font_size * 1.2)
    }

    pub fn ascent(&self, font_size: f32) -> f32 {
        self.font
            .horizontal_line_metrics(font_size)
            .map(|m| m.ascent)
            .unwrap_or(font_size * 0.8)
    }

    /// 光栅化单个字形（带缓存）
    pub fn rasterize(&self, ch: char, font_size: f32) -> (Metrics, Vec<u8>) {
        let key = (ch, (font_size * 10.0).round() as u32);
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache
            .entry(key)
            .or_insert_with(|| self.font.rasterize(ch, font_size))
            .clone()
    }
}

impl TextMeasurer for FontMetrics {
    fn measure(&self, text: &str, font_size: f32, _weight: FontWeight) -> Size {
        let (longest, lines) = line_stats(text, |line| {
            line.chars()
                .map(|ch| self.font.metrics(ch, font_size).advance_width)
                .sum()
        });
        Size::new(longest.ceil(), lines as f32 * self.line_height(font_size).ceil())
    }
}

/// 按显式换行拆分后，再把每段按字符折行到 `max_width` 以内
///
/// `max_width` 为 `None` 时不折行。每行至少保留一个字符，
/// 折行处的空白不带到下一行开头。
pub fn wrap_lines(
    measurer: &dyn TextMeasurer,
    text: &str,
    font_size: f32,
    weight: FontWeight,
    max_width: Option<f32>,
) -> Vec<String> {
    let Some(max_width) = max_width else {
        return text.split('\n').map(str::to_string).collect();
    };

    let mut lines = Vec::new();
    let mut buf = [0u8; 4];
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut current_width = 0.0_f32;
        for ch in paragraph.chars() {
            let char_width = measurer.measure(ch.encode_utf8(&mut buf), font_size, weight).width;
            if current_width + char_width > max_width + WRAP_TOLERANCE && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                current_width = 0.0;
                if ch.is_whitespace() {
                    continue;
                }
            }
            line.push(ch);
            current_width += char_width;
        }
        lines.push(line);
    }
    lines
}

/// 浮点累加误差内不折行
const WRAP_TOLERANCE: f32 = 0.01;

/// 按显式换行拆分，返回 (最宽行宽度, 行数)；空串算一行
fn line_stats(text: &str, width_of: impl Fn(&str) -> f32) -> (f32, usize) {
    let mut longest = 0.0_f32;
    let mut lines = 0;
    for line in text.split('\n') {
        longest = longest.max(width_of(line));
        lines += 1;
    }
    (longest, lines.max(1))
}
