//! 预览绘制 - 把布局好的卡片画到 [`Canvas`] 上
//!
//! 没有字体时文字画成方块，只用于检查布局。

use super::components::{place_image, PLACEHOLDER_FONT_SIZE};
use super::drawable::{BoxStyle, Drawable, ImageDrawable, ImagePhase, TextDrawable};
use super::style_resolver::FontWeight;
use crate::canvas::Canvas;
use crate::layout::LayoutNode;
use crate::loader::ImageState;
use crate::runtime::RenderedCard;
use crate::text::{EstimatedMetrics, FontMetrics, TextMeasurer};
use crate::{Color, Rect, Size};

const DEFAULT_TEXT_COLOR: Color = Color::BLACK;
const IMAGE_PLACEHOLDER_BG: Color = Color::new(0.9, 0.9, 0.92, 1.0);
const IMAGE_PLACEHOLDER_FG: Color = Color::new(0.6, 0.6, 0.64, 1.0);
const UNSUPPORTED_COLOR: Color = Color::new(1.0, 0.23, 0.19, 1.0);

/// 绘制整张卡片
pub fn paint(card: &RenderedCard, canvas: &mut Canvas, font: Option<&FontMetrics>) {
    let painter = Painter { font, estimate: EstimatedMetrics::default() };
    painter.paint_node(&card.tree, &card.layout, canvas);
}

struct Painter<'a> {
    font: Option<&'a FontMetrics>,
    estimate: EstimatedMetrics,
}

impl<'a> Painter<'a> {
    fn paint_node(&self, drawable: &Drawable, layout: &LayoutNode, canvas: &mut Canvas) {
        self.paint_box(drawable.box_style(), &layout.frame, canvas);

        match drawable {
            Drawable::Container(_) => {
                for (child, child_layout) in drawable.children().iter().zip(&layout.children) {
                    self.paint_node(child, child_layout, canvas);
                }
            }
            Drawable::Text(text) => self.paint_text(text, &layout.content, false, canvas),
            Drawable::Button(button) => self.paint_text(&button.label, &layout.content, true, canvas),
            Drawable::Image(image) => self.paint_image(image, layout, canvas),
            Drawable::Placeholder(placeholder) => {
                canvas.stroke_rounded_rect(&layout.frame, 2.0, 1.0, UNSUPPORTED_COLOR);
                let message = TextDrawable {
                    content: placeholder.message.clone(),
                    font_size: PLACEHOLDER_FONT_SIZE,
                    font_weight: FontWeight::Regular,
                    color: Some(UNSUPPORTED_COLOR),
                    line_limit: Some(1),
                    box_style: placeholder.box_style.clone(),
                };
                self.paint_text(&message, &layout.content, false, canvas);
            }
        }
    }

    fn paint_box(&self, style: &BoxStyle, frame: &Rect, canvas: &mut Canvas) {
        if let Some(background) = style.background {
            canvas.fill_rounded_rect(frame, style.border.radius, background);
        }
        if style.border.width > 0.0 {
            canvas.stroke_rounded_rect(frame, style.border.radius, style.border.width, style.border.color);
        }
    }

    fn paint_text(&self, text: &TextDrawable, bounds: &Rect, centered: bool, canvas: &mut Canvas) {
        let color = text.color.unwrap_or(DEFAULT_TEXT_COLOR);
        let size = text.font_size;
        let line_height = match self.font {
            Some(font) => font.line_height(size).ceil(),
            None => size + self.estimate.line_height_extra,
        };

        // 布局宽度经过取整，留出半个像素避免多折一行
        let lines = text.wrapped_lines(self.measurer(), Some(bounds.width + 0.5));

        canvas.push_clip(*bounds);
        for (index, line) in lines.iter().enumerate() {
            let top = bounds.y + index as f32 * line_height;
            let width = self.line_width(line, text);
            let left = if centered {
                bounds.x + (bounds.width - width) / 2.0
            } else {
                bounds.x
            };
            match self.font {
                Some(font) => draw_glyphs(font, line, left, top, size, color, canvas),
                None => self.draw_blocks(line, left, top, text, color, canvas),
            }
        }
        canvas.pop_clip();
    }

    fn measurer(&self) -> &dyn TextMeasurer {
        match self.font {
            Some(font) => font,
            None => &self.estimate,
        }
    }

    fn line_width(&self, line: &str, text: &TextDrawable) -> f32 {
        self.measurer().measure(line, text.font_size, text.font_weight).width
    }

    /// 每个字符画成一个方块
    fn draw_blocks(&self, line: &str, left: f32, top: f32, text: &TextDrawable, color: Color, canvas: &mut Canvas) {
        let mut advance = text.font_size * self.estimate.char_width_factor;
        if text.font_weight.is_bold() {
            advance *= 1.1;
        }
        let glyph_height = text.font_size * 0.7;
        let glyph_top = top + (text.font_size + self.estimate.line_height_extra - glyph_height) / 2.0;
        for (i, ch) in line.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x = left + i as f32 * advance;
            canvas.fill_rect(&Rect::new(x + advance * 0.1, glyph_top, advance * 0.8, glyph_height), color);
        }
    }

    fn paint_image(&self, image: &ImageDrawable, layout: &LayoutNode, canvas: &mut Canvas) {
        let bounds = layout.content;
        let loaded = match (&image.phase, image.handle.as_ref().map(|h| h.state())) {
            (ImagePhase::Loaded { .. }, Some(ImageState::Loaded(decoded))) => Some(decoded),
            _ => None,
        };

        match loaded {
            Some(decoded) => {
                let natural = Size::new(decoded.width as f32, decoded.height as f32);
                let (dest, clip) = place_image(image.content_scale, natural, bounds);
                if clip {
                    canvas.push_clip(bounds);
                }
                canvas.draw_image(&decoded.pixels, &dest);
                if clip {
                    canvas.pop_clip();
                }
            }
            None => {
                canvas.fill_rect(&bounds, IMAGE_PLACEHOLDER_BG);
                if image.phase == ImagePhase::Failed {
                    let (l, t, r, b) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());
                    canvas.push_clip(bounds);
                    canvas.draw_line((l, t), (r, b), 1.5, IMAGE_PLACEHOLDER_FG);
                    canvas.draw_line((r, t), (l, b), 1.5, IMAGE_PLACEHOLDER_FG);
                    canvas.pop_clip();
                } else {
                    // 加载中：中心三个点
                    let cx = bounds.x + bounds.width / 2.0;
                    let cy = bounds.y + bounds.height / 2.0;
                    for offset in [-8.0, 0.0, 8.0] {
                        canvas.fill_rounded_rect(
                            &Rect::new(cx + offset - 2.0, cy - 2.0, 4.0, 4.0),
                            2.0,
                            IMAGE_PLACEHOLDER_FG,
                        );
                    }
                }
            }
        }
    }
}

fn draw_glyphs(font: &FontMetrics, line: &str, left: f32, top: f32, size: f32, color: Color, canvas: &mut Canvas) {
    let baseline = top + font.ascent(size);
    let mut x = left;
    for ch in line.chars() {
        let (metrics, bitmap) = font.rasterize(ch, size);
        let gx = (x + metrics.xmin as f32).round() as i32;
        let gy = (baseline - metrics.height as f32 - metrics.ymin as f32).round() as i32;
        canvas.draw_coverage(gx, gy, metrics.width, &bitmap, color);
        x += metrics.advance_width;
    }
}
