//! Canvas 画布 - 预览用的 RGBA 软件光栅

use crate::color::blend_rgba8;
use crate::error::ImageError;
use crate::{Color, Rect};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// 画布
pub struct Canvas {
    pixels: RgbaImage,
    clip_stack: Vec<Rect>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            clip_stack: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 { self.pixels.width() }
    pub fn height(&self) -> u32 { self.pixels.height() }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    pub fn clear(&mut self, color: Color) {
        let rgba = Rgba(color.to_rgba8());
        for pixel in self.pixels.pixels_mut() {
            *pixel = rgba;
        }
    }

    /// 压入裁剪区域，与当前裁剪区域求交
    pub fn push_clip(&mut self, rect: Rect) {
        let clip = match self.clip_stack.last() {
            Some(current) => current.intersection(&rect).unwrap_or(Rect::new(rect.x, rect.y, 0.0, 0.0)),
            None => rect,
        };
        self.clip_stack.push(clip);
    }

    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        match self.pixels.get_pixel_checked(x, y) {
            Some(Rgba([r, g, b, a])) => Color::rgba8(*r, *g, *b, *a),
            None => Color::TRANSPARENT,
        }
    }

    /// 按覆盖率混合一个像素
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if coverage <= 0.0 || x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        if let Some(clip) = self.clip_stack.last() {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            if px < clip.x || px >= clip.right() || py < clip.y || py >= clip.bottom() {
                return;
            }
        }

        let mut src = color.to_rgba8();
        src[3] = (src[3] as f32 * coverage.min(1.0)).round() as u8;
        if src[3] == 0 {
            return;
        }
        let pixel = self.pixels.get_pixel_mut(x as u32, y as u32);
        pixel.0 = blend_rgba8(src, pixel.0);
    }

    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        self.fill_rounded_rect(rect, 0.0, color);
    }

    /// 填充圆角矩形，边缘抗锯齿
    pub fn fill_rounded_rect(&mut self, rect: &Rect, radius: f32, color: Color) {
        if rect.width <= 0.0 || rect.height <= 0.0 || color.is_transparent() {
            return;
        }
        let (x0, y0, x1, y1) = pixel_span(rect);
        for y in y0..y1 {
            for x in x0..x1 {
                let d = rounded_rect_distance(rect, radius, x as f32 + 0.5, y as f32 + 0.5);
                self.blend_pixel(x, y, color, (0.5 - d).clamp(0.0, 1.0));
            }
        }
    }

    /// 描边圆角矩形，描边位于矩形内侧
    pub fn stroke_rounded_rect(&mut self, rect: &Rect, radius: f32, width: f32, color: Color) {
        if width <= 0.0 || rect.width <= 0.0 || rect.height <= 0.0 || color.is_transparent() {
            return;
        }
        let inner = Rect::new(
            rect.x + width,
            rect.y + width,
            (rect.width - width * 2.0).max(0.0),
            (rect.height - width * 2.0).max(0.0),
        );
        let inner_radius = (radius - width).max(0.0);
        let (x0, y0, x1, y1) = pixel_span(rect);
        for y in y0..y1 {
            for x in x0..x1 {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                let outer = (0.5 - rounded_rect_distance(rect, radius, px, py)).clamp(0.0, 1.0);
                let hole = if inner.width > 0.0 && inner.height > 0.0 {
                    (0.5 - rounded_rect_distance(&inner, inner_radius, px, py)).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                self.blend_pixel(x, y, color, outer - hole);
            }
        }
    }

    /// 画线段，端点之间按距离计算覆盖率
    pub fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        let half = width.max(1.0) / 2.0;
        let bounds = Rect::new(
            from.0.min(to.0) - half,
            from.1.min(to.1) - half,
            (from.0 - to.0).abs() + half * 2.0,
            (from.1 - to.1).abs() + half * 2.0,
        );
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len_sq = dx * dx + dy * dy;
        let (x0, y0, x1, y1) = pixel_span(&bounds);
        for y in y0..y1 {
            for x in x0..x1 {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 {
                    (((px - from.0) * dx + (py - from.1) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (cx, cy) = (from.0 + dx * t, from.1 + dy * t);
                let dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                self.blend_pixel(x, y, color, (half + 0.5 - dist).clamp(0.0, 1.0));
            }
        }
    }

    /// 绘制灰度覆盖率位图（字形）
    pub fn draw_coverage(&mut self, x: i32, y: i32, width: usize, coverage: &[u8], color: Color) {
        if width == 0 {
            return;
        }
        for (i, alpha) in coverage.iter().enumerate() {
            if *alpha == 0 {
                continue;
            }
            let gx = x + (i % width) as i32;
            let gy = y + (i / width) as i32;
            self.blend_pixel(gx, gy, color, *alpha as f32 / 255.0);
        }
    }

    /// 把图片缩放到目标矩形（最近邻采样）
    pub fn draw_image(&mut self, image: &RgbaImage, dest: &Rect) {
        if dest.width <= 0.0 || dest.height <= 0.0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        let scale_x = image.width() as f32 / dest.width;
        let scale_y = image.height() as f32 / dest.height;
        let (x0, y0, x1, y1) = pixel_span(dest);
        for y in y0..y1 {
            let sy = ((y as f32 + 0.5 - dest.y) * scale_y).floor();
            if sy < 0.0 || sy >= image.height() as f32 {
                continue;
            }
            for x in x0..x1 {
                let sx = ((x as f32 + 0.5 - dest.x) * scale_x).floor();
                if sx < 0.0 || sx >= image.width() as f32 {
                    continue;
                }
                let Rgba([r, g, b, a]) = *image.get_pixel(sx as u32, sy as u32);
                self.blend_pixel(x, y, Color::rgba8(r, g, b, a), 1.0);
            }
        }
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        self.pixels.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// 矩形覆盖的像素范围 [x0, x1) × [y0, y1)
fn pixel_span(rect: &Rect) -> (i32, i32, i32, i32) {
    (
        rect.x.floor() as i32,
        rect.y.floor() as i32,
        rect.right().ceil() as i32,
        rect.bottom().ceil() as i32,
    )
}

/// 点到圆角矩形边界的有向距离，内部为负
fn rounded_rect_distance(rect: &Rect, radius: f32, px: f32, py: f32) -> f32 {
    let hx = rect.width / 2.0;
    let hy = rect.height / 2.0;
    let r = radius.max(0.0).min(hx).min(hy);
    let qx = (px - (rect.x + hx)).abs() - (hx - r);
    let qy = (py - (rect.y + hy)).abs() - (hy - r);
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - r
}
