//! image 组件 - 图片
//!
//! 盒子尺寸按优先级确定：显式宽高，其次宽高比配合已约束的一条边，
//! 最后是默认高度（80）。占位图与加载成功的图片使用同一个盒子，加载完成时布局不跳动。
//!
//! 没有宽高比时，加载前无法得知图片的自然宽度，自然宽度也取默认高度，
//! 即 80×80 的方形盒子。需要横幅效果时应给出 `aspectRatio` 或 `fillWidth`。
//!
//! contentScale：
//! - fit: 保持比例完整显示
//! - fill: 保持比例铺满并裁剪到盒子
//! - crop: 保持比例铺满后硬裁剪
//! - none: 原始像素尺寸

use super::base::*;
use crate::loader::ImageState;
use crate::parser::Node;
use crate::renderer::drawable::{AxisSize, Drawable, ImageDrawable, ImagePhase, Intrinsic};
use crate::renderer::style_resolver::{ContentScale, ResolvedStyle};
use crate::{Rect, Size};
use log::{debug, trace};
use url::Url;

pub struct ImageComponent;

impl ImageComponent {
    pub fn build(node: &Node, style: &ResolvedStyle, sizing: Sizing, ctx: &ComponentContext) -> Drawable {
        let url = node.url.as_deref().and_then(|raw| match Url::parse(raw.trim()) {
            Ok(url) => Some(url),
            Err(err) => {
                debug!("invalid image url {:?}: {}", raw, err);
                None
            }
        });

        let handle = url.as_ref().map(|u| ctx.images.request(u));
        let phase = match handle.as_ref().map(|h| h.state()) {
            Some(ImageState::Pending) => ImagePhase::Pending,
            Some(ImageState::Loaded(image)) => ImagePhase::Loaded {
                width: image.width,
                height: image.height,
            },
            Some(ImageState::Failed) | None => ImagePhase::Failed,
        };
        trace!("image {:?} phase {:?}", node.url, phase);

        let intrinsic = Self::intrinsic(style, sizing, ctx.config.image_default_height);
        Drawable::Image(ImageDrawable {
            url,
            content_scale: style.content_scale,
            phase,
            handle,
            box_style: build_box_style(style, sizing, intrinsic),
        })
    }

    /// 自然尺寸：有宽高比时由布局推导，否则使用默认高度的方形盒子
    fn intrinsic(style: &ResolvedStyle, sizing: Sizing, default_height: f32) -> Intrinsic {
        match style.aspect_ratio {
            Some(_) => Intrinsic {
                width: None,
                height: match sizing.width {
                    AxisSize::Natural => Some(default_height),
                    _ => None,
                },
            },
            None => Intrinsic {
                width: Some(default_height),
                height: Some(default_height),
            },
        }
    }
}

/// 计算图片在盒子中的绘制区域，返回 (目标矩形, 是否裁剪到盒子)
pub fn place_image(scale: ContentScale, image: Size, bounds: Rect) -> (Rect, bool) {
    if image.width <= 0.0 || image.height <= 0.0 {
        return (bounds, true);
    }

    let centered = |w: f32, h: f32| {
        Rect::new(
            bounds.x + (bounds.width - w) / 2.0,
            bounds.y + (bounds.height - h) / 2.0,
            w,
            h,
        )
    };

    match scale {
        ContentScale::Fit => {
            let s = (bounds.width / image.width).min(bounds.height / image.height);
            (centered(image.width * s, image.height * s), false)
        }
        ContentScale::Fill | ContentScale::Crop => {
            let s = (bounds.width / image.width).max(bounds.height / image.height);
            (centered(image.width * s, image.height * s), true)
        }
        ContentScale::None => (centered(image.width, image.height), true),
    }
}
