//! 卡片会话 - 持有模板及渲染所需的外部协作者

use crate::config::RenderConfig;
use crate::error::LayoutError;
use crate::event::{dispatch_tap, InteractionHandler};
use crate::layout::{Available, CardLayout, LayoutNode};
use crate::loader::{HttpImageLoader, ImageSource};
use crate::renderer::{Drawable, LayoutInterpreter};
use crate::template::Template;
use crate::text::{EstimatedMetrics, TextMeasurer};
use crate::Point;
use log::{debug, warn};
use serde::Serialize;
use std::sync::Arc;

/// 一次渲染的结果：绘制树和与之对应的布局
#[derive(Debug, Clone, Serialize)]
pub struct RenderedCard {
    pub tree: Drawable,
    pub layout: LayoutNode,
}

impl RenderedCard {
    /// 点击分发，最多触发一次回调
    pub fn tap(&self, point: Point, handler: &dyn InteractionHandler) -> bool {
        dispatch_tap(&self.tree, &self.layout, point, handler)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// 卡片会话
pub struct CardSession {
    template: Template,
    config: RenderConfig,
    images: Arc<dyn ImageSource>,
    measurer: Box<dyn TextMeasurer>,
    handler: Option<Box<dyn InteractionHandler>>,
    rendered: Option<RenderedCard>,
}

impl CardSession {
    pub fn new(template: Template, config: RenderConfig) -> Self {
        let measurer = EstimatedMetrics::new(config.char_width_factor, config.line_height_extra);
        Self {
            template,
            config,
            images: Arc::new(HttpImageLoader::new()),
            measurer: Box::new(measurer),
            handler: None,
            rendered: None,
        }
    }

    pub fn with_image_source(mut self, images: Arc<dyn ImageSource>) -> Self {
        self.images = images;
        self
    }

    pub fn with_measurer(mut self, measurer: Box<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn set_interaction_handler(&mut self, handler: Box<dyn InteractionHandler>) {
        self.handler = Some(handler);
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// 每次都从模板重新构建绘制树，旧树（及其图片句柄）随之释放
    pub fn render(&mut self, available: Available) -> Result<&RenderedCard, LayoutError> {
        let interpreter = LayoutInterpreter::new(&self.config, self.measurer.as_ref(), self.images.as_ref());
        let tree = self.template.render(&interpreter);
        let layout = CardLayout::compute(&tree, available, self.measurer.as_ref())?;
        debug!(
            "rendered card {}x{}",
            layout.frame.width, layout.frame.height
        );
        Ok(self.rendered.insert(RenderedCard { tree, layout }))
    }

    pub fn rendered(&self) -> Option<&RenderedCard> {
        self.rendered.as_ref()
    }

    /// 最近一次渲染结果的 JSON 表示，尚未渲染时为 `None`
    pub fn rendered_json(&self) -> Option<String> {
        let card = self.rendered.as_ref()?;
        match card.to_json() {
            Ok(json) => Some(json),
            Err(err) => {
                warn!("failed to serialize rendered card: {}", err);
                None
            }
        }
    }

    /// 对最近一次渲染结果分发点击
    pub fn tap(&self, x: f32, y: f32) -> bool {
        match (&self.rendered, &self.handler) {
            (Some(card), Some(handler)) => card.tap(Point::new(x, y), handler.as_ref()),
            _ => false,
        }
    }
}
