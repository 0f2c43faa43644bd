//! Card Render - 内容卡片渲染引擎
//! 把服务端下发的 JSON 布局描述解释为与宿主无关的绘制树，并计算布局

mod color;
mod geometry;
pub mod error;
pub mod config;

pub use color::{blend_rgba8, Color};
pub use geometry::{Edges, Point, Rect, Size};
pub use error::{BridgeError, ConfigError, ImageError, LayoutError, TemplateError};
pub use config::{ButtonDefaults, FillPrecedence, RenderConfig};

// JSON 节点树
pub mod parser;

// 样式解析、布局解释与组件
pub mod renderer;

// 盒布局 (Taffy)
pub mod layout;

// 图片加载与文本测量
pub mod loader;
pub mod text;

// 交互事件
pub mod event;

pub mod template;
pub mod runtime;

// 脚本消息注册表
pub mod bridge;

// 预览画布
pub mod canvas;

// FFI 导出
mod ffi;
pub use ffi::*;

pub use template::Template;
pub use runtime::{CardSession, RenderedCard};

// 单元测试
#[cfg(test)]
mod tests;
