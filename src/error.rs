//! 错误类型

use thiserror::Error;

/// 模板构建失败：唯一会暴露给调用方的硬错误
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload root must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout engine failure: {0}")]
    Engine(String),
}

/// 图片加载失败，只在加载器内部使用，渲染时退化为占位图
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("http request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("unsupported image url scheme `{0}`")]
    UnsupportedScheme(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("no handler registered for message session `{0}`")]
    UnknownSession(String),

    #[error("malformed script message: {0}")]
    Malformed(#[from] serde_json::Error),
}
