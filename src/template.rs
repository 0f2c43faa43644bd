//! 卡片模板 - 根负载必须是 JSON 对象，否则没有模板

use crate::error::TemplateError;
use crate::parser::value::kind_of;
use crate::parser::Node;
use crate::renderer::{Drawable, LayoutContext, LayoutInterpreter};
use log::warn;
use serde_json::Value;

/// 解析后的卡片模板
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    root: Node,
}

impl Template {
    pub fn from_json_str(payload: &str) -> Result<Self, TemplateError> {
        let value: Value = serde_json::from_str(payload).map_err(|err| {
            warn!("content card payload is not valid JSON: {}", err);
            err
        })?;
        Self::from_value(&value)
    }

    pub fn from_slice(payload: &[u8]) -> Result<Self, TemplateError> {
        let value: Value = serde_json::from_slice(payload)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, TemplateError> {
        match value.as_object() {
            Some(object) => Ok(Self { root: Node::from_object(object) }),
            None => {
                let found = kind_of(value);
                warn!("content card payload root is a JSON {}, expected object", found);
                Err(TemplateError::NotAnObject { found })
            }
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// 生成一棵新的绘制树
    pub fn render(&self, interpreter: &LayoutInterpreter) -> Drawable {
        interpreter.render(&self.root, LayoutContext::root())
    }
}
