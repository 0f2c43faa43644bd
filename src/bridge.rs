//! 脚本消息桥接 - 按消息会话标识注册处理器
//!
//! 注册表由展示层持有并按引用传入，每个消息会话同一时刻只有一个处理器。
//! 消息内容的协议语义不在这里解释。

use crate::error::BridgeError;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// 消息会话标识
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageSessionId(String);

impl MessageSessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageSessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// 注入脚本发来的消息
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptMessage {
    pub name: String,
    #[serde(default)]
    pub body: Value,
}

/// 消息处理器
pub trait MessageHandler: Send + Sync {
    fn on_message(&self, message: &ScriptMessage);
}

impl<F> MessageHandler for F
where
    F: Fn(&ScriptMessage) + Send + Sync,
{
    fn on_message(&self, message: &ScriptMessage) {
        self(message)
    }
}

/// 消息注册表
#[derive(Default)]
pub struct MessageRegistry {
    handlers: Mutex<HashMap<MessageSessionId, Arc<dyn MessageHandler>>>,
}

impl MessageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册处理器，同一会话已有的处理器被替换并返回
    pub fn register(
        &self,
        id: MessageSessionId,
        handler: Arc<dyn MessageHandler>,
    ) -> Option<Arc<dyn MessageHandler>> {
        let previous = self.lock().insert(id.clone(), handler);
        if previous.is_some() {
            debug!("replaced message handler for session {}", id);
        }
        previous
    }

    pub fn unregister(&self, id: &MessageSessionId) -> bool {
        self.lock().remove(id).is_some()
    }

    pub fn is_registered(&self, id: &MessageSessionId) -> bool {
        self.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 解码原始 JSON 消息并转发给会话的处理器
    pub fn dispatch(&self, id: &MessageSessionId, raw: &str) -> Result<(), BridgeError> {
        let message: ScriptMessage = serde_json::from_str(raw).map_err(|err| {
            warn!("malformed script message for session {}: {}", id, err);
            err
        })?;

        // 回调在锁外执行，处理器内部可以再次注册或注销
        let handler = self
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| BridgeError::UnknownSession(id.to_string()))?;
        handler.on_message(&message);
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<MessageSessionId, Arc<dyn MessageHandler>>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
