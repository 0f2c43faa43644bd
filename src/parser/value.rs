//! 类型化的 JSON 字段访问
//!
//! 所有读取都带默认值：键缺失或类型不对时一律视为缺失，从不报错。

use serde_json::{Map, Value};

/// 节点的 style 字典
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    entries: Map<String, Value>,
}

impl StyleMap {
    pub fn new(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// JSON 数字，字符串不做转换
    pub fn number(&self, key: &str) -> Option<f64> {
        self.entries.get(key).and_then(Value::as_f64).filter(|v| v.is_finite())
    }

    pub fn float(&self, key: &str) -> Option<f32> {
        self.number(key).map(|v| v as f32)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        let value = self.entries.get(key)?;
        value.as_i64().or_else(|| {
            value.as_f64().filter(|f| f.fract() == 0.0 && f.is_finite()).map(|f| f as i64)
        })
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        self.entries.get(key).and_then(Value::as_bool)
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.int(key).unwrap_or(default)
    }

    pub fn get_float(&self, key: &str, default: f32) -> f32 {
        self.float(key).unwrap_or(default)
    }

    pub fn get_string<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.string(key).unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.boolean(key).unwrap_or(default)
    }

    /// 依次尝试多个键，取第一个存在且类型正确的值
    pub fn first_float(&self, keys: &[&str]) -> Option<f32> {
        keys.iter().find_map(|k| self.float(k))
    }
}

impl From<Map<String, Value>> for StyleMap {
    fn from(entries: Map<String, Value>) -> Self {
        Self::new(entries)
    }
}

/// 读取对象中的字符串字段
pub fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// JSON 值的类型名，用于日志与错误信息
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
