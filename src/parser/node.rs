//! 卡片节点树

use super::value::{kind_of, string_field, StyleMap};
use log::debug;
use serde_json::{Map, Value};

/// 节点类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    View,
    Text,
    Image,
    Button,
    /// 无法识别的类型，保留原始字符串用于占位显示
    Unsupported(String),
}

impl NodeType {
    pub fn parse(type_name: &str) -> Self {
        match type_name {
            "view" => NodeType::View,
            "text" => NodeType::Text,
            "image" => NodeType::Image,
            "button" => NodeType::Button,
            other => NodeType::Unsupported(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NodeType::View => "view",
            NodeType::Text => "text",
            NodeType::Image => "image",
            NodeType::Button => "button",
            NodeType::Unsupported(name) => name,
        }
    }
}

/// 卡片节点，解析后不可变
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub node_type: NodeType,
    pub style: StyleMap,
    pub children: Vec<Node>,
    /// text
    pub content: Option<String>,
    /// image
    pub url: Option<String>,
    /// button
    pub label: Option<String>,
    pub action_url: Option<String>,
    pub interaction_id: Option<String>,
}

impl Node {
    /// 从 JSON 值构建节点，永不失败
    pub fn from_value(value: &Value) -> Node {
        match value.as_object() {
            Some(object) => Self::from_object(object),
            None => {
                debug!("card node is a JSON {}, treating as unsupported", kind_of(value));
                Self::unsupported(kind_of(value))
            }
        }
    }

    pub fn from_object(object: &Map<String, Value>) -> Node {
        let node_type = match object.get("type").and_then(Value::as_str) {
            Some(name) => NodeType::parse(name),
            None => NodeType::Unsupported(String::new()),
        };

        let children = if node_type == NodeType::View {
            Self::children_of(object)
        } else {
            Vec::new()
        };

        Node {
            style: Self::style_of(object),
            children,
            content: string_field(object, "content"),
            url: string_field(object, "url"),
            label: string_field(object, "label"),
            action_url: string_field(object, "actionUrl"),
            interaction_id: string_field(object, "interactionId"),
            node_type,
        }
    }

    fn unsupported(type_name: &str) -> Node {
        Node {
            node_type: NodeType::Unsupported(type_name.to_string()),
            style: StyleMap::default(),
            children: Vec::new(),
            content: None,
            url: None,
            label: None,
            action_url: None,
            interaction_id: None,
        }
    }

    /// `style` 优先，其次历史拼写 `tyle`
    fn style_of(object: &Map<String, Value>) -> StyleMap {
        if let Some(style) = object.get("style").and_then(Value::as_object) {
            return StyleMap::new(style.clone());
        }
        if let Some(style) = object.get("tyle").and_then(Value::as_object) {
            debug!("using legacy `tyle` style key");
            return StyleMap::new(style.clone());
        }
        StyleMap::default()
    }

    /// `children` 优先，其次 `child`；数组、嵌套数组、单个对象都展开成一个有序序列
    fn children_of(object: &Map<String, Value>) -> Vec<Node> {
        let raw = match object.get("children") {
            Some(value) => value,
            None => match object.get("child") {
                Some(value) => {
                    debug!("using legacy `child` key");
                    value
                }
                None => return Vec::new(),
            },
        };

        let mut children = Vec::new();
        Self::collect_children(raw, &mut children);
        children
    }

    fn collect_children(value: &Value, out: &mut Vec<Node>) {
        match value {
            Value::Object(object) => out.push(Self::from_object(object)),
            Value::Array(items) => {
                for item in items {
                    Self::collect_children(item, out);
                }
            }
            other => debug!("skipping non-object child ({})", kind_of(other)),
        }
    }

    pub fn type_name(&self) -> &str {
        self.node_type.name()
    }
}
