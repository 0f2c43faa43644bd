//! 卡片 JSON 解析：节点树与带默认值的字段访问

pub mod node;
pub mod value;

pub use node::{Node, NodeType};
pub use value::StyleMap;
