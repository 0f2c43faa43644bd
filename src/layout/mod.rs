//! 盒布局引擎

mod flex_layout;

pub use flex_layout::{count_nodes, Available, CardLayout, LayoutNode};
