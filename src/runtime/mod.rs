//! 卡片运行时

mod card;

pub use card::{CardSession, RenderedCard};
