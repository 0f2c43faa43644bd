//! 交互事件 - 按钮点击回调

use crate::layout::LayoutNode;
use crate::renderer::{Drawable, TapAction};
use crate::Point;
use log::debug;
use url::Url;

/// 宿主提供的交互回调 `onInteract(interactionId, actionURL?)`，发出即忘
pub trait InteractionHandler: Send + Sync {
    fn on_interact(&self, interaction_id: &str, action_url: Option<&Url>);
}

impl<F> InteractionHandler for F
where
    F: Fn(&str, Option<&Url>) + Send + Sync,
{
    fn on_interact(&self, interaction_id: &str, action_url: Option<&Url>) {
        self(interaction_id, action_url)
    }
}

/// 查找点击位置上最上层的按钮
///
/// 后绘制的兄弟节点在上层，所以从后往前查找。
pub fn hit_test<'a>(drawable: &'a Drawable, layout: &LayoutNode, point: &Point) -> Option<&'a TapAction> {
    if !layout.frame.contains(point) {
        return None;
    }

    for (child, child_layout) in drawable.children().iter().zip(&layout.children).rev() {
        if let Some(action) = hit_test(child, child_layout, point) {
            return Some(action);
        }
    }

    match drawable {
        Drawable::Button(button) => Some(&button.action),
        _ => None,
    }
}

/// 分发一次点击，最多触发一次回调，返回是否命中按钮
pub fn dispatch_tap(
    drawable: &Drawable,
    layout: &LayoutNode,
    point: Point,
    handler: &dyn InteractionHandler,
) -> bool {
    match hit_test(drawable, layout, &point) {
        Some(action) => {
            debug!("tap at ({}, {}) -> interaction {:?}", point.x, point.y, action.interaction_id);
            handler.on_interact(&action.interaction_id, action.action_url.as_ref());
            true
        }
        None => false,
    }
}
