//! 交互事件单元测试
//! 点击命中、回调参数、会话层分发

use super::{node_at, render};
use crate::config::RenderConfig;
use crate::event::hit_test;
use crate::layout::Available;
use crate::loader::StaticImageSource;
use crate::runtime::CardSession;
use crate::template::Template;
use crate::Point;
use serde_json::json;
use std::sync::{Arc, Mutex};
use url::Url;

type Calls = Arc<Mutex<Vec<(String, Option<String>)>>>;

fn recorder() -> (Calls, impl Fn(&str, Option<&Url>) + Send + Sync) {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let handler = move |id: &str, url: Option<&Url>| {
        sink.lock().unwrap().push((id.to_string(), url.map(|u| u.to_string())));
    };
    (calls, handler)
}

fn card_payload() -> serde_json::Value {
    json!({
        "type": "view",
        "style": { "padding": 10 },
        "children": [
            { "type": "text", "content": "Summer sale" },
            {
                "type": "button",
                "label": "Shop now",
                "interactionId": "shop",
                "actionUrl": "https://example.com/shop"
            }
        ]
    })
}

/// 点击按钮触发一次回调
#[test]
fn test_tap_button() {
    let card = render(card_payload(), 375.0);
    let (_, button) = node_at(&card, &[1]);
    let center = Point::new(
        button.frame.x + button.frame.width / 2.0,
        button.frame.y + button.frame.height / 2.0,
    );

    let (calls, handler) = recorder();
    assert!(card.tap(center, &handler));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "shop");
    assert_eq!(calls[0].1.as_deref(), Some("https://example.com/shop"));
}

/// 点击按钮以外的区域不触发回调
#[test]
fn test_tap_miss() {
    let card = render(card_payload(), 375.0);
    let (_, text) = node_at(&card, &[0]);

    let (calls, handler) = recorder();
    assert!(!card.tap(Point::new(text.frame.x + 1.0, text.frame.y + 1.0), &handler));
    assert!(!card.tap(Point::new(-5.0, -5.0), &handler));
    assert!(calls.lock().unwrap().is_empty());
}

/// 叠放时后面的按钮在上层
#[test]
fn test_topmost_button_wins() {
    let card = render(
        json!({
            "type": "view",
            "style": { "flexDirection": "overlay" },
            "children": [
                { "type": "button", "label": "Back", "interactionId": "back" },
                { "type": "button", "label": "Front", "interactionId": "front" }
            ]
        }),
        375.0,
    );

    let action = hit_test(&card.tree, &card.layout, &Point::new(5.0, 5.0)).unwrap();
    assert_eq!(action.interaction_id, "front");
}

/// 会话层按坐标分发，未设置回调时不命中
#[test]
fn test_session_tap() {
    let template = Template::from_value(&card_payload()).unwrap();
    let mut session = CardSession::new(template, RenderConfig::default())
        .with_image_source(Arc::new(StaticImageSource::new()));

    let card = session.render(Available::with_width(320.0)).unwrap();
    let button = card.layout.children[1].frame;
    let (x, y) = (button.x + 4.0, button.y + 4.0);
    assert!(!session.tap(x, y));

    let (calls, handler) = recorder();
    session.set_interaction_handler(Box::new(handler));
    assert!(session.tap(x, y));
    assert_eq!(calls.lock().unwrap()[0].0, "shop");

    let json = session.rendered_json().unwrap();
    assert!(json.contains("\"kind\":\"button\""));
    assert!(json.contains("\"interactionId\":\"shop\""));
}
