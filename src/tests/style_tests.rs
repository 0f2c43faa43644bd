//! 样式解析单元测试
//! 颜色、百分比、宽高比、四边值以及默认值回退

use crate::config::RenderConfig;
use crate::parser::StyleMap;
use crate::renderer::{
    parse_aspect_ratio, parse_percentage, Alignment, ContentScale, FlexDirection, FontWeight,
    LengthSpec, StyleResolver,
};
use crate::{Color, Edges};
use serde_json::{json, Value};

fn style(value: Value) -> StyleMap {
    match value {
        Value::Object(map) => StyleMap::new(map),
        _ => StyleMap::default(),
    }
}

/// 短格式十六进制与长格式等价
#[test]
fn test_hex_short_form() {
    assert_eq!(Color::parse("#F00"), Color::parse("#FF0000"));
    assert_eq!(Color::parse("#FF0000"), Some(Color::rgba8(255, 0, 0, 255)));
}

/// 8 位十六进制的最后两位是 alpha
#[test]
fn test_hex_alpha() {
    let color = Color::parse("#FF000080").unwrap();
    assert!((color.a - 128.0 / 255.0).abs() < 1e-4);
    assert_eq!(color.r, 1.0);
}

/// 以 # 开头的非法值退回黑色，其他无法识别的值没有颜色
#[test]
fn test_invalid_colors() {
    assert_eq!(Color::parse("#GGG"), Some(Color::BLACK));
    assert_eq!(Color::parse("#12345"), Some(Color::BLACK));
    assert_eq!(Color::parse("rgb(1,2,3)"), None);
    assert_eq!(Color::parse("Blue"), Some(Color::SYSTEM_BLUE));
}

/// 只识别固定的几个颜色名
#[test]
fn test_named_color_set() {
    for name in ["red", "blue", "green", "yellow", "gray", "grey", "black", "white"] {
        assert!(Color::parse(name).is_some(), "{name}");
    }
    assert_eq!(Color::parse("clear"), None);
    assert_eq!(Color::parse("transparent"), None);
    assert_eq!(Color::parse("purple"), None);
}

#[test]
fn test_parse_percentage() {
    assert_eq!(parse_percentage("50%"), Some(50.0));
    assert_eq!(parse_percentage(" 12.5% "), Some(12.5));
    assert_eq!(parse_percentage("0%"), Some(0.0));
    assert_eq!(parse_percentage("abc%"), None);
    assert_eq!(parse_percentage("50"), None);
    // 不截断
    assert_eq!(parse_percentage("150%"), Some(150.0));
}

#[test]
fn test_parse_aspect_ratio() {
    assert_eq!(parse_aspect_ratio("300/100"), Some(3.0));
    assert_eq!(parse_aspect_ratio(" 16 / 9 "), Some(16.0 / 9.0));
    assert_eq!(parse_aspect_ratio("0/100"), None);
    assert_eq!(parse_aspect_ratio("16:9"), None);
    assert_eq!(parse_aspect_ratio("a/b"), None);
}

/// 类型错误的值一律退回默认值
#[test]
fn test_defaults_on_garbage() {
    let config = RenderConfig::default();
    let resolver = StyleResolver::new(&config);
    let resolved = resolver.resolve(
        &style(json!({
            "width": "wide",
            "height": true,
            "padding": "x",
            "backgroundColor": 12,
            "fontSize": -3,
            "weight": "heavy",
            "borderWidth": -2,
            "contentScale": "stretch"
        })),
        FlexDirection::Column,
    );

    assert_eq!(resolved.width, LengthSpec::Auto);
    assert_eq!(resolved.height, LengthSpec::Auto);
    assert_eq!(resolved.padding, Edges::ZERO);
    assert_eq!(resolved.background_color, None);
    assert_eq!(resolved.font_size, 14.0);
    assert_eq!(resolved.weight, 0.0);
    assert_eq!(resolved.border.width, 0.0);
    assert_eq!(resolved.content_scale, ContentScale::Fit);
    assert!(!resolved.has_padding);
}

/// 每个样式键的值类型不对时，结果与空样式完全相同
#[test]
fn test_wrong_types_resolve_like_empty() {
    let config = RenderConfig::default();
    let resolver = StyleResolver::new(&config);
    let garbage = style(json!({
        "width": "wide",
        "height": true,
        "fillWidth": "yes",
        "fillHeight": 1,
        "weight": "heavy",
        "flex": [2],
        "aspectRatio": 1.5,
        "fontSize": "large",
        "fontWeight": 700,
        "textColor": 0xFF0000,
        "color": ["red"],
        "backgroundColor": 12,
        "borderColor": { "r": 1 },
        "borderWidth": "thick",
        "borderRadius": null,
        "flexDirection": 1,
        "justifyContent": false,
        "alignItems": 2,
        "contentScale": 3,
        "padding": "x",
        "paddingHorizontal": [],
        "paddingTop": {},
        "margin": "auto",
        "marginHorizontal": true,
        "marginVertical": "8",
        "marginTop": null,
        "marginRight": [1],
        "marginBottom": "4",
        "marginLeft": {}
    }));

    for parent in [FlexDirection::Column, FlexDirection::Row, FlexDirection::Overlay] {
        assert_eq!(
            resolver.resolve(&garbage, parent),
            resolver.resolve(&StyleMap::default(), parent)
        );
    }
}

#[test]
fn test_empty_style() {
    let config = RenderConfig::default();
    let resolved = StyleResolver::new(&config).resolve(&StyleMap::default(), FlexDirection::Row);

    assert_eq!(resolved.flex_direction, FlexDirection::Column);
    assert_eq!(resolved.justify_content, Alignment::Start);
    assert_eq!(resolved.font_weight, FontWeight::Regular);
    assert_eq!(resolved.text_color, None);
    assert_eq!(resolved.margin, Edges::ZERO);
}

/// 单边键 > 轴向键 > 四边键
#[test]
fn test_edge_precedence() {
    let config = RenderConfig::default();
    let resolved = StyleResolver::new(&config).resolve(
        &style(json!({ "padding": 4, "paddingHorizontal": 8, "paddingLeft": 12, "marginVertical": -6 })),
        FlexDirection::Column,
    );

    assert_eq!(resolved.padding, Edges { top: 4.0, right: 8.0, bottom: 4.0, left: 12.0 });
    // 外边距允许为负
    assert_eq!(resolved.margin.top, -6.0);
    assert_eq!(resolved.margin.left, 0.0);
    assert!(resolved.has_padding);
    assert!(resolved.has_margin_bottom);
}

/// flex 是 weight 的旧名，叠放容器中权重无效
#[test]
fn test_weight_alias_and_overlay() {
    let config = RenderConfig::default();
    let resolver = StyleResolver::new(&config);

    let weight = resolver.resolve(&style(json!({ "weight": 2 })), FlexDirection::Row);
    let flex = resolver.resolve(&style(json!({ "flex": 2 })), FlexDirection::Row);
    assert_eq!(weight.weight, 2.0);
    assert_eq!(weight, flex);

    let overlay = resolver.resolve(&style(json!({ "weight": 2 })), FlexDirection::Overlay);
    assert_eq!(overlay.weight, 0.0);
}

#[test]
fn test_width_specs() {
    let config = RenderConfig::default();
    let resolver = StyleResolver::new(&config);

    let fixed = resolver.resolve(&style(json!({ "width": 120, "height": -1 })), FlexDirection::Column);
    assert_eq!(fixed.width, LengthSpec::Points(120.0));
    assert_eq!(fixed.height, LengthSpec::Fill);

    let percent = resolver.resolve(&style(json!({ "width": "50%", "height": "abc%" })), FlexDirection::Column);
    assert_eq!(percent.width, LengthSpec::Percent(50.0));
    assert_eq!(percent.height, LengthSpec::Auto);
}

#[test]
fn test_text_style() {
    let config = RenderConfig::default();
    let resolved = StyleResolver::new(&config).resolve(
        &style(json!({ "fontSize": 18, "fontWeight": "700", "color": "#00FF00", "flexDirection": "row" })),
        FlexDirection::Column,
    );

    assert_eq!(resolved.font_size, 18.0);
    assert_eq!(resolved.font_weight, FontWeight::Bold);
    assert_eq!(resolved.text_color, Some(Color::rgba8(0, 255, 0, 255)));
    assert_eq!(resolved.flex_direction, FlexDirection::Row);
}

/// 配置可以整体从 JSON 加载，缺失字段取默认值
#[test]
fn test_config_from_json() {
    let config = RenderConfig::from_json_str(r#"{ "fontSize": 16, "fillPrecedence": "explicit" }"#).unwrap();
    assert_eq!(config.font_size, 16.0);
    assert_eq!(config.fill_precedence, crate::FillPrecedence::Explicit);
    assert_eq!(config.image_default_height, 80.0);
    assert_eq!(config.button.border_radius, 4.0);

    assert!(RenderConfig::from_json_str(r#"{ "fontSize": "big" }"#).is_err());
}
