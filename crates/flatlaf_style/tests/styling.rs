//! Parsing style text against UI defaults

use flatlaf_core::{Color, Dimension, Insets, UiScale};
use flatlaf_style::{parse, StyleError, StyleMap, StyleValue, UiDefaults};
use pretty_assertions::assert_eq;

fn map(entries: &[(&str, StyleValue)]) -> StyleMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_empty_styles() {
    let defaults = UiDefaults::new();

    assert_eq!(parse(None, &defaults).unwrap(), None);
    for text in ["", "  ", ";", " ; ; "] {
        assert_eq!(parse(text, &defaults).unwrap(), None, "{:?}", text);
    }
}

#[test]
fn test_simple_styles() {
    let defaults = UiDefaults::new();

    assert_eq!(
        parse("background: #fff", &defaults).unwrap(),
        Some(map(&[("background", Color::WHITE.into())]))
    );
    assert_eq!(
        parse("background:#fff; foreground:#000; someWidth:20", &defaults).unwrap(),
        Some(map(&[
            ("background", Color::WHITE.into()),
            ("foreground", Color::BLACK.into()),
            ("someWidth", StyleValue::Int(20)),
        ]))
    );
}

#[test]
fn test_duplicate_keys_last_wins() {
    let defaults = UiDefaults::new();
    let style = parse("arc: 1; width: 2; arc: 3;", &defaults).unwrap().unwrap();

    assert_eq!(style.keys().collect::<Vec<_>>(), vec!["arc", "width"]);
    assert_eq!(style["arc"], StyleValue::Int(3));
}

#[test]
fn test_parse_errors() {
    let defaults = UiDefaults::new();

    let err = parse("background #fff", &defaults).unwrap_err();
    assert_eq!(err.to_string(), "missing colon in 'background #fff'");

    let err = parse("arc: 5; : 3", &defaults).unwrap_err();
    assert!(err.to_string().starts_with("missing key in"), "{}", err);

    let err = parse("arc:", &defaults).unwrap_err();
    assert!(err.to_string().starts_with("missing value in"), "{}", err);

    let err = parse("background: lighten(#f00,20%", &defaults).unwrap_err();
    assert!(matches!(err, StyleError::Parse(_)), "{:?}", err);

    // no partial result
    assert!(parse("arc: 5; foreground: #ggg", &defaults).is_err());
}

#[test]
fn test_references() {
    let mut defaults = UiDefaults::new();
    defaults.put("Test.background", Color::WHITE);
    defaults.put("Test.boolean", true);
    defaults.put("Test.integer", 123i32);
    defaults.put("Test.float", 1.5f32);
    defaults.put("Test.string", "hello");
    defaults.put("Test.insets", Insets::new(1, 2, 3, 4));
    defaults.put("Test.size", Dimension::new(10, 20));

    let style = parse(
        "background: $Test.background; \
         darker: darken($Test.background,20%); \
         flag: $Test.boolean; \
         count: $Test.integer; \
         ratio: $Test.float; \
         label: $Test.string; \
         gap: $Test.insets; \
         extent: $Test.size; \
         missing: $Test.missing",
        &defaults,
    )
    .unwrap()
    .unwrap();

    assert_eq!(style["background"].as_color().map(|c| c.rgb_u32()), Some(0xffffff));
    assert_eq!(style["darker"].as_color().map(|c| c.rgb_u32()), Some(0xcccccc));
    assert_eq!(style["flag"], StyleValue::Bool(true));
    assert_eq!(style["count"], StyleValue::Int(123));
    assert_eq!(style["ratio"], StyleValue::Float(1.5));
    assert_eq!(style["label"], StyleValue::String("hello".into()));
    assert_eq!(style["gap"], StyleValue::Insets(Insets::new(1, 2, 3, 4)));
    assert_eq!(style["extent"], StyleValue::Dimension(Dimension::new(10, 20)));
    assert_eq!(style["missing"], StyleValue::Null);
}

#[test]
fn test_variables_and_typed_keys() {
    let mut defaults = UiDefaults::new();
    defaults.put_variable("@accent", "#f00");
    defaults.put_variable("@gap", "4,8,4,8");

    let style = parse("focusColor: @accent; [dark]padding: @gap; iconSize: 16,16", &defaults)
        .unwrap()
        .unwrap();

    assert_eq!(style["focusColor"].as_color(), Some(Color::RED));
    assert_eq!(style["[dark]padding"], StyleValue::Insets(Insets::new(4, 8, 4, 8)));
    assert_eq!(style["iconSize"], StyleValue::Dimension(Dimension::new(16, 16)));

    let err = parse("focusColor: @missing", &defaults).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_scaled_values() {
    let defaults = UiDefaults::new().with_scale(UiScale::new(2.0));
    let style = parse("gap: {scaledInteger}10; pad: {scaledInsets}1,2,3,4", &defaults)
        .unwrap()
        .unwrap();

    assert_eq!(style["gap"], StyleValue::Int(20));
    assert_eq!(style["pad"], StyleValue::Insets(Insets::new(2, 4, 6, 8)));
}
