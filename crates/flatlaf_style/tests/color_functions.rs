//! Color function oracles

use flatlaf_style::{parse_color_or_function, DefaultsResolver, NoopResolver, StyleError, UiDefaults};
use pretty_assertions::assert_eq;

fn eval(value: &str) -> u32 {
    let color = parse_color_or_function(value, &NoopResolver)
        .unwrap_or_else(|err| panic!("{}: {}", value, err))
        .unwrap_or_else(|| panic!("{}: null", value));
    if color.is_opaque() {
        color.rgb_u32()
    } else {
        color.argb()
    }
}

fn assert_colors(cases: &[(&str, u32)]) {
    for (value, expected) in cases {
        assert_eq!(eval(value), *expected, "{}", value);
    }
}

#[test]
fn test_hex_colors() {
    assert_colors(&[
        ("#f00", 0xff0000),
        ("#f008", 0x88ff0000),
        ("#123456", 0x123456),
        ("#12345678", 0x78123456),
    ]);
}

#[test]
fn test_rgb_hsl() {
    assert_colors(&[
        ("rgb(12,34,56)", 0x0c2238),
        ("rgba(12,34,56,78)", 0x4e0c2238),
        ("hsl(12,34%,56%)", 0xb57869),
        ("hsla(12,34%,56%,78%)", 0xc7b57869),
    ]);
}

#[test]
fn test_increase_decrease() {
    assert_colors(&[
        ("lighten(#f00,20%)", 0xff6666),
        ("darken(#f00,20%)", 0x990000),
        ("saturate(#844,20%)", 0x9c3030),
        ("desaturate(#844,20%)", 0x745858),
        ("fadein(#ff000000,30%)", 0x4dff0000),
        ("fadeout(#ff0000,40%)", 0x99ff0000),
        ("fade(#ff0000,50%)", 0x80ff0000),
        ("spin(#f00,40)", 0xffaa00),
        ("spin(#f00,-40)", 0xff00aa),
    ]);
}

#[test]
fn test_change() {
    assert_colors(&[
        ("changeHue(#f00,180)", 0x00ffff),
        ("changeSaturation(#f00,50%)", 0xbf4040),
        ("changeLightness(#f00,80%)", 0xff9999),
        ("changeAlpha(#f00,50%)", 0x80ff0000),
    ]);
}

#[test]
fn test_mix_tint_shade() {
    assert_colors(&[
        ("mix(#f00,#0f0,10%)", 0x1ae600),
        ("mix(#f00,#0f0,25%)", 0x40bf00),
        ("mix(#f00,#0f0)", 0x808000),
        ("mix(#f00,#0f0,75%)", 0xbf4000),
        ("mix(#f00,#0f0,90%)", 0xe61a00),
        ("tint(#f0f,25%)", 0xff40ff),
        ("tint(#f0f)", 0xff80ff),
        ("tint(#f0f,75%)", 0xffbfff),
        ("shade(#f0f,25%)", 0xbf00bf),
        ("shade(#f0f)", 0x800080),
        ("shade(#f0f,75%)", 0x400040),
    ]);
}

#[test]
fn test_contrast() {
    assert_colors(&[
        ("contrast(#111,#000,#fff)", 0xffffff),
        ("contrast(#eee,#000,#fff)", 0x000000),
    ]);
}

#[test]
fn test_nested_functions() {
    assert_colors(&[
        ("saturate(darken(#fff,20%),10%)", 0xd1c7c7),
        ("shade(shade(#f0f,10%),10%)", 0xcf00cf),
        ("shade(shade(shade(#f0f,10%),10%),10%)", 0xba00ba),
        (
            "contrast(contrast(#222,#111,#eee),contrast(#eee,#000,#fff),contrast(#111,#000,#fff))",
            0x000000,
        ),
    ]);
}

#[test]
fn test_if() {
    assert_colors(&[
        ("if(#000,#0f0,#dfd)", 0x00ff00),
        ("if(null,#0f0,#dfd)", 0xddffdd),
        ("if(true,#0f0,#dfd)", 0x00ff00),
        ("if(false,#0f0,#dfd)", 0xddffdd),
        ("if(1,#0f0,#dfd)", 0x00ff00),
        ("if(0,#0f0,#dfd)", 0xddffdd),
        ("if(true,lighten(#f00,20%),darken(#f00,20%))", 0xff6666),
        ("if(false,lighten(#f00,20%),darken(#f00,20%))", 0x990000),
        ("lighten(if(#000,#0f0,#dfd), 10%)", 0x33ff33),
    ]);
}

#[test]
fn test_if_with_undefined_reference() {
    let defaults = UiDefaults::new();
    let resolver = DefaultsResolver::new(&defaults);
    let color = parse_color_or_function("if($undefinedProp,#0f0,#dfd)", &resolver).unwrap();
    assert_eq!(color.map(|c| c.rgb_u32()), Some(0xddffdd));
}

#[test]
fn test_references_in_functions() {
    let mut defaults = UiDefaults::new();
    defaults.load_properties("Test.background = #fff\n@base = #f00\n").unwrap();
    let resolver = DefaultsResolver::new(&defaults);

    let eval = |value: &str| {
        parse_color_or_function(value, &resolver)
            .unwrap()
            .map(|c| c.rgb_u32())
    };
    assert_eq!(eval("darken($Test.background,20%)"), Some(0xcccccc));
    assert_eq!(eval("lighten(@base,20%)"), Some(0xff6666));
    assert_eq!(eval("systemColor(accent,#123)"), Some(0x112233));
    assert_eq!(eval("systemColor(accent)"), None);
}

#[test]
fn test_errors() {
    let err = |value: &str| parse_color_or_function(value, &NoopResolver).unwrap_err();

    assert!(matches!(err("#12"), StyleError::InvalidValue(_)));
    assert!(matches!(err("foo(#f00)"), StyleError::UnknownFunction(_)));
    assert!(matches!(err("lighten()"), StyleError::MissingParameters(_)));
    assert!(matches!(err("lighten(#f00)"), StyleError::MissingParameters(_)));
    assert!(matches!(err("lighten(#f00,120%)"), StyleError::PercentageOutOfRange(_)));
    assert!(matches!(err("rgb(300,0,0)"), StyleError::IntegerOutOfRange { .. }));
    assert!(matches!(err("lighten(#f00,20%"), StyleError::Parse(_)));
    assert!(matches!(err("darken(#f00,x%)"), StyleError::InvalidValue(_)));
}
