//! Style classes on components

use flatlaf_core::Color;
use flatlaf_style::{StyleClasses, UiDefaults};
use flatlaf_ui::{ButtonUi, Component, ComponentProperty, ComponentUi, Decorations, FlatBorder};
use pretty_assertions::assert_eq;

fn defaults() -> UiDefaults {
    let mut defaults = UiDefaults::new();
    defaults
        .load_properties(
            "Button.arc = 6\n\
             [style]Button = hoverBackground: #00f\n\
             [style].primary = foreground: #f00; hoverBackground: #f00\n\
             [style].secondary = foreground: #0f0\n\
             [style]Button.secondary = borderWidth: 2\n",
        )
        .unwrap();
    defaults
}

#[test]
fn test_class_order_on_button() {
    let defaults = defaults();
    let decorations = Decorations::from_defaults(&defaults);
    let mut ui = ButtonUi::new(&decorations);

    let mut c = Component::new().with_style_class("primary secondary");
    ui.install_ui(&mut c, &defaults);
    assert_eq!(c.foreground(), Some(Color::GREEN));
    assert_eq!(ui.hover_background, Some(Color::RED));
    assert_eq!(c.flat_border().map(|b| b.border_width), Some(2.0));

    c.set_style_class(Some(StyleClasses::from("secondary primary")));
    ui.property_change(&mut c, ComponentProperty::StyleClass, &defaults);
    assert_eq!(c.foreground(), Some(Color::RED));
}

#[test]
fn test_inline_style_wins() {
    let defaults = defaults();
    let decorations = Decorations::from_defaults(&defaults);
    let mut ui = ButtonUi::new(&decorations);

    let mut c = Component::new()
        .with_style_class("primary")
        .with_style("hoverBackground: #fff");
    ui.install_ui(&mut c, &defaults);
    assert_eq!(ui.hover_background, Some(Color::WHITE));
    assert_eq!(c.foreground(), Some(Color::RED));
}

#[test]
fn test_type_style_without_classes() {
    let defaults = defaults();
    let decorations = Decorations::from_defaults(&defaults);
    let mut ui = ButtonUi::new(&decorations);

    let mut c = Component::new();
    ui.install_ui(&mut c, &defaults);
    assert_eq!(ui.hover_background, Some(Color::BLUE));
    assert_eq!(c.flat_border().map(FlatBorder::arc), Some(6));

    // removing the class restores the class values
    c.set_style_class(Some(StyleClasses::from("secondary")));
    ui.property_change(&mut c, ComponentProperty::StyleClass, &defaults);
    assert_eq!(c.flat_border().map(|b| b.border_width), Some(2.0));

    c.set_style_class(None);
    ui.property_change(&mut c, ComponentProperty::StyleClass, &defaults);
    assert_eq!(c.flat_border().map(|b| b.border_width), Some(decorations.button_border.border_width));
    assert_eq!(c.foreground(), None);
}
