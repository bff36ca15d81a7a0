//! Text field background precedence

use flatlaf_core::Color;
use flatlaf_style::UiDefaults;
use flatlaf_ui::{Component, ComponentProperty, ComponentUi, Decorations, TextFieldUi};
use pretty_assertions::assert_eq;

const NORMAL: u32 = 0xffffff;
const DISABLED: u32 = 0xeeeeee;
const INACTIVE: u32 = 0xdddddd;

fn defaults() -> UiDefaults {
    let mut defaults = UiDefaults::new();
    defaults
        .load_properties(
            "TextField.background = #ffffff\n\
             TextField.disabledBackground = #eeeeee\n\
             TextField.inactiveBackground = #dddddd\n",
        )
        .unwrap();
    defaults
}

fn background(c: &Component) -> Option<u32> {
    c.background().map(|b| b.rgb_u32())
}

fn set_state(ui: &mut TextFieldUi, c: &mut Component, enabled: bool, editable: bool, defaults: &UiDefaults) {
    c.enabled = enabled;
    ui.property_change(c, ComponentProperty::Enabled, defaults);
    c.editable = editable;
    ui.property_change(c, ComponentProperty::Editable, defaults);
}

#[test]
fn test_state_precedence() {
    let defaults = defaults();
    let decorations = Decorations::from_defaults(&defaults);
    let mut ui = TextFieldUi::new(&decorations);
    let mut c = Component::new();
    ui.install_ui(&mut c, &defaults);
    assert_eq!(background(&c), Some(NORMAL));

    set_state(&mut ui, &mut c, true, false, &defaults);
    assert_eq!(background(&c), Some(INACTIVE));

    set_state(&mut ui, &mut c, false, true, &defaults);
    assert_eq!(background(&c), Some(DISABLED));

    // disabled wins over non-editable
    set_state(&mut ui, &mut c, false, false, &defaults);
    assert_eq!(background(&c), Some(DISABLED));

    set_state(&mut ui, &mut c, true, true, &defaults);
    assert_eq!(background(&c), Some(NORMAL));
}

#[test]
fn test_disabled_at_install() {
    let defaults = defaults();
    let decorations = Decorations::from_defaults(&defaults);
    let mut ui = TextFieldUi::new(&decorations);
    let mut c = Component::new();
    c.enabled = false;
    ui.install_ui(&mut c, &defaults);
    assert_eq!(background(&c), Some(DISABLED));
}

#[test]
fn test_inline_style_and_removal() {
    let defaults = defaults();
    let decorations = Decorations::from_defaults(&defaults);
    let mut ui = TextFieldUi::new(&decorations);
    let mut c = Component::new().with_style("disabledBackground: #f00; inactiveBackground: #0f0");
    c.enabled = false;
    ui.install_ui(&mut c, &defaults);
    assert_eq!(c.background(), Some(Color::RED));

    set_state(&mut ui, &mut c, true, false, &defaults);
    assert_eq!(c.background(), Some(Color::GREEN));

    // removing the style brings back the default colors
    c.set_style(None);
    ui.property_change(&mut c, ComponentProperty::Style, &defaults);
    assert_eq!(background(&c), Some(INACTIVE));

    set_state(&mut ui, &mut c, false, false, &defaults);
    assert_eq!(background(&c), Some(DISABLED));
}

#[test]
fn test_styled_background_is_kept() {
    let defaults = defaults();
    let decorations = Decorations::from_defaults(&defaults);
    let mut ui = TextFieldUi::new(&decorations);
    let mut c = Component::new().with_style("background: #00f");
    ui.install_ui(&mut c, &defaults);
    assert_eq!(c.background(), Some(Color::BLUE));

    // an unknown background is left alone
    set_state(&mut ui, &mut c, false, true, &defaults);
    assert_eq!(c.background(), Some(Color::BLUE));
}

#[test]
fn test_application_background_is_kept() {
    let defaults = defaults();
    let decorations = Decorations::from_defaults(&defaults);
    let mut ui = TextFieldUi::new(&decorations);
    let mut c = Component::new();
    ui.install_ui(&mut c, &defaults);

    // same color as the default, but set by the application
    c.set_background(Color::WHITE);
    set_state(&mut ui, &mut c, false, true, &defaults);
    assert_eq!(c.background(), Some(Color::WHITE));
}
