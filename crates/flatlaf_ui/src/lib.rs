//! FlatLaf styleable targets
//!
//! UI delegates for buttons, toggle buttons, check boxes, radio buttons
//! and text fields, together with the borders and icons they style.
//!
//! A delegate is installed on a [`Component`]: it seeds properties from
//! [`UiDefaults`](flatlaf_style::UiDefaults), then applies the component's
//! effective style (`[style]Type`, style classes, inline style). Style
//! keys go to the delegate first, then to its border, then to the
//! component itself.
//!
//! # Example
//!
//! ```rust
//! use flatlaf_style::UiDefaults;
//! use flatlaf_ui::{ButtonUi, Component, ComponentUi, Decorations};
//!
//! let mut defaults = UiDefaults::new();
//! defaults.load_properties("Button.arc = 6\n").unwrap();
//!
//! let decorations = Decorations::from_defaults(&defaults);
//! let mut ui = ButtonUi::new(&decorations);
//! let mut button = Component::new().with_style("arc: 12; hoverBackground: #f00");
//! ui.install_ui(&mut button, &defaults);
//!
//! assert_eq!(button.flat_border().map(|b| b.arc()), Some(12));
//! ```

#[macro_use]
mod macros;

pub mod border;
pub mod button;
pub mod component;
pub mod icons;
pub mod radio_button;
pub mod text_field;
pub mod ui;

pub use border::{BorderKind, ButtonBorder, FlatBorder, TextBorder};
pub use button::{ButtonKind, ButtonUi, ToggleProps};
pub use component::{Assigned, Component, ComponentBorder, ComponentProperty, Origin};
pub use icons::{CheckBoxIcon, IconKind};
pub use radio_button::{CheckKind, RadioButtonUi};
pub use text_field::TextFieldUi;
pub use ui::{ComponentUi, Decorations};

/// Type names [`create_ui`] knows
pub const UI_TYPES: &[&str] = &["Button", "ToggleButton", "CheckBox", "RadioButton", "TextField"];

/// Create the delegate for a component type name
pub fn create_ui(type_name: &str, decorations: &Decorations) -> Option<Box<dyn ComponentUi>> {
    let ui: Box<dyn ComponentUi> = match type_name {
        "Button" => Box::new(ButtonUi::new(decorations)),
        "ToggleButton" => Box::new(ButtonUi::toggle(decorations)),
        "CheckBox" => Box::new(RadioButtonUi::check_box(decorations)),
        "RadioButton" => Box::new(RadioButtonUi::new(decorations)),
        "TextField" => Box::new(TextFieldUi::new(decorations)),
        _ => return None,
    };
    Some(ui)
}
