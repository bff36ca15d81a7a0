//! Host component state
//!
//! [`Component`] holds the properties a UI delegate reads and writes on
//! the component it is installed on: colors, margin, gaps, state flags,
//! the border and the inline style and style classes.
//!
//! Values installed from UI defaults or styles are marked
//! [`Origin::Defaults`]; values set by the application are marked
//! [`Origin::Application`] and are never replaced by the delegate.

use std::sync::{Arc, OnceLock};

use flatlaf_core::{Color, Insets};
use flatlaf_style::{
    BorderSpec, Result, Style, StyleClasses, StyleValue, StyleableInfos, StyleableProperty, StyleableTable,
    ValueType,
};

use crate::border::FlatBorder;

// ============================================================================
// Property origin
// ============================================================================

/// Who assigned a property value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Origin {
    /// Installed from UI defaults or a style; may be replaced by the delegate
    #[default]
    Defaults,
    /// Set by the application
    Application,
}

/// A property value together with its origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assigned<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Assigned<T> {
    pub fn defaults(value: T) -> Self {
        Self {
            value,
            origin: Origin::Defaults,
        }
    }

    pub fn application(value: T) -> Self {
        Self {
            value,
            origin: Origin::Application,
        }
    }

    pub fn is_from_defaults(&self) -> bool {
        self.origin == Origin::Defaults
    }
}

/// Border of a component
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentBorder {
    /// A styleable flat border, possibly shared with other components
    Flat(Arc<FlatBorder>),
    /// Any other border, not styleable
    Custom(BorderSpec),
}

/// Component properties whose changes a delegate reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentProperty {
    Style,
    StyleClass,
    Enabled,
    Editable,
}

// ============================================================================
// Component
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    pub background: Option<Assigned<Color>>,
    pub foreground: Option<Assigned<Color>>,
    pub margin: Option<Assigned<Insets>>,
    /// Gap between icon and text in device pixels
    pub icon_text_gap: i32,
    pub opaque: bool,
    pub enabled: bool,
    pub editable: bool,
    pub border: Option<ComponentBorder>,
    pub style: Option<Style>,
    pub style_class: Option<StyleClasses>,
}

impl Default for Component {
    fn default() -> Self {
        Self {
            background: None,
            foreground: None,
            margin: None,
            icon_text_gap: 4,
            opaque: true,
            enabled: true,
            editable: true,
            border: None,
            style: None,
            style_class: None,
        }
    }
}

impl Component {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: impl Into<Style>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_style_class(mut self, classes: impl Into<StyleClasses>) -> Self {
        self.style_class = Some(classes.into());
        self
    }

    pub fn background(&self) -> Option<Color> {
        self.background.map(|b| b.value)
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground.map(|f| f.value)
    }

    pub fn margin(&self) -> Option<Insets> {
        self.margin.map(|m| m.value)
    }

    /// Set by the application; the delegate leaves it alone from now on
    pub fn set_background(&mut self, color: Color) {
        self.background = Some(Assigned::application(color));
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = Some(Assigned::application(color));
    }

    pub fn set_margin(&mut self, margin: Insets) {
        self.margin = Some(Assigned::application(margin));
    }

    /// Install a background from UI defaults unless the application set one
    pub fn install_background(&mut self, color: Option<Color>) {
        install(&mut self.background, color);
    }

    pub fn install_foreground(&mut self, color: Option<Color>) {
        install(&mut self.foreground, color);
    }

    pub fn install_margin(&mut self, margin: Option<Insets>) {
        install(&mut self.margin, margin);
    }

    /// Install a flat border unless the application set another border
    pub fn install_border(&mut self, border: &Arc<FlatBorder>) {
        if matches!(self.border, None | Some(ComponentBorder::Flat(_))) {
            self.border = Some(ComponentBorder::Flat(Arc::clone(border)));
        }
    }

    pub fn flat_border(&self) -> Option<&FlatBorder> {
        match &self.border {
            Some(ComponentBorder::Flat(border)) => Some(border),
            _ => None,
        }
    }

    /// Whether the flat border is still shared with other components
    pub fn is_border_shared(&self) -> bool {
        match &self.border {
            Some(ComponentBorder::Flat(border)) => Arc::strong_count(border) > 1,
            _ => false,
        }
    }

    pub fn set_style(&mut self, style: Option<Style>) {
        self.style = style;
    }

    pub fn set_style_class(&mut self, classes: Option<StyleClasses>) {
        self.style_class = classes;
    }

    /// Apply a style value to a component property.
    ///
    /// Unknown keys fail with `UnknownStyle`.
    pub fn apply_style_property(&mut self, key: &str, value: StyleValue) -> Result<StyleValue> {
        table().apply(self, key, value)
    }

    pub fn styleable_value(&self, key: &str) -> Option<StyleValue> {
        table().value(self, key)
    }

    pub fn styleable_infos(&self) -> Result<StyleableInfos> {
        table().infos()
    }

    pub fn affects_layout(&self, key: &str) -> bool {
        table().affects_layout(key)
    }
}

fn install<T>(slot: &mut Option<Assigned<T>>, value: Option<T>) {
    if slot.as_ref().map_or(true, Assigned::is_from_defaults) {
        *slot = value.map(Assigned::defaults);
    }
}

// ============================================================================
// Styleable properties
// ============================================================================

fn table() -> &'static StyleableTable<Component> {
    static TABLE: OnceLock<StyleableTable<Component>> = OnceLock::new();
    TABLE.get_or_init(|| {
        StyleableTable::new([
            StyleableProperty::new(
                "background",
                ValueType::Color,
                |c: &Component| c.background().into(),
                |c: &mut Component, v| {
                    // styled colors behave like colors from UI defaults
                    c.background = v.as_color().map(Assigned::defaults);
                    Ok(())
                },
            ),
            StyleableProperty::new(
                "foreground",
                ValueType::Color,
                |c: &Component| c.foreground().into(),
                |c: &mut Component, v| {
                    c.foreground = v.as_color().map(Assigned::defaults);
                    Ok(())
                },
            ),
            StyleableProperty::new(
                "margin",
                ValueType::Insets,
                |c: &Component| c.margin().into(),
                |c: &mut Component, v| {
                    c.margin = v.as_insets().map(Assigned::defaults);
                    Ok(())
                },
            )
            .layout(),
            bool_property!(Component, "opaque", opaque),
            bool_property!(Component, "enabled", enabled),
            bool_property!(Component, "editable", editable),
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatlaf_style::StyleError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_install_keeps_application_values() {
        let mut c = Component::new();
        c.install_background(Some(Color::WHITE));
        assert_eq!(c.background, Some(Assigned::defaults(Color::WHITE)));

        c.install_background(Some(Color::BLACK));
        assert_eq!(c.background(), Some(Color::BLACK));

        c.set_background(Color::RED);
        c.install_background(Some(Color::BLACK));
        assert_eq!(c.background, Some(Assigned::application(Color::RED)));
    }

    #[test]
    fn test_component_properties() {
        let mut c = Component::new();
        let old = c.apply_style_property("opaque", false.into()).unwrap();
        assert_eq!(old, StyleValue::Bool(true));
        assert!(!c.opaque);

        c.apply_style_property("margin", Insets::new(1, 2, 3, 4).into()).unwrap();
        assert_eq!(c.margin(), Some(Insets::new(1, 2, 3, 4)));
        assert!(c.affects_layout("margin"));

        let err = c.apply_style_property("arc", StyleValue::Int(4)).unwrap_err();
        assert!(matches!(err, StyleError::UnknownStyle { .. }));
    }
}
