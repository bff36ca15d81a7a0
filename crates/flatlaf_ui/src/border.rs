//! Flat borders
//!
//! One [`FlatBorder`] type carries the properties every flat border has
//! (focus and border widths, state colors) plus a [`BorderKind`] with the
//! additional properties of button and text component borders.
//!
//! Borders are created once from UI defaults and shared between
//! components through an `Arc`. The style chain clones a shared border on
//! its first write (`Arc::make_mut`), so styling one component never leaks
//! into another.

use std::sync::OnceLock;

use flatlaf_core::{Color, Insets};
use flatlaf_style::{
    Result, StyleError, StyleValue, Styleable, StyleableInfos, StyleableProperty, StyleableTable, UiDefaults,
    ValueType,
};

#[derive(Clone, Debug, PartialEq)]
pub struct FlatBorder {
    pub focus_width: i32,
    pub inner_focus_width: f32,
    pub inner_outline_width: f32,
    pub border_width: f32,

    pub focus_color: Option<Color>,
    pub border_color: Option<Color>,
    pub disabled_border_color: Option<Color>,
    pub focused_border_color: Option<Color>,

    pub error_border_color: Option<Color>,
    pub error_focused_border_color: Option<Color>,
    pub warning_border_color: Option<Color>,
    pub warning_focused_border_color: Option<Color>,
    pub custom_border_color: Option<Color>,

    pub kind: BorderKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BorderKind {
    Component,
    Button(ButtonBorder),
    Text(TextBorder),
}

/// Properties of button borders
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonBorder {
    pub arc: i32,
    pub hover_border_color: Option<Color>,

    pub default_border_width: f32,
    pub default_border_color: Option<Color>,
    pub default_focused_border_color: Option<Color>,
    pub default_focus_color: Option<Color>,
    pub default_hover_border_color: Option<Color>,

    pub toolbar_focus_width: f32,
    pub toolbar_focus_color: Option<Color>,
    pub toolbar_margin: Option<Insets>,
    pub toolbar_spacing_insets: Option<Insets>,
}

/// Properties of text component borders
#[derive(Clone, Debug, PartialEq)]
pub struct TextBorder {
    pub arc: i32,
    /// Overrides `arc`: `true` paints fully rounded ends, `false` square
    pub round_rect: Option<bool>,
}

impl FlatBorder {
    /// Border for plain components (`Component.*` defaults)
    pub fn from_defaults(defaults: &UiDefaults) -> Self {
        Self {
            focus_width: defaults.get_int("Component.focusWidth").unwrap_or(0),
            inner_focus_width: defaults.get_float("Component.innerFocusWidth").unwrap_or(0.0),
            inner_outline_width: defaults.get_float("Component.innerOutlineWidth").unwrap_or(0.0),
            border_width: defaults.get_float("Component.borderWidth").unwrap_or(1.0),
            focus_color: defaults.get_color("Component.focusColor"),
            border_color: defaults.get_color("Component.borderColor"),
            disabled_border_color: defaults.get_color("Component.disabledBorderColor"),
            focused_border_color: defaults.get_color("Component.focusedBorderColor"),
            error_border_color: defaults.get_color("Component.error.borderColor"),
            error_focused_border_color: defaults.get_color("Component.error.focusedBorderColor"),
            warning_border_color: defaults.get_color("Component.warning.borderColor"),
            warning_focused_border_color: defaults.get_color("Component.warning.focusedBorderColor"),
            custom_border_color: defaults.get_color("Component.custom.borderColor"),
            kind: BorderKind::Component,
        }
    }

    /// Border for buttons; `Button.*` values replace the component ones
    pub fn button(defaults: &UiDefaults) -> Self {
        let mut border = Self::from_defaults(defaults);
        border.inner_focus_width = defaults
            .get_float("Button.innerFocusWidth")
            .unwrap_or(border.inner_focus_width);
        border.border_width = defaults.get_float("Button.borderWidth").unwrap_or(border.border_width);
        border.border_color = defaults
            .get_color("Button.startBorderColor")
            .or_else(|| defaults.get_color("Button.borderColor"));
        border.disabled_border_color = defaults.get_color("Button.disabledBorderColor");
        border.focused_border_color = defaults.get_color("Button.focusedBorderColor");

        border.kind = BorderKind::Button(ButtonBorder {
            arc: defaults.get_int("Button.arc").unwrap_or(0),
            hover_border_color: defaults.get_color("Button.hoverBorderColor"),
            default_border_width: defaults.get_float("Button.default.borderWidth").unwrap_or(1.0),
            default_border_color: defaults
                .get_color("Button.default.startBorderColor")
                .or_else(|| defaults.get_color("Button.default.borderColor")),
            default_focused_border_color: defaults.get_color("Button.default.focusedBorderColor"),
            default_focus_color: defaults.get_color("Button.default.focusColor"),
            default_hover_border_color: defaults.get_color("Button.default.hoverBorderColor"),
            toolbar_focus_width: defaults.get_float("Button.toolbar.focusWidth").unwrap_or(1.5),
            toolbar_focus_color: defaults.get_color("Button.toolbar.focusColor"),
            toolbar_margin: defaults.get_insets("Button.toolbar.margin"),
            toolbar_spacing_insets: defaults.get_insets("Button.toolbar.spacingInsets"),
        });
        border
    }

    /// Border for text fields and other text components
    pub fn text(defaults: &UiDefaults) -> Self {
        let mut border = Self::from_defaults(defaults);
        border.kind = BorderKind::Text(TextBorder {
            arc: defaults.get_int("TextComponent.arc").unwrap_or(0),
            round_rect: None,
        });
        border
    }

    /// Arc used for painting
    pub fn arc(&self) -> i32 {
        match &self.kind {
            BorderKind::Component => 0,
            BorderKind::Button(button) => button.arc,
            BorderKind::Text(text) => match text.round_rect {
                Some(true) => i32::from(i16::MAX),
                Some(false) => 0,
                None => text.arc,
            },
        }
    }
}

// ============================================================================
// Styleable properties
// ============================================================================

fn base_table() -> &'static StyleableTable<FlatBorder> {
    static TABLE: OnceLock<StyleableTable<FlatBorder>> = OnceLock::new();
    TABLE.get_or_init(|| {
        StyleableTable::new([
            int_property!(FlatBorder, "focusWidth", focus_width).layout(),
            float_property!(FlatBorder, "innerFocusWidth", inner_focus_width),
            float_property!(FlatBorder, "innerOutlineWidth", inner_outline_width),
            float_property!(FlatBorder, "borderWidth", border_width).layout(),
            color_property!(FlatBorder, "focusColor", focus_color),
            color_property!(FlatBorder, "borderColor", border_color),
            color_property!(FlatBorder, "disabledBorderColor", disabled_border_color),
            color_property!(FlatBorder, "focusedBorderColor", focused_border_color),
            color_property!(FlatBorder, "error.borderColor", error_border_color),
            color_property!(FlatBorder, "error.focusedBorderColor", error_focused_border_color),
            color_property!(FlatBorder, "warning.borderColor", warning_border_color),
            color_property!(FlatBorder, "warning.focusedBorderColor", warning_focused_border_color),
            color_property!(FlatBorder, "custom.borderColor", custom_border_color),
        ])
    })
}

fn button_table() -> &'static StyleableTable<ButtonBorder> {
    static TABLE: OnceLock<StyleableTable<ButtonBorder>> = OnceLock::new();
    TABLE.get_or_init(|| {
        StyleableTable::new([
            int_property!(ButtonBorder, "arc", arc),
            color_property!(ButtonBorder, "hoverBorderColor", hover_border_color),
            float_property!(ButtonBorder, "default.borderWidth", default_border_width),
            color_property!(ButtonBorder, "default.borderColor", default_border_color),
            color_property!(ButtonBorder, "default.focusedBorderColor", default_focused_border_color),
            color_property!(ButtonBorder, "default.focusColor", default_focus_color),
            color_property!(ButtonBorder, "default.hoverBorderColor", default_hover_border_color),
            float_property!(ButtonBorder, "toolbar.focusWidth", toolbar_focus_width),
            color_property!(ButtonBorder, "toolbar.focusColor", toolbar_focus_color),
            insets_property!(ButtonBorder, "toolbar.margin", toolbar_margin).layout(),
            insets_property!(ButtonBorder, "toolbar.spacingInsets", toolbar_spacing_insets).layout(),
        ])
    })
}

fn text_table() -> &'static StyleableTable<TextBorder> {
    static TABLE: OnceLock<StyleableTable<TextBorder>> = OnceLock::new();
    TABLE.get_or_init(|| {
        StyleableTable::new([
            int_property!(TextBorder, "arc", arc),
            StyleableProperty::new(
                "roundRect",
                ValueType::Boolean,
                |t: &TextBorder| t.round_rect.map_or(StyleValue::Null, StyleValue::Bool),
                |t: &mut TextBorder, v| {
                    t.round_rect = v.as_bool();
                    Ok(())
                },
            )
            .nullable(),
        ])
    })
}

impl Styleable for FlatBorder {
    fn apply_style_property(&mut self, key: &str, value: StyleValue) -> Result<StyleValue> {
        let result = match &mut self.kind {
            BorderKind::Component => Err(StyleError::unknown_style(key)),
            BorderKind::Button(button) => button_table().apply(button, key, value.clone()),
            BorderKind::Text(text) => text_table().apply(text, key, value.clone()),
        };
        match result {
            Err(StyleError::UnknownStyle { .. }) => base_table().apply(self, key, value),
            result => result,
        }
    }

    fn styleable_infos(&self) -> Result<StyleableInfos> {
        let mut infos = base_table().infos()?;
        match &self.kind {
            BorderKind::Component => {}
            BorderKind::Button(_) => button_table().put_infos(&mut infos, "")?,
            BorderKind::Text(_) => text_table().put_infos(&mut infos, "")?,
        }
        Ok(infos)
    }

    fn styleable_value(&self, key: &str) -> Option<StyleValue> {
        let value = match &self.kind {
            BorderKind::Component => None,
            BorderKind::Button(button) => button_table().value(button, key),
            BorderKind::Text(text) => text_table().value(text, key),
        };
        value.or_else(|| base_table().value(self, key))
    }

    fn affects_layout(&self, key: &str) -> bool {
        base_table().affects_layout(key) || button_table().affects_layout(key)
    }
}
