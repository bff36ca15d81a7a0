//! Check box and radio button icons
//!
//! Both icons read the `CheckBox.icon.*` defaults. A theme may select an
//! icon style with `CheckBox.icon.style`; keys of that style
//! (`CheckBox.icon[filled].background`) take precedence over the plain
//! keys. The radio icon adds the diameter of its center dot.

use std::sync::OnceLock;

use flatlaf_core::{Color, UiScale};
use flatlaf_style::{coerce, Result, StyleValue, Styleable, StyleableInfos, StyleableTable, UiDefaults, ValueType};

/// Unscaled icon size without focus border
pub const ICON_SIZE: i32 = 15;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IconKind {
    CheckBox,
    Radio { center_diameter: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CheckBoxIcon {
    pub kind: IconKind,

    pub focus_width: i32,
    pub focus_color: Option<Color>,
    pub border_width: f32,
    pub arc: i32,

    pub border_color: Option<Color>,
    pub background: Option<Color>,
    pub selected_border_color: Option<Color>,
    pub selected_background: Option<Color>,
    pub checkmark_color: Option<Color>,

    pub disabled_border_color: Option<Color>,
    pub disabled_background: Option<Color>,
    pub disabled_checkmark_color: Option<Color>,

    pub focused_border_color: Option<Color>,
    pub focused_background: Option<Color>,
    pub selected_focused_border_color: Option<Color>,
    pub selected_focused_background: Option<Color>,
    pub selected_focused_checkmark_color: Option<Color>,

    pub hover_border_color: Option<Color>,
    pub hover_background: Option<Color>,
    pub selected_hover_background: Option<Color>,

    pub pressed_background: Option<Color>,
    pub selected_pressed_background: Option<Color>,
}

/// Reads icon defaults, preferring keys of the selected icon style
struct IconDefaults<'a> {
    defaults: &'a UiDefaults,
    style: Option<String>,
}

impl IconDefaults<'_> {
    fn styled_key(&self, key: &str) -> Option<String> {
        let style = self.style.as_deref()?;
        Some(key.replacen(".icon.", &format!(".icon[{}].", style), 1))
    }

    fn color(&self, key: &str) -> Option<Color> {
        self.styled_key(key)
            .and_then(|styled| self.defaults.get_color(&styled))
            .or_else(|| self.defaults.get_color(key))
    }

    fn int(&self, key: &str, default: i32) -> i32 {
        self.styled_key(key)
            .and_then(|styled| self.defaults.get_int(&styled))
            .or_else(|| self.defaults.get_int(key))
            .unwrap_or(default)
    }

    fn float(&self, key: &str, default: f32) -> f32 {
        self.styled_key(key)
            .and_then(|styled| self.defaults.get_float(&styled))
            .or_else(|| self.defaults.get_float(key))
            .unwrap_or(default)
    }
}

impl CheckBoxIcon {
    pub fn check_box(defaults: &UiDefaults) -> Self {
        Self::with_kind(IconKind::CheckBox, defaults)
    }

    pub fn radio(defaults: &UiDefaults) -> Self {
        let d = IconDefaults {
            defaults,
            style: defaults.get_string("CheckBox.icon.style"),
        };
        let center_diameter = d.float("RadioButton.icon.centerDiameter", 8.0);
        Self::with_kind(IconKind::Radio { center_diameter }, defaults)
    }

    fn with_kind(kind: IconKind, defaults: &UiDefaults) -> Self {
        let d = IconDefaults {
            defaults,
            style: defaults.get_string("CheckBox.icon.style"),
        };
        let focus_width = defaults.get_int("Component.focusWidth").unwrap_or(0);
        let border_width = defaults.get_float("Component.borderWidth").unwrap_or(1.0);

        Self {
            kind,
            focus_width: d.int("CheckBox.icon.focusWidth", focus_width),
            focus_color: defaults
                .get_color("CheckBox.icon.focusColor")
                .or_else(|| defaults.get_color("Component.focusColor")),
            border_width: d.float("CheckBox.icon.borderWidth", border_width),
            arc: defaults.get_int("CheckBox.arc").unwrap_or(2),

            border_color: d.color("CheckBox.icon.borderColor"),
            background: d.color("CheckBox.icon.background"),
            selected_border_color: d.color("CheckBox.icon.selectedBorderColor"),
            selected_background: d.color("CheckBox.icon.selectedBackground"),
            checkmark_color: d.color("CheckBox.icon.checkmarkColor"),

            disabled_border_color: d.color("CheckBox.icon.disabledBorderColor"),
            disabled_background: d.color("CheckBox.icon.disabledBackground"),
            disabled_checkmark_color: d.color("CheckBox.icon.disabledCheckmarkColor"),

            focused_border_color: d.color("CheckBox.icon.focusedBorderColor"),
            focused_background: d.color("CheckBox.icon.focusedBackground"),
            selected_focused_border_color: d.color("CheckBox.icon.selectedFocusedBorderColor"),
            selected_focused_background: d.color("CheckBox.icon.selectedFocusedBackground"),
            selected_focused_checkmark_color: d.color("CheckBox.icon.selectedFocusedCheckmarkColor"),

            hover_border_color: d.color("CheckBox.icon.hoverBorderColor"),
            hover_background: d.color("CheckBox.icon.hoverBackground"),
            selected_hover_background: d.color("CheckBox.icon.selectedHoverBackground"),

            pressed_background: d.color("CheckBox.icon.pressedBackground"),
            selected_pressed_background: d.color("CheckBox.icon.selectedPressedBackground"),
        }
    }

    /// Width and height in device pixels, including the focus border
    pub fn size(&self, scale: UiScale) -> i32 {
        scale.scale(ICON_SIZE + self.focus_width * 2)
    }

    /// Border color for the given state; selected and focused fall back
    /// to the focused color
    pub fn border_color_for(&self, enabled: bool, selected: bool, focused: bool) -> Option<Color> {
        match (enabled, selected, focused) {
            (false, ..) => self.disabled_border_color,
            (true, true, true) => self.selected_focused_border_color.or(self.focused_border_color),
            (true, true, false) => self.selected_border_color,
            (true, false, true) => self.focused_border_color,
            (true, false, false) => self.border_color,
        }
    }
}

// ============================================================================
// Styleable properties
// ============================================================================

fn table() -> &'static StyleableTable<CheckBoxIcon> {
    static TABLE: OnceLock<StyleableTable<CheckBoxIcon>> = OnceLock::new();
    TABLE.get_or_init(|| {
        StyleableTable::new([
            int_property!(CheckBoxIcon, "focusWidth", focus_width).layout(),
            color_property!(CheckBoxIcon, "focusColor", focus_color),
            float_property!(CheckBoxIcon, "borderWidth", border_width),
            int_property!(CheckBoxIcon, "arc", arc),
            // enabled
            color_property!(CheckBoxIcon, "borderColor", border_color),
            color_property!(CheckBoxIcon, "background", background),
            color_property!(CheckBoxIcon, "selectedBorderColor", selected_border_color),
            color_property!(CheckBoxIcon, "selectedBackground", selected_background),
            color_property!(CheckBoxIcon, "checkmarkColor", checkmark_color),
            // disabled
            color_property!(CheckBoxIcon, "disabledBorderColor", disabled_border_color),
            color_property!(CheckBoxIcon, "disabledBackground", disabled_background),
            color_property!(CheckBoxIcon, "disabledCheckmarkColor", disabled_checkmark_color),
            // focused
            color_property!(CheckBoxIcon, "focusedBorderColor", focused_border_color),
            color_property!(CheckBoxIcon, "focusedBackground", focused_background),
            color_property!(CheckBoxIcon, "selectedFocusedBorderColor", selected_focused_border_color),
            color_property!(CheckBoxIcon, "selectedFocusedBackground", selected_focused_background),
            color_property!(CheckBoxIcon, "selectedFocusedCheckmarkColor", selected_focused_checkmark_color),
            // hover
            color_property!(CheckBoxIcon, "hoverBorderColor", hover_border_color),
            color_property!(CheckBoxIcon, "hoverBackground", hover_background),
            color_property!(CheckBoxIcon, "selectedHoverBackground", selected_hover_background),
            // pressed
            color_property!(CheckBoxIcon, "pressedBackground", pressed_background),
            color_property!(CheckBoxIcon, "selectedPressedBackground", selected_pressed_background),
        ])
    })
}

const CENTER_DIAMETER: &str = "centerDiameter";

impl Styleable for CheckBoxIcon {
    fn apply_style_property(&mut self, key: &str, value: StyleValue) -> Result<StyleValue> {
        if let IconKind::Radio { center_diameter } = &mut self.kind {
            if key == CENTER_DIAMETER {
                let value = coerce(key, ValueType::Float, value)?;
                let old = StyleValue::Float(*center_diameter);
                *center_diameter = value.as_float().unwrap_or_default();
                return Ok(old);
            }
        }
        table().apply(self, key, value)
    }

    fn styleable_infos(&self) -> Result<StyleableInfos> {
        let mut infos = table().infos()?;
        if let IconKind::Radio { .. } = self.kind {
            infos.put(CENTER_DIAMETER, ValueType::Float)?;
        }
        Ok(infos)
    }

    fn styleable_value(&self, key: &str) -> Option<StyleValue> {
        match self.kind {
            IconKind::Radio { center_diameter } if key == CENTER_DIAMETER => Some(center_diameter.into()),
            _ => table().value(self, key),
        }
    }

    fn affects_layout(&self, key: &str) -> bool {
        table().affects_layout(key)
    }
}
