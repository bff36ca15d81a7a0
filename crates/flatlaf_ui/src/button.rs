//! Button and toggle button delegate

use std::sync::{Arc, OnceLock};

use flatlaf_core::Color;
use flatlaf_style::{
    Result, StyleChanges, StyleError, StyleMap, StyleValue, Styleable, StyleableInfos, StyleableTable, UiDefaults,
};

use crate::border::FlatBorder;
use crate::component::Component;
use crate::ui::{self, ComponentUi, Decorations};

#[derive(Clone, Debug, PartialEq)]
pub enum ButtonKind {
    Button,
    Toggle(ToggleProps),
}

impl ButtonKind {
    fn prefix(&self) -> &'static str {
        match self {
            ButtonKind::Button => "Button.",
            ButtonKind::Toggle(_) => "ToggleButton.",
        }
    }
}

/// Properties only toggle buttons have
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToggleProps {
    pub selected_background: Option<Color>,
    pub selected_foreground: Option<Color>,
    pub disabled_selected_background: Option<Color>,
    pub toolbar_selected_background: Option<Color>,
}

#[derive(Clone, Debug)]
pub struct ButtonUi {
    pub kind: ButtonKind,

    /// Unscaled
    pub minimum_width: i32,
    /// Unscaled; the component gets the scaled value
    pub icon_text_gap: i32,

    pub focused_background: Option<Color>,
    pub hover_background: Option<Color>,
    pub pressed_background: Option<Color>,
    pub disabled_text: Option<Color>,

    pub default_background: Option<Color>,
    pub default_foreground: Option<Color>,
    pub default_hover_background: Option<Color>,
    pub default_pressed_background: Option<Color>,
    pub default_bold_text: bool,

    pub paint_shadow: bool,
    pub shadow_width: i32,
    pub shadow_color: Option<Color>,
    pub default_shadow_color: Option<Color>,

    pub toolbar_hover_background: Option<Color>,
    pub toolbar_pressed_background: Option<Color>,

    border: Arc<FlatBorder>,
    old_style_values: Option<StyleMap>,
}

impl ButtonUi {
    pub fn new(decorations: &Decorations) -> Self {
        Self::with_kind(ButtonKind::Button, decorations)
    }

    pub fn toggle(decorations: &Decorations) -> Self {
        Self::with_kind(ButtonKind::Toggle(ToggleProps::default()), decorations)
    }

    fn with_kind(kind: ButtonKind, decorations: &Decorations) -> Self {
        Self {
            kind,
            minimum_width: 0,
            icon_text_gap: 4,
            focused_background: None,
            hover_background: None,
            pressed_background: None,
            disabled_text: None,
            default_background: None,
            default_foreground: None,
            default_hover_background: None,
            default_pressed_background: None,
            default_bold_text: false,
            paint_shadow: false,
            shadow_width: 0,
            shadow_color: None,
            default_shadow_color: None,
            toolbar_hover_background: None,
            toolbar_pressed_background: None,
            border: Arc::clone(&decorations.button_border),
            old_style_values: None,
        }
    }

    pub fn is_toggle(&self) -> bool {
        matches!(self.kind, ButtonKind::Toggle(_))
    }
}

// ============================================================================
// Styleable properties
// ============================================================================

fn table() -> &'static StyleableTable<ButtonUi> {
    static TABLE: OnceLock<StyleableTable<ButtonUi>> = OnceLock::new();
    TABLE.get_or_init(|| {
        StyleableTable::new([
            int_property!(ButtonUi, "minimumWidth", minimum_width).layout(),
            int_property!(ButtonUi, "iconTextGap", icon_text_gap).layout(),
            color_property!(ButtonUi, "focusedBackground", focused_background),
            color_property!(ButtonUi, "hoverBackground", hover_background),
            color_property!(ButtonUi, "pressedBackground", pressed_background),
            color_property!(ButtonUi, "disabledText", disabled_text),
            color_property!(ButtonUi, "default.background", default_background),
            color_property!(ButtonUi, "default.foreground", default_foreground),
            color_property!(ButtonUi, "default.hoverBackground", default_hover_background),
            color_property!(ButtonUi, "default.pressedBackground", default_pressed_background),
            bool_property!(ButtonUi, "default.boldText", default_bold_text),
            bool_property!(ButtonUi, "paintShadow", paint_shadow),
            int_property!(ButtonUi, "shadowWidth", shadow_width),
            color_property!(ButtonUi, "shadowColor", shadow_color),
            color_property!(ButtonUi, "default.shadowColor", default_shadow_color),
            color_property!(ButtonUi, "toolbar.hoverBackground", toolbar_hover_background),
            color_property!(ButtonUi, "toolbar.pressedBackground", toolbar_pressed_background),
        ])
    })
}

fn toggle_table() -> &'static StyleableTable<ToggleProps> {
    static TABLE: OnceLock<StyleableTable<ToggleProps>> = OnceLock::new();
    TABLE.get_or_init(|| {
        StyleableTable::new([
            color_property!(ToggleProps, "selectedBackground", selected_background),
            color_property!(ToggleProps, "selectedForeground", selected_foreground),
            color_property!(ToggleProps, "disabledSelectedBackground", disabled_selected_background),
            color_property!(ToggleProps, "toolbar.selectedBackground", toolbar_selected_background),
        ])
    })
}

impl Styleable for ButtonUi {
    fn apply_style_property(&mut self, key: &str, value: StyleValue) -> Result<StyleValue> {
        if let ButtonKind::Toggle(toggle) = &mut self.kind {
            match toggle_table().apply(toggle, key, value.clone()) {
                Err(StyleError::UnknownStyle { .. }) => {}
                result => return result,
            }
        }
        table().apply(self, key, value)
    }

    fn styleable_infos(&self) -> Result<StyleableInfos> {
        let mut infos = table().infos()?;
        if let ButtonKind::Toggle(_) = self.kind {
            toggle_table().put_infos(&mut infos, "")?;
        }
        Ok(infos)
    }

    fn styleable_value(&self, key: &str) -> Option<StyleValue> {
        let toggle = match &self.kind {
            ButtonKind::Toggle(toggle) => toggle_table().value(toggle, key),
            ButtonKind::Button => None,
        };
        toggle.or_else(|| table().value(self, key))
    }

    fn affects_layout(&self, key: &str) -> bool {
        table().affects_layout(key)
    }
}

// ============================================================================
// Delegate
// ============================================================================

impl ComponentUi for ButtonUi {
    fn style_type(&self) -> &'static str {
        match self.kind {
            ButtonKind::Button => "Button",
            ButtonKind::Toggle(_) => "ToggleButton",
        }
    }

    fn install_defaults(&mut self, c: &mut Component, defaults: &UiDefaults) {
        let prefix = self.kind.prefix();
        let key = |name: &str| format!("{}{}", prefix, name);
        let color = |name: &str| defaults.get_color(&key(name));

        self.minimum_width = defaults.get_int(&key("minimumWidth")).unwrap_or(0);
        self.icon_text_gap = defaults.get_int(&key("iconTextGap")).unwrap_or(4);

        self.focused_background = color("focusedBackground");
        self.hover_background = color("hoverBackground");
        self.pressed_background = color("pressedBackground");
        self.disabled_text = color("disabledText");

        self.default_background = color("default.background");
        self.default_foreground = color("default.foreground");
        self.default_hover_background = color("default.hoverBackground");
        self.default_pressed_background = color("default.pressedBackground");
        self.default_bold_text = defaults.get_bool(&key("default.boldText")).unwrap_or(false);

        self.paint_shadow = defaults.get_bool(&key("paintShadow")).unwrap_or(false);
        self.shadow_width = if self.paint_shadow {
            defaults.get_int(&key("shadowWidth")).unwrap_or(0)
        } else {
            0
        };
        self.shadow_color = color("shadowColor");
        self.default_shadow_color = color("default.shadowColor");

        self.toolbar_hover_background = color("toolbar.hoverBackground");
        self.toolbar_pressed_background = color("toolbar.pressedBackground");

        if let ButtonKind::Toggle(toggle) = &mut self.kind {
            toggle.selected_background = color("selectedBackground");
            toggle.selected_foreground = color("selectedForeground");
            toggle.disabled_selected_background = color("disabledSelectedBackground");
            toggle.toolbar_selected_background = color("toolbar.selectedBackground");
        }

        c.install_background(color("background"));
        c.install_foreground(color("foreground"));
        c.install_margin(defaults.get_insets(&key("margin")));
        c.icon_text_gap = defaults.scale().scale(self.icon_text_gap);
        c.opaque = false;
        c.install_border(&self.border);
        self.old_style_values = None;
    }

    fn apply_style(&mut self, c: &mut Component, defaults: &UiDefaults) -> Result<StyleChanges> {
        let style_type = self.style_type();
        let mut old_values = self.old_style_values.take();
        let result = ui::apply_chain(self, &mut old_values, c, style_type, defaults);
        self.old_style_values = old_values;

        let changes = result?;
        if changes.changed.iter().any(|key| key == "iconTextGap") {
            c.icon_text_gap = defaults.scale().scale(self.icon_text_gap);
        }
        Ok(changes)
    }

    fn styleable_infos_for(&self, c: &Component) -> Result<StyleableInfos> {
        ui::chain_infos(self, c)
    }

    fn styleable_value_for(&self, c: &Component, key: &str) -> Option<StyleValue> {
        ui::chain_value(self, c, key)
    }
}
