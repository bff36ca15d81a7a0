//! Text field delegate
//!
//! Besides the styleable properties, the delegate keeps the component
//! background in sync with its state: disabled wins over non-editable,
//! which wins over the normal background. A background the application
//! set, or one the delegate does not know, is never replaced.

use std::sync::{Arc, OnceLock};

use flatlaf_core::Color;
use flatlaf_style::{
    InstanceSpec, Result, StyleChanges, StyleError, StyleMap, StyleValue, Styleable, StyleableInfos,
    StyleableProperty, StyleableTable, UiDefaults, ValueType,
};
use tracing::trace;

use crate::border::FlatBorder;
use crate::component::{Assigned, Component, ComponentProperty};
use crate::ui::{self, ComponentUi, Decorations};

#[derive(Clone, Debug)]
pub struct TextFieldUi {
    /// Unscaled
    pub minimum_width: i32,
    pub disabled_background: Option<Color>,
    pub inactive_background: Option<Color>,
    pub placeholder_foreground: Option<Color>,
    pub focused_background: Option<Color>,
    /// Unscaled gap between the leading/trailing icons and the text
    pub icon_text_gap: i32,
    pub leading_icon: Option<InstanceSpec>,
    pub trailing_icon: Option<InstanceSpec>,
    pub show_clear_button: bool,

    /// `TextField.background`, not styleable
    background: Option<Color>,
    border: Arc<FlatBorder>,
    old_style_values: Option<StyleMap>,
}

impl TextFieldUi {
    pub fn new(decorations: &Decorations) -> Self {
        Self {
            minimum_width: 0,
            disabled_background: None,
            inactive_background: None,
            placeholder_foreground: None,
            focused_background: None,
            icon_text_gap: 4,
            leading_icon: None,
            trailing_icon: None,
            show_clear_button: false,
            background: None,
            border: Arc::clone(&decorations.text_border),
            old_style_values: None,
        }
    }

    /// Pick the background for the component state.
    ///
    /// `old_disabled` and `old_inactive` are the backgrounds from before the
    /// last style pass, so a background installed by a removed style is
    /// still recognized.
    fn update_background(&self, c: &mut Component, old_disabled: Option<Color>, old_inactive: Option<Color>) {
        let Some(current) = c.background else {
            return;
        };
        if !current.is_from_defaults() {
            return;
        }

        let current = Some(current.value);
        let known = [
            self.background,
            self.disabled_background,
            self.inactive_background,
            old_disabled,
            old_inactive,
        ];
        if !known.contains(&current) {
            return;
        }

        let background = if !c.enabled {
            self.disabled_background
        } else if !c.editable {
            self.inactive_background
        } else {
            self.background
        };
        if background != current {
            trace!(enabled = c.enabled, editable = c.editable, "update text field background");
            c.background = background.map(Assigned::defaults);
        }
    }
}

fn table() -> &'static StyleableTable<TextFieldUi> {
    static TABLE: OnceLock<StyleableTable<TextFieldUi>> = OnceLock::new();
    TABLE.get_or_init(|| {
        StyleableTable::new([
            int_property!(TextFieldUi, "minimumWidth", minimum_width).layout(),
            color_property!(TextFieldUi, "disabledBackground", disabled_background),
            color_property!(TextFieldUi, "inactiveBackground", inactive_background),
            color_property!(TextFieldUi, "placeholderForeground", placeholder_foreground),
            color_property!(TextFieldUi, "focusedBackground", focused_background),
            int_property!(TextFieldUi, "iconTextGap", icon_text_gap).layout(),
            StyleableProperty::new(
                "leadingIcon",
                ValueType::Icon,
                |t: &TextFieldUi| instance_value(&t.leading_icon),
                |t: &mut TextFieldUi, v| {
                    t.leading_icon = to_instance("leadingIcon", v)?;
                    Ok(())
                },
            )
            .layout(),
            StyleableProperty::new(
                "trailingIcon",
                ValueType::Icon,
                |t: &TextFieldUi| instance_value(&t.trailing_icon),
                |t: &mut TextFieldUi, v| {
                    t.trailing_icon = to_instance("trailingIcon", v)?;
                    Ok(())
                },
            )
            .layout(),
            bool_property!(TextFieldUi, "showClearButton", show_clear_button).layout(),
        ])
    })
}

fn instance_value(icon: &Option<InstanceSpec>) -> StyleValue {
    icon.clone().map_or(StyleValue::Null, StyleValue::Instance)
}

fn to_instance(key: &str, value: StyleValue) -> Result<Option<InstanceSpec>> {
    match value {
        StyleValue::Instance(instance) => Ok(Some(instance)),
        StyleValue::Null => Ok(None),
        other => Err(StyleError::TypeMismatch {
            key: key.to_string(),
            expected: ValueType::Icon,
            actual: other.value_type(),
        }),
    }
}

impl Styleable for TextFieldUi {
    fn apply_style_property(&mut self, key: &str, value: StyleValue) -> Result<StyleValue> {
        table().apply(self, key, value)
    }

    fn styleable_infos(&self) -> Result<StyleableInfos> {
        table().infos()
    }

    fn styleable_value(&self, key: &str) -> Option<StyleValue> {
        table().value(self, key)
    }

    fn affects_layout(&self, key: &str) -> bool {
        table().affects_layout(key)
    }
}

impl ComponentUi for TextFieldUi {
    fn style_type(&self) -> &'static str {
        "TextField"
    }

    fn install_defaults(&mut self, c: &mut Component, defaults: &UiDefaults) {
        self.minimum_width = defaults.get_int("Component.minimumWidth").unwrap_or(0);
        self.background = defaults.get_color("TextField.background");
        self.disabled_background = defaults.get_color("TextField.disabledBackground");
        self.inactive_background = defaults.get_color("TextField.inactiveBackground");
        self.placeholder_foreground = defaults.get_color("TextField.placeholderForeground");
        self.focused_background = defaults.get_color("TextField.focusedBackground");
        self.icon_text_gap = defaults.get_int("TextField.iconTextGap").unwrap_or(4);
        self.show_clear_button = defaults.get_bool("TextField.showClearButton").unwrap_or(false);

        c.install_background(self.background);
        c.install_foreground(defaults.get_color("TextField.foreground"));
        c.install_margin(defaults.get_insets("TextField.margin"));
        c.opaque = false;
        c.install_border(&self.border);
        self.old_style_values = None;

        self.update_background(c, None, None);
    }

    fn apply_style(&mut self, c: &mut Component, defaults: &UiDefaults) -> Result<StyleChanges> {
        let old_disabled = self.disabled_background;
        let old_inactive = self.inactive_background;

        let mut old_values = self.old_style_values.take();
        let result = ui::apply_chain(self, &mut old_values, c, "TextField", defaults);
        self.old_style_values = old_values;
        let changes = result?;

        self.update_background(c, old_disabled, old_inactive);
        Ok(changes)
    }

    fn styleable_infos_for(&self, c: &Component) -> Result<StyleableInfos> {
        ui::chain_infos(self, c)
    }

    fn styleable_value_for(&self, c: &Component, key: &str) -> Option<StyleValue> {
        ui::chain_value(self, c, key)
    }

    fn property_change(&mut self, c: &mut Component, property: ComponentProperty, defaults: &UiDefaults) {
        match property {
            ComponentProperty::Style | ComponentProperty::StyleClass => self.install_style(c, defaults),
            ComponentProperty::Enabled | ComponentProperty::Editable => self.update_background(c, None, None),
        }
    }
}
