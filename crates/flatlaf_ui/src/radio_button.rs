//! Radio button and check box delegate
//!
//! Keys starting with `icon.` are routed to the check box or radio icon.
//! The icon is shared with all other radio buttons (or check boxes) until
//! the first `icon.` key is applied.

use std::sync::{Arc, OnceLock};

use flatlaf_core::Color;
use flatlaf_style::{
    Result, StyleChanges, StyleError, StyleMap, StyleValue, Styleable, StyleableInfos, StyleableTable, UiDefaults,
};
use tracing::debug;

use crate::component::Component;
use crate::icons::CheckBoxIcon;
use crate::ui::{self, ComponentUi, Decorations};

const ICON_PREFIX: &str = "icon.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckKind {
    CheckBox,
    RadioButton,
}

impl CheckKind {
    fn prefix(self) -> &'static str {
        match self {
            CheckKind::CheckBox => "CheckBox.",
            CheckKind::RadioButton => "RadioButton.",
        }
    }
}

#[derive(Clone, Debug)]
pub struct RadioButtonUi {
    pub kind: CheckKind,
    /// Unscaled; the component gets the scaled value
    pub icon_text_gap: i32,
    pub disabled_text: Option<Color>,
    icon: Arc<CheckBoxIcon>,
    old_style_values: Option<StyleMap>,
}

impl RadioButtonUi {
    pub fn new(decorations: &Decorations) -> Self {
        Self::with_kind(CheckKind::RadioButton, decorations)
    }

    pub fn check_box(decorations: &Decorations) -> Self {
        Self::with_kind(CheckKind::CheckBox, decorations)
    }

    fn with_kind(kind: CheckKind, decorations: &Decorations) -> Self {
        let icon = match kind {
            CheckKind::CheckBox => &decorations.check_box_icon,
            CheckKind::RadioButton => &decorations.radio_icon,
        };
        Self {
            kind,
            icon_text_gap: 4,
            disabled_text: None,
            icon: Arc::clone(icon),
            old_style_values: None,
        }
    }

    pub fn icon(&self) -> &CheckBoxIcon {
        &self.icon
    }

    /// Whether the icon is still shared with other delegates
    pub fn is_icon_shared(&self) -> bool {
        Arc::strong_count(&self.icon) > 1
    }
}

fn table() -> &'static StyleableTable<RadioButtonUi> {
    static TABLE: OnceLock<StyleableTable<RadioButtonUi>> = OnceLock::new();
    TABLE.get_or_init(|| {
        StyleableTable::new([
            int_property!(RadioButtonUi, "iconTextGap", icon_text_gap).layout(),
            color_property!(RadioButtonUi, "disabledText", disabled_text),
        ])
    })
}

impl Styleable for RadioButtonUi {
    fn apply_style_property(&mut self, key: &str, value: StyleValue) -> Result<StyleValue> {
        let Some(icon_key) = key.strip_prefix(ICON_PREFIX) else {
            return table().apply(self, key, value);
        };

        if self.is_icon_shared() {
            debug!(key = %key, "cloning shared icon");
        }
        match Arc::make_mut(&mut self.icon).apply_style_property(icon_key, value) {
            Err(StyleError::UnknownStyle { .. }) => Err(StyleError::unknown_style(key)),
            result => result,
        }
    }

    fn styleable_infos(&self) -> Result<StyleableInfos> {
        let mut infos = table().infos()?;
        infos.put_all_prefixed(ICON_PREFIX, &self.icon.styleable_infos()?)?;
        Ok(infos)
    }

    fn styleable_value(&self, key: &str) -> Option<StyleValue> {
        match key.strip_prefix(ICON_PREFIX) {
            Some(icon_key) => self.icon.styleable_value(icon_key),
            None => table().value(self, key),
        }
    }

    fn affects_layout(&self, key: &str) -> bool {
        match key.strip_prefix(ICON_PREFIX) {
            Some(icon_key) => self.icon.affects_layout(icon_key),
            None => table().affects_layout(key),
        }
    }
}

impl ComponentUi for RadioButtonUi {
    fn style_type(&self) -> &'static str {
        match self.kind {
            CheckKind::CheckBox => "CheckBox",
            CheckKind::RadioButton => "RadioButton",
        }
    }

    fn install_defaults(&mut self, c: &mut Component, defaults: &UiDefaults) {
        let prefix = self.kind.prefix();
        let key = |name: &str| format!("{}{}", prefix, name);

        self.icon_text_gap = defaults.get_int(&key("iconTextGap")).unwrap_or(4);
        self.disabled_text = defaults.get_color(&key("disabledText"));

        c.install_background(defaults.get_color(&key("background")));
        c.install_foreground(defaults.get_color(&key("foreground")));
        c.install_margin(defaults.get_insets(&key("margin")));
        c.icon_text_gap = defaults.scale().scale(self.icon_text_gap);
        c.opaque = false;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconKind;
    use pretty_assertions::assert_eq;

    fn defaults() -> UiDefaults {
        let mut defaults = UiDefaults::new();
        defaults.put("CheckBox.icon.checkmarkColor", Color::BLUE);
        defaults.put("RadioButton.disabledText", Color::BLACK);
        defaults
    }

    #[test]
    fn test_icon_keys_clone_shared_icon() {
        let defaults = defaults();
        let decorations = Decorations::from_defaults(&defaults);
        let mut ui = RadioButtonUi::new(&decorations);
        let mut c = Component::new().with_style("icon.checkmarkColor: #f00; icon.centerDiameter: 5");
        ui.install_ui(&mut c, &defaults);

        assert!(!ui.is_icon_shared());
        assert_eq!(ui.icon().checkmark_color, Some(Color::RED));
        assert_eq!(ui.icon().kind, IconKind::Radio { center_diameter: 5.0 });
        assert_eq!(decorations.radio_icon.checkmark_color, Some(Color::BLUE));
    }

    #[test]
    fn test_icon_infos_and_values() {
        let defaults = defaults();
        let decorations = Decorations::from_defaults(&defaults);
        let ui = RadioButtonUi::check_box(&decorations);
        let c = Component::new();

        let infos = ui.styleable_infos_for(&c).unwrap();
        assert!(infos.contains_key("iconTextGap"));
        assert!(infos.contains_key("icon.checkmarkColor"));
        assert!(!infos.contains_key("icon.centerDiameter"));
        assert_eq!(
            ui.styleable_value_for(&c, "icon.checkmarkColor"),
            Some(StyleValue::Color(Color::BLUE))
        );
    }

    #[test]
    fn test_unknown_icon_key() {
        let defaults = defaults();
        let decorations = Decorations::from_defaults(&defaults);
        let mut ui = RadioButtonUi::check_box(&decorations);
        let mut c = Component::new().with_style("icon.nope: 1");
        ui.install_defaults(&mut c, &defaults);

        let err = ui.apply_style(&mut c, &defaults).unwrap_err();
        assert_eq!(err.to_string(), "unknown style 'icon.nope'");
    }
}
