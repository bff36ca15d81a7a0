//! UI delegates
//!
//! A delegate installs defaults on a [`Component`] and applies the
//! component's effective style to itself, its border and the component.
//! Keys are tried in that order; the first target that knows a key takes
//! the value.

use std::sync::Arc;

use flatlaf_style::{
    apply_style, resolved_style, Result, StyleChanges, StyleError, StyleMap, StyleValue, Styleable, StyleableInfos,
    UiDefaults,
};
use tracing::{debug, error};

use crate::border::FlatBorder;
use crate::component::{Component, ComponentBorder, ComponentProperty};
use crate::icons::CheckBoxIcon;

// ============================================================================
// Shared decorations
// ============================================================================

/// Borders and icons created once from UI defaults and shared by all
/// components until a style changes them
#[derive(Clone, Debug)]
pub struct Decorations {
    pub button_border: Arc<FlatBorder>,
    pub text_border: Arc<FlatBorder>,
    pub check_box_icon: Arc<CheckBoxIcon>,
    pub radio_icon: Arc<CheckBoxIcon>,
}

impl Decorations {
    pub fn from_defaults(defaults: &UiDefaults) -> Self {
        Self {
            button_border: Arc::new(FlatBorder::button(defaults)),
            text_border: Arc::new(FlatBorder::text(defaults)),
            check_box_icon: Arc::new(CheckBoxIcon::check_box(defaults)),
            radio_icon: Arc::new(CheckBoxIcon::radio(defaults)),
        }
    }
}

// ============================================================================
// Delegate trait
// ============================================================================

pub trait ComponentUi {
    /// Type name used for `[style]Type` and `[style]Type.class` lookups
    fn style_type(&self) -> &'static str;

    /// Seed delegate and component properties from UI defaults
    fn install_defaults(&mut self, c: &mut Component, defaults: &UiDefaults);

    /// Restore the values changed by the previous style, then apply the
    /// component's current effective style
    fn apply_style(&mut self, c: &mut Component, defaults: &UiDefaults) -> Result<StyleChanges>;

    /// Styleable keys of the delegate and its border
    fn styleable_infos_for(&self, c: &Component) -> Result<StyleableInfos>;

    /// Current value of `key` on the delegate, its border or the component
    fn styleable_value_for(&self, c: &Component, key: &str) -> Option<StyleValue>;

    /// Like [`ComponentUi::apply_style`], but failures are logged
    fn install_style(&mut self, c: &mut Component, defaults: &UiDefaults) {
        if let Err(err) = self.apply_style(c, defaults) {
            error!(ui = self.style_type(), error = %err, "failed to apply style");
        }
    }

    fn install_ui(&mut self, c: &mut Component, defaults: &UiDefaults) {
        self.install_defaults(c, defaults);
        self.install_style(c, defaults);
    }

    /// Called after a component property changed
    fn property_change(&mut self, c: &mut Component, property: ComponentProperty, defaults: &UiDefaults) {
        match property {
            ComponentProperty::Style | ComponentProperty::StyleClass => self.install_style(c, defaults),
            ComponentProperty::Enabled | ComponentProperty::Editable => {}
        }
    }
}

// ============================================================================
// Style chain
// ============================================================================

/// Delegate, border and component as one style target
struct StyleChain<'a, D: ?Sized> {
    delegate: &'a mut D,
    component: &'a mut Component,
}

impl<D: Styleable + ?Sized> Styleable for StyleChain<'_, D> {
    fn apply_style_property(&mut self, key: &str, value: StyleValue) -> Result<StyleValue> {
        match self.delegate.apply_style_property(key, value.clone()) {
            Err(StyleError::UnknownStyle { .. }) => {}
            result => return result,
        }

        if let Some(ComponentBorder::Flat(border)) = &mut self.component.border {
            if border.styleable_value(key).is_some() {
                if Arc::strong_count(border) > 1 {
                    debug!(key = %key, "cloning shared border");
                }
                return Arc::make_mut(border).apply_style_property(key, value);
            }
        }

        match self.component.apply_style_property(key, value) {
            Err(StyleError::UnknownStyle { .. }) => Err(StyleError::unknown_style(key)),
            result => result,
        }
    }

    fn styleable_infos(&self) -> Result<StyleableInfos> {
        chain_infos(&*self.delegate, self.component)
    }

    fn styleable_value(&self, key: &str) -> Option<StyleValue> {
        chain_value(&*self.delegate, self.component, key)
    }

    fn affects_layout(&self, key: &str) -> bool {
        self.delegate.affects_layout(key)
            || self.component.flat_border().is_some_and(|b| b.affects_layout(key))
            || self.component.affects_layout(key)
    }
}

/// Delegate keys followed by border keys
pub(crate) fn chain_infos<D: Styleable + ?Sized>(delegate: &D, c: &Component) -> Result<StyleableInfos> {
    let mut infos = delegate.styleable_infos()?;
    if let Some(border) = c.flat_border() {
        infos.put_all_prefixed("", &border.styleable_infos()?)?;
    }
    Ok(infos)
}

pub(crate) fn chain_value<D: Styleable + ?Sized>(delegate: &D, c: &Component, key: &str) -> Option<StyleValue> {
    delegate
        .styleable_value(key)
        .or_else(|| c.flat_border().and_then(|b| b.styleable_value(key)))
        .or_else(|| c.styleable_value(key))
}

/// Apply the effective style of `c` through the chain.
///
/// `old_values` is only replaced when the whole pass succeeded.
pub(crate) fn apply_chain<D: Styleable + ?Sized>(
    delegate: &mut D,
    old_values: &mut Option<StyleMap>,
    c: &mut Component,
    style_type: &str,
    defaults: &UiDefaults,
) -> Result<StyleChanges> {
    let style = resolved_style(c.style.clone(), c.style_class.as_ref(), style_type, defaults)?;
    let mut chain = StyleChain { delegate, component: c };
    let (new_old_values, changes) = apply_style(&mut chain, old_values.clone(), style.as_ref(), defaults)?;
    *old_values = new_old_values;
    Ok(changes)
}
