//! Reference and variable resolution
//!
//! Values may refer to other values: `$Button.background` refers to a
//! property (or a stored UI default) and `@accentColor` to a variable.
//! A [`Resolver`] turns such a reference into the raw text it stands for,
//! following chains until a non-reference value is reached.
//!
//! Two resolvers exist:
//! - [`PropertiesResolver`] while loading theme properties, where every
//!   value is still raw text
//! - [`DefaultsResolver`] at runtime, where values are already parsed and
//!   `$key` converts the stored value back to its literal form
//!
//! Both keep a set of references currently being resolved and fail with
//! [`StyleError::EndlessRecursion`] instead of recursing forever.

use std::cell::RefCell;

use rustc_hash::FxHashSet;

use flatlaf_core::Color;

use crate::defaults::UiDefaults;
use crate::error::{Result, StyleError};
use crate::value::StyleValue;

pub(crate) const PROPERTY_PREFIX: &str = "$";
pub(crate) const VARIABLE_PREFIX: &str = "@";
pub(crate) const OPTIONAL_PREFIX: &str = "?";

/// Resolves `$key` and `@variable` references to raw value text
pub trait Resolver {
    /// Resolve `value` if it is a reference, otherwise return it trimmed
    fn resolve(&self, value: &str) -> Result<String>;

    /// Color provided by the platform for `systemColor(name)`
    fn system_color(&self, _name: &str) -> Option<Color> {
        None
    }
}

/// Resolver that only trims; references are left as they are
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopResolver;

impl Resolver for NoopResolver {
    fn resolve(&self, value: &str) -> Result<String> {
        Ok(value.trim().to_string())
    }
}

/// Removes its reference from the in-progress set when dropped
struct InProgress<'a> {
    set: &'a RefCell<FxHashSet<String>>,
    key: String,
}

impl<'a> InProgress<'a> {
    fn enter(set: &'a RefCell<FxHashSet<String>>, key: &str) -> Result<Self> {
        if !set.borrow_mut().insert(key.to_string()) {
            return Err(StyleError::EndlessRecursion(format!(
                "variable or property '{}'",
                key
            )));
        }
        Ok(Self {
            set,
            key: key.to_string(),
        })
    }
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.set.borrow_mut().remove(&self.key);
    }
}

/// Split `$key`, `$?key` and `@var` into (lookup key, optional)
fn split_reference(value: &str) -> Option<(&str, bool)> {
    let key = if let Some(key) = value.strip_prefix(PROPERTY_PREFIX) {
        key
    } else if value.starts_with(VARIABLE_PREFIX) {
        value
    } else {
        return None;
    };

    match key.strip_prefix(OPTIONAL_PREFIX) {
        Some(key) => Some((key, true)),
        None => Some((key, false)),
    }
}

// ============================================================================
// Properties resolver
// ============================================================================

/// Resolves references against raw properties while a theme is loaded.
///
/// Variables are looked up with their `@` prefix (`@accent`), properties
/// without the `$` prefix. Keys missing from the properties fall back to
/// the variables and values already stored in the attached defaults.
pub struct PropertiesResolver<'a> {
    getter: Box<dyn Fn(&str) -> Option<String> + 'a>,
    defaults: Option<&'a UiDefaults>,
    in_progress: RefCell<FxHashSet<String>>,
}

impl<'a> PropertiesResolver<'a> {
    pub fn new(getter: impl Fn(&str) -> Option<String> + 'a) -> Self {
        Self {
            getter: Box::new(getter),
            defaults: None,
            in_progress: RefCell::new(FxHashSet::default()),
        }
    }

    /// Fall back to `defaults` for keys the properties do not contain
    pub fn with_defaults(mut self, defaults: &'a UiDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    fn lookup(&self, key: &str) -> Option<String> {
        if let Some(value) = (self.getter)(key) {
            return Some(value);
        }

        let defaults = self.defaults?;
        if key.starts_with(VARIABLE_PREFIX) {
            defaults.variable(key).map(str::to_string)
        } else {
            defaults.get(key).and_then(|value| value.to_literal())
        }
    }
}

impl Resolver for PropertiesResolver<'_> {
    fn resolve(&self, value: &str) -> Result<String> {
        let value = value.trim();
        let Some((key, optional)) = split_reference(value) else {
            return Ok(value.to_string());
        };

        let Some(new_value) = self.lookup(key) else {
            if optional {
                return Ok("null".to_string());
            }
            return Err(StyleError::NotFound(key.to_string()));
        };

        if new_value.trim() == value {
            return Err(StyleError::EndlessRecursion(format!(
                "variable or property '{}'",
                key
            )));
        }

        let _guard = InProgress::enter(&self.in_progress, key)?;
        self.resolve(&new_value)
    }

    fn system_color(&self, name: &str) -> Option<Color> {
        self.defaults.and_then(|defaults| defaults.system_color(name))
    }
}

// ============================================================================
// Defaults resolver
// ============================================================================

/// Resolves references against parsed UI defaults.
///
/// `@var` follows the variables table; `$key` converts the stored value to
/// its literal text (colors as `#rrggbb` or `#rrggbbaa`).
pub struct DefaultsResolver<'a> {
    defaults: &'a UiDefaults,
    in_progress: RefCell<FxHashSet<String>>,
}

impl<'a> DefaultsResolver<'a> {
    pub fn new(defaults: &'a UiDefaults) -> Self {
        Self {
            defaults,
            in_progress: RefCell::new(FxHashSet::default()),
        }
    }
}

impl Resolver for DefaultsResolver<'_> {
    fn resolve(&self, value: &str) -> Result<String> {
        let value = value.trim();

        if value.starts_with(VARIABLE_PREFIX) {
            let new_value = self
                .defaults
                .variable(value)
                .ok_or_else(|| StyleError::NotFound(value.to_string()))?
                .to_string();

            let _guard = InProgress::enter(&self.in_progress, value)?;
            return self.resolve(&new_value);
        }

        let Some((key, optional)) = split_reference(value) else {
            return Ok(value.to_string());
        };

        match self.defaults.get(key) {
            None | Some(StyleValue::Null) if optional => Ok("null".to_string()),
            None | Some(StyleValue::Null) => Err(StyleError::NotFound(key.to_string())),
            Some(stored) => stored.to_literal().ok_or_else(|| {
                StyleError::invalid(format!(
                    "property value type '{}' not supported in references",
                    stored.value_type()
                ))
            }),
        }
    }

    fn system_color(&self, name: &str) -> Option<Color> {
        self.defaults.system_color(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rustc_hash::FxHashMap;

    fn properties(entries: &[(&str, &str)]) -> FxHashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_properties_chain() {
        let props = properties(&[("@var1", "#f00"), ("@var2", "@var1"), ("Foo.color", "$Bar.color"), ("Bar.color", "@var2")]);
        let resolver = PropertiesResolver::new(|key| props.get(key).cloned());

        assert_eq!(resolver.resolve("@var2").unwrap(), "#f00");
        assert_eq!(resolver.resolve("  $Foo.color ").unwrap(), "#f00");
        assert_eq!(resolver.resolve("lighten(@var1,10%)").unwrap(), "lighten(@var1,10%)");
    }

    #[test]
    fn test_properties_missing_and_optional() {
        let props = properties(&[]);
        let resolver = PropertiesResolver::new(|key| props.get(key).cloned());

        let err = resolver.resolve("$Missing.key").unwrap_err();
        assert_eq!(err.to_string(), "variable or property 'Missing.key' not found");
        assert_eq!(resolver.resolve("$?Missing.key").unwrap(), "null");
    }

    #[test]
    fn test_properties_cycles() {
        let props = properties(&[("@self", "@self"), ("@a", "@b"), ("@b", "@a")]);
        let resolver = PropertiesResolver::new(|key| props.get(key).cloned());

        assert!(matches!(resolver.resolve("@self"), Err(StyleError::EndlessRecursion(_))));
        assert!(matches!(resolver.resolve("@a"), Err(StyleError::EndlessRecursion(_))));
        // the in-progress set is empty again after a failure
        assert!(resolver.in_progress.borrow().is_empty());
    }
}
