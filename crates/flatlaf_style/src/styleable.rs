//! Applying styles to targets
//!
//! Every styleable target type owns a [`StyleableTable`]: a static list of
//! [`StyleableProperty`] descriptors, each with a key, the expected value
//! type and plain getter/setter functions. Tables are built once, usually
//! in a `OnceLock`, and drive apply, read back and the info dump.
//!
//! ```ignore
//! static TABLE: OnceLock<StyleableTable<Border>> = OnceLock::new();
//!
//! fn table() -> &'static StyleableTable<Border> {
//!     TABLE.get_or_init(|| {
//!         StyleableTable::new([
//!             StyleableProperty::new("arc", ValueType::Integer, |b: &Border| b.arc.into(), |b: &mut Border, v| {
//!                 b.arc = v.as_int().unwrap_or_default();
//!                 Ok(())
//!             }),
//!         ])
//!     })
//! }
//! ```

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::defaults::UiDefaults;
use crate::error::{Result, StyleError};
use crate::parser;
use crate::state::StyleChanges;
use crate::value::{Style, StyleMap, StyleValue, ValueType};

// ============================================================================
// Descriptors
// ============================================================================

pub type Getter<T> = fn(&T) -> StyleValue;
pub type Setter<T> = fn(&mut T, StyleValue) -> Result<()>;

/// One styleable property of `T`
pub struct StyleableProperty<T> {
    pub key: &'static str,
    pub value_type: ValueType,
    pub get: Getter<T>,
    pub set: Setter<T>,
    /// Changing the value changes size or spacing
    pub layout: bool,
    /// Accepts `null` although the type is primitive (e.g. `Option<bool>`)
    pub nullable: bool,
}

impl<T> StyleableProperty<T> {
    pub fn new(key: &'static str, value_type: ValueType, get: Getter<T>, set: Setter<T>) -> Self {
        Self {
            key,
            value_type,
            get,
            set,
            layout: false,
            nullable: false,
        }
    }

    /// Mark as affecting layout
    pub fn layout(mut self) -> Self {
        self.layout = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Styleable properties of a target type, in declaration order
pub struct StyleableTable<T> {
    properties: IndexMap<&'static str, StyleableProperty<T>>,
}

impl<T> StyleableTable<T> {
    /// Later descriptors with the same key replace earlier ones; use
    /// [`StyleableTable::infos`] to detect such duplicates.
    pub fn new(properties: impl IntoIterator<Item = StyleableProperty<T>>) -> Self {
        Self {
            properties: properties.into_iter().map(|p| (p.key, p)).collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.keys().copied()
    }

    /// Coerce `value` and set it; returns the previous value.
    ///
    /// Unknown keys fail with [`StyleError::UnknownStyle`] so callers can
    /// try the next target in their apply chain.
    pub fn apply(&self, target: &mut T, key: &str, value: StyleValue) -> Result<StyleValue> {
        let property = self
            .properties
            .get(key)
            .ok_or_else(|| StyleError::unknown_style(key))?;

        let value = if property.nullable && value.is_null() {
            value
        } else {
            coerce(key, property.value_type, value)?
        };
        let old = (property.get)(target);
        if old != value {
            trace!(key = %key, old = %old, new = %value, "apply style property");
            (property.set)(target, value)?;
        }
        Ok(old)
    }

    pub fn value(&self, target: &T, key: &str) -> Option<StyleValue> {
        self.properties.get(key).map(|property| (property.get)(target))
    }

    pub fn affects_layout(&self, key: &str) -> bool {
        self.properties.get(key).is_some_and(|property| property.layout)
    }

    /// Add all keys with `prefix` to `infos`
    pub fn put_infos(&self, infos: &mut StyleableInfos, prefix: &str) -> Result<()> {
        for property in self.properties.values() {
            infos.put(format!("{}{}", prefix, property.key), property.value_type)?;
        }
        Ok(())
    }

    pub fn infos(&self) -> Result<StyleableInfos> {
        let mut infos = StyleableInfos::new();
        self.put_infos(&mut infos, "")?;
        Ok(infos)
    }
}

/// Check `value` against the expected type, widening integers to floats.
///
/// `null` is accepted for everything but primitives. Colors accept derived
/// colors; icons and borders accept instances.
pub fn coerce(key: &str, expected: ValueType, value: StyleValue) -> Result<StyleValue> {
    let actual = value.value_type();
    let accepted = match (expected, &value) {
        (ValueType::Unknown, _) => true,
        (_, StyleValue::Null) => !expected.is_primitive(),
        (ValueType::Float, StyleValue::Int(v)) => return Ok(StyleValue::Float(*v as f32)),
        (ValueType::IntegerOrFloat, StyleValue::Int(_) | StyleValue::Float(_)) => true,
        (ValueType::Icon | ValueType::Border, StyleValue::Instance(_)) => true,
        _ => expected == actual,
    };

    if accepted {
        Ok(value)
    } else {
        Err(StyleError::TypeMismatch {
            key: key.to_string(),
            expected,
            actual,
        })
    }
}

// ============================================================================
// Infos
// ============================================================================

/// Styleable keys of a target with their value types
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleableInfos {
    entries: IndexMap<String, ValueType>,
}

impl StyleableInfos {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value_type: ValueType) -> Result<()> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(StyleError::DuplicateKey(key));
        }
        self.entries.insert(key, value_type);
        Ok(())
    }

    /// Add all entries of `other` with `prefix` (e.g. `icon.`)
    pub fn put_all_prefixed(&mut self, prefix: &str, other: &StyleableInfos) -> Result<()> {
        for (key, value_type) in other.iter() {
            self.put(format!("{}{}", prefix, key), value_type)?;
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<ValueType> {
        self.entries.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ValueType)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

// ============================================================================
// Styleable targets
// ============================================================================

/// A target that styles can be applied to
pub trait Styleable {
    /// Apply one value; returns the previous value
    fn apply_style_property(&mut self, key: &str, value: StyleValue) -> Result<StyleValue>;

    fn styleable_infos(&self) -> Result<StyleableInfos>;

    /// Current value of `key`, also if it was never styled
    fn styleable_value(&self, key: &str) -> Option<StyleValue>;

    fn affects_layout(&self, _key: &str) -> bool {
        false
    }
}

/// Restore `old_values`, then parse `style` and apply every entry.
///
/// Keys with an enabled bracket prefix are applied without the prefix,
/// keys with a disabled prefix are skipped. Returns the values to restore
/// on the next call, or `None` if the style is empty.
pub fn parse_and_apply<F>(
    old_values: Option<StyleMap>,
    style: Option<&Style>,
    defaults: &UiDefaults,
    mut apply: F,
) -> Result<Option<StyleMap>>
where
    F: FnMut(&str, StyleValue) -> Result<StyleValue>,
{
    if let Some(old_values) = old_values {
        for (key, value) in old_values {
            apply(&key, value)?;
        }
    }

    let map = match style {
        None => return Ok(None),
        Some(Style::Text(text)) => match parser::parse(text.as_str(), defaults)? {
            Some(map) => map,
            None => return Ok(None),
        },
        Some(Style::Map(map)) => map.clone(),
    };
    if map.is_empty() {
        return Ok(None);
    }

    let mut old_values = StyleMap::with_capacity(map.len());
    for (key, value) in map {
        let key = if key.starts_with('[') {
            match defaults.active_key(&key) {
                Some(key) => key.to_string(),
                None => continue,
            }
        } else {
            key
        };

        let old = apply(&key, value)?;
        // the first old value is the one from before this style
        old_values.entry(key).or_insert(old);
    }
    Ok(Some(old_values))
}

/// Apply `style` to `target` and report what changed.
///
/// A key counts as changed if its value after the pass differs from the
/// value before it, so restoring and re-applying the same style changes
/// nothing. The redraw callback fires once if anything changed.
pub fn apply_style<S: Styleable + ?Sized>(
    target: &mut S,
    old_values: Option<StyleMap>,
    style: Option<&Style>,
    defaults: &UiDefaults,
) -> Result<(Option<StyleMap>, StyleChanges)> {
    let mut originals = StyleMap::new();
    let new_old_values = parse_and_apply(old_values, style, defaults, |key, value| {
        let old = target.apply_style_property(key, value)?;
        originals.entry(key.to_string()).or_insert_with(|| old.clone());
        Ok(old)
    })?;

    let mut changes = StyleChanges::new();
    for (key, original) in &originals {
        if target.styleable_value(key).as_ref() != Some(original) {
            changes.record(key, target.affects_layout(key));
        }
    }

    debug!(changed = changes.changed.len(), "applied style");
    changes.notify();
    Ok((new_old_values, changes))
}

// ============================================================================
// Enums
// ============================================================================

/// An enum whose constants can be styled by name
pub trait StyleEnum: Sized + Copy + 'static {
    const ENUM_NAME: &'static str;
    const VALUES: &'static [Self];

    fn name(self) -> &'static str;

    /// Case-sensitive lookup by constant name
    fn from_name(name: &str) -> Option<Self> {
        Self::VALUES.iter().copied().find(|v| v.name() == name)
    }

    fn to_value(self) -> StyleValue {
        StyleValue::String(self.name().to_string())
    }
}

pub fn convert_to_enum<E: StyleEnum>(value: &StyleValue) -> Result<E> {
    let name = match value {
        StyleValue::String(name) => name.clone(),
        other => other.to_string(),
    };
    E::from_name(&name).ok_or_else(|| StyleError::UnknownEnumValue {
        value: name,
        enum_name: E::ENUM_NAME.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatlaf_core::Color;
    use pretty_assertions::assert_eq;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Align {
        Left,
        Right,
    }

    impl StyleEnum for Align {
        const ENUM_NAME: &'static str = "Align";
        const VALUES: &'static [Self] = &[Align::Left, Align::Right];

        fn name(self) -> &'static str {
            match self {
                Align::Left => "LEFT",
                Align::Right => "RIGHT",
            }
        }
    }

    #[derive(Debug, Default)]
    struct Target {
        width: f32,
        color: Option<Color>,
        align: Option<Align>,
    }

    fn table() -> StyleableTable<Target> {
        StyleableTable::new([
            StyleableProperty::new(
                "width",
                ValueType::Float,
                |t: &Target| t.width.into(),
                |t: &mut Target, v| {
                    t.width = v.as_float().unwrap_or_default();
                    Ok(())
                },
            )
            .layout(),
            StyleableProperty::new(
                "color",
                ValueType::Color,
                |t: &Target| t.color.into(),
                |t: &mut Target, v| {
                    t.color = v.as_color();
                    Ok(())
                },
            ),
            StyleableProperty::new(
                "align",
                ValueType::String,
                |t: &Target| t.align.map_or(StyleValue::Null, Align::to_value),
                |t: &mut Target, v| {
                    t.align = Some(convert_to_enum(&v)?);
                    Ok(())
                },
            ),
        ])
    }

    impl Styleable for Target {
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

    #[test]
    fn test_coerce() {
        assert_eq!(coerce("w", ValueType::Float, StyleValue::Int(2)).unwrap(), StyleValue::Float(2.0));
        assert_eq!(coerce("c", ValueType::Color, StyleValue::Null).unwrap(), StyleValue::Null);
        assert!(coerce("b", ValueType::Boolean, StyleValue::Null).is_err());

        let err = coerce("arc", ValueType::Integer, StyleValue::String("x".into())).unwrap_err();
        assert_eq!(err.to_string(), "value of 'arc' has type String, expected Integer");
    }

    #[test]
    fn test_apply_and_read_back() {
        let mut target = Target::default();
        let old = target.apply_style_property("width", StyleValue::Int(3)).unwrap();
        assert_eq!(old, StyleValue::Float(0.0));
        assert_eq!(target.styleable_value("width"), Some(StyleValue::Float(3.0)));

        let err = target.apply_style_property("height", StyleValue::Int(3)).unwrap_err();
        assert_eq!(err.to_string(), "unknown style 'height'");
        assert_eq!(target.styleable_value("height"), None);
    }

    #[test]
    fn test_enum_values() {
        let mut target = Target::default();
        target.apply_style_property("align", "RIGHT".into()).unwrap();
        assert_eq!(target.align, Some(Align::Right));

        let err = target.apply_style_property("align", "right".into()).unwrap_err();
        assert_eq!(err.to_string(), "unknown enum value 'right' in enum 'Align'");

        let mut defaults = UiDefaults::new();
        defaults.put("Target.align", "LEFT");
        defaults.put("Target.badAlign", "CENTER");
        assert_eq!(defaults.get_enum("Target.align", Some(Align::Right)), Some(Align::Left));
        assert_eq!(defaults.get_enum::<Align>("Target.badAlign", Some(Align::Right)), None);
        assert_eq!(defaults.get_enum("Target.missing", Some(Align::Right)), Some(Align::Right));
    }

    #[test]
    fn test_infos_reject_duplicates() {
        let infos = Target::default().styleable_infos().unwrap();
        let keys: Vec<_> = infos.keys().collect();
        assert_eq!(keys, vec!["width", "color", "align"]);

        let mut combined = StyleableInfos::new();
        combined.put_all_prefixed("a.", &infos).unwrap();
        assert!(matches!(combined.put_all_prefixed("a.", &infos), Err(StyleError::DuplicateKey(_))));
    }

    #[test]
    fn test_parse_and_apply_restores_old_values() {
        let defaults = UiDefaults::new();
        let mut target = Target::default();

        let style = Style::from("width: 5; color: #f00; width: 6");
        let (old, changes) = apply_style(&mut target, None, Some(&style), &defaults).unwrap();
        assert_eq!(target.width, 6.0);
        assert!(changes.needs_layout);
        assert_eq!(changes.changed, vec!["width".to_string(), "color".to_string()]);
        assert_eq!(old.as_ref().and_then(|o| o.get("width")), Some(&StyleValue::Float(0.0)));

        // same style again is no net change
        let (old, changes) = apply_style(&mut target, old, Some(&style), &defaults).unwrap();
        assert!(changes.is_empty());

        // removing the style restores the values from before
        let (old, changes) = apply_style(&mut target, old, None, &defaults).unwrap();
        assert_eq!(old, None);
        assert_eq!(target.width, 0.0);
        assert_eq!(target.color, None);
        assert_eq!(changes.changed.len(), 2);
    }

    #[test]
    fn test_prefixed_keys() {
        let defaults = UiDefaults::new().with_dark(true);
        let mut target = Target::default();

        let style = Style::from("[light]width: 1; [dark]width: 2");
        apply_style(&mut target, None, Some(&style), &defaults).unwrap();
        assert_eq!(target.width, 2.0);
    }
}
