//! UI defaults store
//!
//! [`UiDefaults`] holds everything a theme defines: the key/value table
//! (including `[style]` bundles), the `@variables`, the dark flag, the
//! platform and the user scale factor. It is passed explicitly to every
//! parse and apply call.
//!
//! Themes are loaded from `.properties` text. While loading, bracket key
//! prefixes are processed, `*.suffix` wildcards are expanded, variables are
//! collected and every other value is resolved and parsed.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use flatlaf_core::{Color, Dimension, Font, Insets, UiScale, LOGICAL_FAMILIES};

use crate::error::Result;
use crate::loader;
use crate::properties::parse_properties;
use crate::resolver::{DefaultsResolver, PropertiesResolver, Resolver, VARIABLE_PREFIX};
use crate::state::invalidate_all;
use crate::styleable::StyleEnum;
use crate::value::{StyleValue, ValueType};

/// Prefixes that are kept in keys while loading
const SPECIAL_PREFIXES: &[&str] = &["[style]"];

/// Source of store ids
static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

const WILDCARD_PREFIX: &str = "*.";

/// Limit for chains of `lazy(key)` values
const MAX_LAZY_DEPTH: usize = 16;

const DEFAULT_FONT_KEY: &str = "defaultFont";

/// Platform used for `[win]`, `[mac]` and `[linux]` key prefixes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    #[default]
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    /// Key prefix enabled on this platform
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Platform::Windows => Some("[win]"),
            Platform::MacOs => Some("[mac]"),
            Platform::Linux => Some("[linux]"),
            Platform::Other => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "win" | "windows" => Some(Platform::Windows),
            "mac" | "macos" => Some(Platform::MacOs),
            "linux" => Some(Platform::Linux),
            "other" => Some(Platform::Other),
            _ => None,
        }
    }
}

/// Outcome of loading theme properties
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    /// Number of values stored (variables included)
    pub loaded: usize,
    /// Entries that failed to parse, as (key, message)
    pub errors: Vec<(String, String)>,
}

type SystemColorProvider = Box<dyn Fn(&str) -> Option<Color>>;

/// The UI defaults table with variables and theme context
pub struct UiDefaults {
    id: u64,
    values: IndexMap<String, StyleValue>,
    variables: FxHashMap<String, String>,
    dark: bool,
    platform: Platform,
    scale: UiScale,
    system_colors: Option<SystemColorProvider>,
    font_families: Vec<String>,
    base_font: Font,
    extra_defaults: IndexMap<String, String>,
}

impl Default for UiDefaults {
    fn default() -> Self {
        Self {
            id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
            values: IndexMap::new(),
            variables: FxHashMap::default(),
            dark: false,
            platform: Platform::current(),
            scale: UiScale::IDENTITY,
            system_colors: None,
            font_families: LOGICAL_FAMILIES.iter().map(|f| f.to_string()).collect(),
            base_font: Font::default(),
            extra_defaults: IndexMap::new(),
        }
    }
}

impl fmt::Debug for UiDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiDefaults")
            .field("id", &self.id)
            .field("values", &self.values.len())
            .field("variables", &self.variables.len())
            .field("dark", &self.dark)
            .field("platform", &self.platform)
            .field("scale", &self.scale)
            .field("system_colors", &self.system_colors.is_some())
            .finish()
    }
}

impl UiDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dark(mut self, dark: bool) -> Self {
        self.dark = dark;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_scale(mut self, scale: UiScale) -> Self {
        self.scale = scale;
        self
    }

    /// Provider for `systemColor(name)`
    pub fn with_system_colors(mut self, provider: impl Fn(&str) -> Option<Color> + 'static) -> Self {
        self.system_colors = Some(Box::new(provider));
        self
    }

    /// Families considered available when deriving fonts
    pub fn with_font_families<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.font_families = families.into_iter().map(Into::into).collect();
        self
    }

    /// Font used when neither `defaultFont` nor a base key is defined
    pub fn with_base_font(mut self, font: Font) -> Self {
        self.base_font = font;
        self
    }

    /// Identity of this store, unique within the process
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn scale(&self) -> UiScale {
        self.scale
    }

    pub fn set_scale(&mut self, scale: UiScale) {
        if self.scale != scale {
            self.scale = scale;
            invalidate_all();
        }
    }

    // ========================================================================
    // Values
    // ========================================================================

    /// Store a value and return the previous one
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Option<StyleValue> {
        let old = self.values.insert(key.into(), value.into());
        invalidate_all();
        old
    }

    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        let old = self.values.shift_remove(key);
        if old.is_some() {
            invalidate_all();
        }
        old
    }

    /// Effective value of `key`.
    ///
    /// `lazy(key)` values are followed and scaled values are evaluated with
    /// the current scale factor. `null` values are reported as missing.
    pub fn get(&self, key: &str) -> Option<StyleValue> {
        self.get_at_depth(key, 0)
    }

    fn get_at_depth(&self, key: &str, depth: usize) -> Option<StyleValue> {
        match self.values.get(key)? {
            StyleValue::Null => None,
            StyleValue::Lazy(target) => {
                if depth >= MAX_LAZY_DEPTH {
                    warn!(key = %key, "lazy value chain too deep");
                    return None;
                }
                self.get_at_depth(target, depth + 1)
            }
            value => Some(value.scaled(self.scale)),
        }
    }

    /// Stored value without lazy or scale evaluation
    pub fn get_raw(&self, key: &str) -> Option<&StyleValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ========================================================================
    // Variables
    // ========================================================================

    /// Raw value of a variable; `name` includes the `@`
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn put_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
        invalidate_all();
    }

    /// Variables sorted by name
    pub fn variables(&self) -> Vec<(&str, &str)> {
        let mut variables: Vec<_> = self
            .variables
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        variables.sort_unstable();
        variables
    }

    pub fn system_color(&self, name: &str) -> Option<Color> {
        self.system_colors.as_ref().and_then(|provider| provider(name))
    }

    // ========================================================================
    // Typed getters
    // ========================================================================

    pub fn get_color(&self, key: &str) -> Option<Color> {
        self.get(key)?.as_color()
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        self.get(key)?.as_int()
    }

    pub fn get_float(&self, key: &str) -> Option<f32> {
        self.get(key)?.as_float()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            StyleValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_insets(&self, key: &str) -> Option<Insets> {
        self.get(key)?.as_insets()
    }

    pub fn get_dimension(&self, key: &str) -> Option<Dimension> {
        self.get(key)?.as_dimension()
    }

    /// Font of `key`, derived against its base font.
    ///
    /// The base is the font of the spec's `$baseFontKey`, else
    /// `defaultFont`, else the store's base font.
    pub fn get_font(&self, key: &str) -> Option<Font> {
        self.font_at_depth(key, 0)
    }

    fn font_at_depth(&self, key: &str, depth: usize) -> Option<Font> {
        let value = self.get(key)?;
        let spec = value.as_font()?;
        if depth >= MAX_LAZY_DEPTH {
            warn!(key = %key, "font base chain too deep");
            return None;
        }

        let base = match &spec.base_font_key {
            Some(base_key) => self.font_at_depth(base_key, depth + 1),
            None if key != DEFAULT_FONT_KEY => self.font_at_depth(DEFAULT_FONT_KEY, depth + 1),
            None => None,
        }
        .unwrap_or_else(|| self.base_font.clone());

        Some(spec.derive(&base, |family| self.is_font_available(family)))
    }

    /// Enum constant stored as string under `key`.
    ///
    /// A missing key gives `default`, an unknown constant name gives `None`.
    pub fn get_enum<E: StyleEnum>(&self, key: &str, default: Option<E>) -> Option<E> {
        match self.get_string(key) {
            Some(name) => E::from_name(&name),
            None => default,
        }
    }

    pub fn is_font_available(&self, family: &str) -> bool {
        self.font_families.iter().any(|f| f.eq_ignore_ascii_case(family))
    }

    // ========================================================================
    // Parsing against the defaults
    // ========================================================================

    /// Resolve `@variables` and `$references` in `value`
    pub fn resolve(&self, value: &str) -> Result<String> {
        DefaultsResolver::new(self).resolve(value)
    }

    /// Resolve and parse `value` for `key`, evaluating scaled values
    pub fn parse_value(&self, key: &str, value: &str, expected: Option<ValueType>) -> Result<StyleValue> {
        let resolver = DefaultsResolver::new(self);
        let value = resolver.resolve(value)?;
        Ok(loader::parse_value(key, &value, expected, &resolver)?.scaled(self.scale))
    }

    /// Strip the enabled `[light]`/`[dark]`/platform prefixes from `key`.
    ///
    /// `None` if any prefix is disabled or malformed.
    pub fn active_key<'k>(&self, key: &'k str) -> Option<&'k str> {
        strip_prefixes(key, self.dark, self.platform, false)
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Set defaults that are added on top of every load.
    ///
    /// `@` keys become variables; other values are resolved and parsed right
    /// away.
    pub fn set_global_extra_defaults<I, K, V>(&mut self, extra: I) -> LoadReport
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.extra_defaults = extra
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut properties = IndexMap::new();
        self.put_extra_defaults(&mut properties);
        self.load_entries(properties)
    }

    /// Load one theme properties text
    pub fn load_properties(&mut self, text: &str) -> Result<LoadReport> {
        self.load_sources(&[text])
    }

    /// Load theme properties texts in order; later entries win.
    ///
    /// A syntax error in a source fails the whole load. Values that fail
    /// to resolve or parse are logged, reported and skipped.
    pub fn load_sources(&mut self, sources: &[&str]) -> Result<LoadReport> {
        let mut properties = IndexMap::new();
        for source in sources {
            for entry in parse_properties(source)? {
                self.put_property(&mut properties, entry.key, entry.value);
            }
        }
        self.put_extra_defaults(&mut properties);

        Ok(self.load_entries(properties))
    }

    fn put_property(&self, properties: &mut IndexMap<String, String>, key: String, value: String) {
        match strip_prefixes(&key, self.dark, self.platform, true) {
            Some(stripped) => {
                properties.insert(stripped.to_string(), value);
            }
            None => trace!(key = %key, "ignoring property with inactive prefix"),
        }
    }

    fn put_extra_defaults(&self, properties: &mut IndexMap<String, String>) {
        for (key, value) in &self.extra_defaults {
            self.put_property(properties, key.clone(), value.clone());
        }
    }

    fn load_entries(&mut self, mut properties: IndexMap<String, String>) -> LoadReport {
        // wildcard entries override existing defaults with the same last key segment
        let mut wildcards = FxHashMap::default();
        properties.retain(|key, value| match key.strip_prefix(WILDCARD_PREFIX) {
            Some(suffix) => {
                wildcards.insert(suffix.to_string(), value.clone());
                false
            }
            None => true,
        });
        if !wildcards.is_empty() {
            for key in self.values.keys() {
                if properties.contains_key(key) {
                    continue;
                }
                let Some(dot) = key.rfind('.') else {
                    continue;
                };
                if let Some(value) = wildcards.get(&key[dot + 1..]) {
                    properties.insert(key.clone(), value.clone());
                }
            }
        }

        let mut report = LoadReport::default();
        let mut parsed = Vec::with_capacity(properties.len());
        let mut variables = Vec::new();
        {
            let resolver = PropertiesResolver::new(|key| properties.get(key).cloned()).with_defaults(self);
            for (key, value) in &properties {
                if key.starts_with(VARIABLE_PREFIX) {
                    variables.push((key.clone(), value.clone()));
                    continue;
                }

                let result = resolver
                    .resolve(value)
                    .and_then(|resolved| loader::parse_value(key, &resolved, None, &resolver));
                match result {
                    Ok(value) => parsed.push((key.clone(), value)),
                    Err(err) => {
                        warn!(key = %key, value = %value, error = %err, "failed to parse theme property");
                        report.errors.push((key.clone(), err.to_string()));
                    }
                }
            }
        }

        report.loaded = parsed.len() + variables.len();
        self.variables.extend(variables);
        self.values.extend(parsed);
        invalidate_all();

        debug!(loaded = report.loaded, errors = report.errors.len(), "loaded theme properties");
        report
    }
}

/// Remove enabled bracket prefixes from `key`.
///
/// With `keep_special`, `[style]` stops prefix processing and stays part of
/// the key.
fn strip_prefixes(key: &str, dark: bool, platform: Platform, keep_special: bool) -> Option<&str> {
    let light_or_dark = if dark { "[dark]" } else { "[light]" };

    let mut key = key;
    while key.starts_with('[') {
        let close = key.find(']')?;
        let prefix = &key[..=close];

        if keep_special && SPECIAL_PREFIXES.contains(&prefix) {
            break;
        }
        if prefix != light_or_dark && Some(prefix) != platform.prefix() {
            return None;
        }

        key = &key[close + 1..];
    }
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_prefixes() {
        assert_eq!(strip_prefixes("[dark]a", true, Platform::Other, true), Some("a"));
        assert_eq!(strip_prefixes("[dark]a", false, Platform::Other, true), None);
        assert_eq!(strip_prefixes("[light][win]a", false, Platform::Windows, true), Some("a"));
        assert_eq!(strip_prefixes("[light][mac]a", false, Platform::Windows, true), None);
        assert_eq!(strip_prefixes("[style]Button", false, Platform::Other, true), Some("[style]Button"));
        assert_eq!(strip_prefixes("[style]Button", false, Platform::Other, false), None);
        assert_eq!(strip_prefixes("[broken", false, Platform::Other, true), None);
    }

    #[test]
    fn test_lazy_and_scaled_values() {
        let mut defaults = UiDefaults::new().with_scale(UiScale::new(2.0));
        defaults.put("Base.gap", StyleValue::ScaledInt(4));
        defaults.put("Other.gap", StyleValue::Lazy("Base.gap".into()));
        defaults.put("Loop.a", StyleValue::Lazy("Loop.a".into()));
        defaults.put("Nothing", StyleValue::Null);

        assert_eq!(defaults.get("Base.gap"), Some(StyleValue::Int(8)));
        assert_eq!(defaults.get("Other.gap"), Some(StyleValue::Int(8)));
        assert_eq!(defaults.get_raw("Base.gap"), Some(&StyleValue::ScaledInt(4)));
        assert_eq!(defaults.get("Loop.a"), None);
        assert_eq!(defaults.get("Nothing"), None);
        assert!(defaults.contains_key("Nothing"));
    }

    #[test]
    fn test_load_with_prefixes() {
        let mut defaults = UiDefaults::new().with_dark(true).with_platform(Platform::MacOs);
        let report = defaults
            .load_properties(
                "Panel.background = #eee\n\
                 [dark]Panel.background = #333\n\
                 [light]Label.foreground = #000\n\
                 [mac]Button.arc = 8\n\
                 [win]Button.arc = 4\n\
                 [style]Button.primary = arc: 10\n",
            )
            .unwrap();

        assert!(report.errors.is_empty());
        assert_eq!(defaults.get_color("Panel.background"), Some(Color::from_rgb_u32(0x333333)));
        assert_eq!(defaults.get("Label.foreground"), None);
        assert_eq!(defaults.get_int("Button.arc"), Some(8));
        assert_eq!(defaults.get_string("[style]Button.primary").as_deref(), Some("arc: 10"));
    }

    #[test]
    fn test_load_reports_failures() {
        let mut defaults = UiDefaults::new();
        let report = defaults
            .load_properties("Good.color = #f00\nBad.color = #ggg\nMissing.color = $Nowhere.color\n")
            .unwrap();

        assert_eq!(report.loaded, 1);
        let keys: Vec<_> = report.errors.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Bad.color", "Missing.color"]);
        assert_eq!(defaults.get_color("Good.color"), Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn test_wildcards_override_existing_defaults() {
        let mut defaults = UiDefaults::new();
        defaults.put("Button.arc", StyleValue::Int(6));
        defaults.put("Component.arc", StyleValue::Int(5));
        defaults
            .load_properties("*.arc = 12\nComponent.arc = 3\n")
            .unwrap();

        assert_eq!(defaults.get_int("Button.arc"), Some(12));
        assert_eq!(defaults.get_int("Component.arc"), Some(3));
        assert!(!defaults.contains_key("*.arc"));
    }

    #[test]
    fn test_global_extra_defaults() {
        let mut defaults = UiDefaults::new();
        let report = defaults.set_global_extra_defaults([
            ("@var1", "#f00"),
            ("@var2", "@var1"),
            ("var2Resolved", "@var2"),
        ]);

        assert!(report.errors.is_empty());
        assert_eq!(defaults.variable("@var1"), Some("#f00"));
        assert_eq!(defaults.variable("@var2"), Some("@var1"));
        assert_eq!(defaults.get_color("var2Resolved"), Some(Color::rgb(255, 0, 0)));

        // extra defaults are applied again on later loads
        defaults.load_properties("var2Resolved = #000\n").unwrap();
        assert_eq!(defaults.get_color("var2Resolved"), Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn test_fonts() {
        let mut defaults = UiDefaults::new();
        defaults
            .load_properties(
                "defaultFont = 10 Dialog\n\
                 Label.font = +3\n\
                 Small.font = -4\n\
                 Large.font = 150%\n\
                 Title.font = bold $Large.font\n\
                 Fancy.font = \"No Such Font\", Serif\n",
            )
            .unwrap();

        assert_eq!(defaults.get_font("Label.font").map(|f| f.size), Some(13));
        assert_eq!(defaults.get_font("Small.font").map(|f| f.size), Some(6));
        assert_eq!(defaults.get_font("Large.font").map(|f| f.size), Some(15));

        let title = defaults.get_font("Title.font").unwrap();
        assert!(title.is_bold());
        assert_eq!(title.size, 15);

        assert_eq!(defaults.get_font("Fancy.font").unwrap().family, "Serif");
    }

    #[test]
    fn test_system_colors() {
        let defaults = UiDefaults::new().with_system_colors(|name| match name {
            "accent" => Some(Color::rgb(0, 0, 255)),
            _ => None,
        });

        assert_eq!(defaults.system_color("accent"), Some(Color::rgb(0, 0, 255)));
        assert_eq!(defaults.system_color("other"), None);
    }
}
