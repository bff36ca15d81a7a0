//! Caches for parsed styles and theme documents
//!
//! Every cache remembers the invalidation generation it was filled at and
//! drops its entries before serving a read once the generation moved on.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use indexmap::IndexMap;
use lru::LruCache;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::defaults::UiDefaults;
use crate::error::{Result, StyleError};
use crate::loader;
use crate::parser::{self, strip_key_prefix};
use crate::properties::parse_properties;
use crate::resolver::{PropertiesResolver, Resolver};
use crate::state::{generation, invalidate_all};
use crate::value::{StyleMap, StyleValue};

const DEFAULT_CAPACITY: usize = 256;

// ============================================================================
// Parsed style cache
// ============================================================================

/// LRU cache from style text to its parse result.
///
/// Parse errors are cached too, so broken inline styles are not parsed on
/// every update. The cache is bound to the store it was last filled
/// from; parsing against another store starts over.
pub struct ParsedStyleCache {
    entries: LruCache<String, Result<Option<StyleMap>>>,
    generation: u64,
    store: Option<u64>,
}

impl Default for ParsedStyleCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ParsedStyleCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            generation: generation(),
            store: None,
        }
    }

    /// Parse `text` against `defaults`, or return the cached result
    pub fn parse(&mut self, text: &str, defaults: &UiDefaults) -> Result<Option<StyleMap>> {
        self.sync(defaults.id());

        if let Some(cached) = self.entries.get(text) {
            trace!(style = %text, "parsed style cache hit");
            return cached.clone();
        }

        let result = parser::parse(text, defaults);
        self.entries.put(text.to_string(), result.clone());
        result
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn sync(&mut self, store: u64) {
        let current = generation();
        if current != self.generation {
            trace!(from = self.generation, to = current, "parsed style cache invalidated");
            self.entries.clear();
            self.generation = current;
        }
        if self.store != Some(store) {
            if self.store.is_some() {
                trace!(store, "parsed style cache rebound to another store");
            }
            self.entries.clear();
            self.store = Some(store);
        }
    }
}

// ============================================================================
// Theme document
// ============================================================================

type Properties = IndexMap<String, String>;

fn load_properties_text(text: &str) -> Properties {
    match parse_properties(text) {
        Ok(entries) => entries.into_iter().map(|e| (e.key, e.value)).collect(),
        Err(err) => {
            debug!(error = %err, "theme text has syntax errors");
            Properties::new()
        }
    }
}

/// A `.properties` file the document builds on
struct BaseFile {
    path: PathBuf,
    modified: Option<SystemTime>,
    properties: Properties,
}

impl BaseFile {
    fn load(path: PathBuf) -> Self {
        let modified = modified_time(&path);
        let properties = match fs::read_to_string(&path) {
            Ok(text) => load_properties_text(&text),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load base properties");
                Properties::new()
            }
        };
        Self {
            path,
            modified,
            properties,
        }
    }

    fn is_stale(&self) -> bool {
        modified_time(&self.path) != self.modified
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Theme properties being edited, with the files it builds on.
///
/// Parsed values are cached per line. Failed parses are cached as errors
/// and reported as `None`. Editing the text drops all cached values; a
/// base file whose modification time changed is reloaded and invalidates
/// every cache.
pub struct ThemeDocument {
    text: String,
    base_files: Vec<BaseFile>,
    properties: Option<Properties>,
    line_cache: FxHashMap<usize, Result<StyleValue>>,
    generation: u64,
}

impl ThemeDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            base_files: Vec::new(),
            properties: None,
            line_cache: FxHashMap::default(),
            generation: generation(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.clear_caches();
    }

    /// Insert `s` at byte `offset`
    pub fn insert(&mut self, offset: usize, s: &str) -> Result<()> {
        self.check_offset(offset)?;
        self.text.insert_str(offset, s);
        self.clear_caches();
        Ok(())
    }

    /// Remove `len` bytes starting at `offset`
    pub fn remove(&mut self, offset: usize, len: usize) -> Result<()> {
        let end = offset.saturating_add(len);
        self.check_offset(offset)?;
        self.check_offset(end)?;
        self.text.replace_range(offset..end, "");
        self.clear_caches();
        Ok(())
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return Err(StyleError::invalid(format!("invalid offset {} in theme document", offset)));
        }
        Ok(())
    }

    /// Replace the base files; they are read immediately
    pub fn set_base_files<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.base_files = paths.into_iter().map(|p| BaseFile::load(p.into())).collect();
        self.generation = invalidate_all();
        self.line_cache.clear();
    }

    fn clear_caches(&mut self) {
        self.properties = None;
        self.line_cache.clear();
    }

    /// Reload changed base files and drop caches filled before the last
    /// invalidation
    fn refresh(&mut self) {
        let mut reloaded = false;
        for base in &mut self.base_files {
            if base.is_stale() {
                debug!(path = %base.path.display(), "base properties changed, reloading");
                *base = BaseFile::load(base.path.clone());
                reloaded = true;
            }
        }
        if reloaded {
            invalidate_all();
        }

        let current = generation();
        if current != self.generation {
            self.line_cache.clear();
            self.generation = current;
        }

        if self.properties.is_none() {
            self.properties = Some(load_properties_text(&self.text));
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        if let Some(value) = self.properties.as_ref().and_then(|p| p.get(key)) {
            return Some(value.clone());
        }
        self.base_files
            .iter()
            .find_map(|base| base.properties.get(key).cloned())
    }

    /// Raw value of `key` from the document, else from the base files in order
    pub fn property(&mut self, key: &str) -> Option<String> {
        self.refresh();
        self.lookup(key)
    }

    /// Parsed value of the entry on `line` (0-based).
    ///
    /// `None` for lines without an entry and for values that fail to parse.
    pub fn parsed_value_at_line(&mut self, line: usize) -> Option<StyleValue> {
        self.refresh();

        if let Some(cached) = self.line_cache.get(&line) {
            return cached.as_ref().ok().cloned();
        }

        let text = self.text.lines().nth(line)?;
        let entry = match parse_properties(text) {
            Ok(entries) => entries.into_iter().next()?,
            Err(err) => {
                self.line_cache.insert(line, Err(err.into()));
                return None;
            }
        };

        let result = {
            let resolver = PropertiesResolver::new(|key| self.lookup(key));
            let key = strip_key_prefix(&entry.key);
            resolver
                .resolve(&entry.value)
                .and_then(|value| loader::parse_value(key, &value, None, &resolver))
        };
        if let Err(err) = &result {
            trace!(line, error = %err, "theme line does not parse");
        }

        let value = result.as_ref().ok().cloned();
        self.line_cache.insert(line, result);
        value
    }

    /// Number of cached line values
    pub fn cached_lines(&self) -> usize {
        self.line_cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatlaf_core::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parsed_style_cache() {
        let defaults = UiDefaults::new();
        let mut cache = ParsedStyleCache::new(2);

        let map = cache.parse("arc: 5", &defaults).unwrap().unwrap();
        assert_eq!(map.get("arc"), Some(&StyleValue::Int(5)));
        assert_eq!(cache.len(), 1);

        assert!(cache.parse("arc", &defaults).is_err());
        assert!(cache.parse("arc", &defaults).is_err());
        assert!(cache.len() <= 2);

        assert_eq!(cache.parse("  ", &defaults).unwrap(), None);
    }

    #[test]
    fn test_line_values() {
        let mut doc = ThemeDocument::new("@accent = #f00\nButton.background = lighten(@accent,20%)\n# comment\nBad.color = #ggg\n");

        assert_eq!(doc.parsed_value_at_line(1).and_then(|v| v.as_color()), Some(Color::from_rgb_u32(0xff6666)));
        assert_eq!(doc.parsed_value_at_line(2), None);
        assert_eq!(doc.parsed_value_at_line(3), None);
        assert_eq!(doc.parsed_value_at_line(9), None);
        assert!(doc.cached_lines() >= 1);
    }

    #[test]
    fn test_edits_clear_caches() {
        let mut doc = ThemeDocument::new("@accent = #f00\nLabel.foreground = @accent\n");
        assert_eq!(doc.parsed_value_at_line(1).and_then(|v| v.as_color()), Some(Color::rgb(255, 0, 0)));

        let offset = doc.text().find("#f00").unwrap();
        doc.remove(offset, 4).unwrap();
        doc.insert(offset, "#00f").unwrap();
        assert_eq!(doc.cached_lines(), 0);
        assert_eq!(doc.parsed_value_at_line(1).and_then(|v| v.as_color()), Some(Color::rgb(0, 0, 255)));

        assert!(doc.insert(1000, "x").is_err());
    }
}
