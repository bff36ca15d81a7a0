//! Process-wide styling state
//!
//! Two things live here and nowhere else:
//! - the invalidation counter that every cache checks before serving a read
//! - the redraw callback the host registers to learn about style changes

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Bumped whenever cached parse results may be stale
static GENERATION: AtomicU64 = AtomicU64::new(0);

/// Global redraw callback - set by the host to trigger UI updates
static REDRAW_CALLBACK: Mutex<Option<fn()>> = Mutex::new(None);

/// Current invalidation generation
pub fn generation() -> u64 {
    GENERATION.load(Ordering::Acquire)
}

/// Invalidate all caches and return the new generation
pub fn invalidate_all() -> u64 {
    let generation = GENERATION.fetch_add(1, Ordering::AcqRel) + 1;
    tracing::trace!(generation, "style caches invalidated");
    generation
}

/// Set the redraw callback function
///
/// Called once per apply pass that changed at least one property.
pub fn set_redraw_callback(callback: fn()) {
    if let Ok(mut guard) = REDRAW_CALLBACK.lock() {
        *guard = Some(callback);
    }
}

pub fn clear_redraw_callback() {
    if let Ok(mut guard) = REDRAW_CALLBACK.lock() {
        *guard = None;
    }
}

/// Trigger a redraw via the registered callback
pub fn trigger_redraw() {
    let callback = REDRAW_CALLBACK.lock().ok().and_then(|guard| *guard);
    if let Some(callback) = callback {
        callback();
    }
}

/// What an apply pass changed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleChanges {
    /// Keys whose value actually changed, in apply order
    pub changed: Vec<String>,
    /// A visual property changed
    pub needs_repaint: bool,
    /// A size or spacing property changed
    pub needs_layout: bool,
}

impl StyleChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    /// Record a changed key; each key is recorded once per pass
    pub fn record(&mut self, key: &str, layout: bool) {
        if !self.changed.iter().any(|k| k == key) {
            self.changed.push(key.to_string());
        }
        self.needs_repaint = true;
        self.needs_layout |= layout;
    }

    /// Fire the redraw callback once if anything changed
    pub fn notify(&self) {
        if !self.is_empty() {
            trigger_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_bumps_generation() {
        let before = generation();
        let after = invalidate_all();
        assert!(after > before);
        assert!(generation() >= after);
    }

    #[test]
    fn test_changes_record_once() {
        let mut changes = StyleChanges::new();
        assert!(changes.is_empty());

        changes.record("arc", false);
        changes.record("arc", false);
        changes.record("margin", true);

        assert_eq!(changes.changed, vec!["arc".to_string(), "margin".to_string()]);
        assert!(changes.needs_repaint);
        assert!(changes.needs_layout);
    }
}
