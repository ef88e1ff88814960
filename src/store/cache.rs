//! Resolved-value cache for `ConfigStore`
//!
//! Memoizes the settings value seen at first access of each key. Computed
//! values are stored as-is and never unwrapped into the cache.

use crate::value::{SettingValue, Settings};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// A resolved cache entry
#[derive(Debug, Clone, PartialEq)]
pub enum CachedSetting {
    /// Resolved, but the key was not present in settings
    Absent,
    /// Resolved to the settings value at the time of first access
    Present(SettingValue),
}

impl CachedSetting {
    fn lookup(settings: &Settings, key: &str) -> Self {
        settings
            .get(key)
            .cloned()
            .map_or(CachedSetting::Absent, CachedSetting::Present)
    }
}

#[derive(Debug, Default)]
pub struct ResolvedCache {
    /// A key missing from this map has not been resolved yet
    entries: RefCell<HashMap<String, CachedSetting>>,
    /// Incremented on every full invalidation
    generation: Cell<u64>,
}

impl ResolvedCache {
    /// Return the cached entry for `key`, resolving it from `settings` on
    /// first access.
    ///
    /// The internal borrow is released before returning so callers can
    /// re-enter the cache while evaluating a computed value.
    pub fn get_or_resolve(&self, settings: &Settings, key: &str) -> CachedSetting {
        if let Some(entry) = self.entries.borrow().get(key) {
            return entry.clone();
        }

        let entry = CachedSetting::lookup(settings, key);
        log::trace!(
            "Resolved '{key}' into cache (generation {}): {entry:?}",
            self.generation.get()
        );
        self.entries
            .borrow_mut()
            .insert(key.to_string(), entry.clone());
        entry
    }

    pub fn peek(&self, key: &str) -> Option<CachedSetting> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    pub fn invalidate_all(&self) {
        self.entries.borrow_mut().clear();
        self.generation.set(self.generation.get() + 1);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }
}
