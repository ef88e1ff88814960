//! Builder for `ConfigStore`

use crate::error::Result;
use crate::events::EventManager;
use crate::store::ConfigStore;
use crate::value::{SettingValue, Settings, settings_from_value};
use serde_json::Value;

/// Builder for creating a [`ConfigStore`] with a fluent API
///
/// Later calls override earlier values for the same key. Listeners
/// registered here are not called for the initial settings.
#[derive(Debug, Default)]
pub struct StoreBuilder {
    settings: Settings,
    events: EventManager,
}

impl StoreBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a setting
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Add a computed setting, evaluated on every read
    #[must_use]
    pub fn computed<F>(mut self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&ConfigStore) -> Result<Value> + Send + Sync + 'static,
    {
        self.settings
            .insert(key.into(), SettingValue::computed(f));
        self
    }

    /// Add every entry of an existing settings mapping
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings.extend(settings);
        self
    }

    /// Add every entry of a JSON object.
    ///
    /// Non-object values contribute nothing.
    #[must_use]
    pub fn with_json(mut self, value: Value) -> Self {
        self.settings.extend(settings_from_value(value));
        self
    }

    /// Register a listener called for every written setting
    #[must_use]
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, &SettingValue) + Send + Sync + 'static,
    {
        self.events.on_change(callback);
        self
    }

    /// Register a listener for a single key
    #[must_use]
    pub fn watch<F>(mut self, key: &str, callback: F) -> Self
    where
        F: Fn(&str, &SettingValue) + Send + Sync + 'static,
    {
        self.events.watch(key, callback);
        self
    }

    /// Build the `ConfigStore`
    #[must_use]
    pub fn build(self) -> ConfigStore {
        ConfigStore::from_parts(self.settings, self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_builder_basic() {
        let store = StoreBuilder::new()
            .set("name", "Doc Brown")
            .set("year", 1985)
            .build();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("name").unwrap(), json!("Doc Brown"));
        assert_eq!(store.get_number("year").unwrap(), 1985.0);
    }

    #[test]
    fn test_builder_later_calls_override() {
        let store = StoreBuilder::new()
            .with_json(json!({"a": 1, "b": 2}))
            .set("a", "one")
            .with_json(json!(["ignored"]))
            .build();

        assert_eq!(store.get("a").unwrap(), json!("one"));
        assert_eq!(store.get("b").unwrap(), json!(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_builder_computed() {
        let store = StoreBuilder::new()
            .set("base", 10)
            .computed("double", |cfg| Ok(json!(cfg.get_number("base")? * 2.0)))
            .build();

        assert_eq!(store.get_number("double").unwrap(), 20.0);
    }

    #[test]
    fn test_builder_listeners_skip_initial_settings() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let mut store = StoreBuilder::new()
            .set("a", 1)
            .on_change(move |_, _| {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build();
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        store.set("a", 2).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
