//! Main configuration store module
//!
//! This module contains the [`ConfigStore`] struct which is the primary entry point
//! for reading and writing settings.

use crate::error::{Error, Result, is_defined_key};
use crate::events::EventManager;
use crate::value::{SettingValue, Settings, retain_defined_keys, settings_from_value};

use log::{debug, trace, warn};
use serde_json::{Map, Value};
use std::cell::RefCell;

mod builder;
mod cache;
mod typed;

pub use builder::StoreBuilder;
pub use cache::CachedSetting;
use cache::ResolvedCache;

/// Flat in-memory configuration store.
///
/// The `ConfigStore` wraps a key/value settings mapping and provides:
///
/// - **Lazy Resolution**: Each key is looked up once and memoized until it is
///   written again or the whole mapping is replaced
/// - **Computed Values**: Settings may be functions of the store, evaluated on every read
/// - **Typed Getters**: Boolean, number and serde-typed access on top of [`get`](Self::get)
/// - **Change Events**: Callbacks for written settings
///
/// # Example
///
/// ```rust
/// use lazycfg::{ConfigStore, SettingValue};
/// use serde_json::json;
///
/// let mut store = ConfigStore::from_value(json!({ "testNum": 2 }));
/// store.set(
///     "testFn",
///     SettingValue::computed(|cfg| Ok(json!(format!("v+{}", cfg.get("testNum")?)))),
/// )?;
///
/// assert_eq!(store.get_number("testNum")?, 2.0);
/// assert_eq!(store.get("testFn")?, json!("v+2"));
///
/// store.set("testNum", 5)?;
/// assert_eq!(store.get("testFn")?, json!("v+5"));
/// # Ok::<(), lazycfg::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ConfigStore {
    /// Backing settings mapping
    settings: Settings,

    /// Memoized settings values, keyed like `settings`
    cache: ResolvedCache,

    /// Computed keys currently being evaluated, innermost last
    resolving: RefCell<Vec<String>>,

    /// Event manager for change callbacks
    events: EventManager,
}

impl ConfigStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store over an existing settings mapping.
    ///
    /// Entries with an empty key are dropped.
    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: retain_defined_keys(settings),
            ..Self::default()
        }
    }

    /// Create a store from a JSON value.
    ///
    /// An object becomes the initial settings. Any other value (null, an
    /// array, a scalar) yields an empty store; no error is raised.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lazycfg::ConfigStore;
    /// use serde_json::{json, Value};
    ///
    /// assert_eq!(ConfigStore::from_value(json!({ "a": 1 })).len(), 1);
    /// assert!(ConfigStore::from_value(Value::Null).is_empty());
    /// assert!(ConfigStore::from_value(json!([1, 2])).is_empty());
    /// ```
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        Self::with_settings(settings_from_value(value))
    }

    /// Create a builder for `ConfigStore` with a fluent API.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lazycfg::ConfigStore;
    /// use serde_json::json;
    ///
    /// let store = ConfigStore::builder()
    ///     .set("host", "localhost")
    ///     .set("port", 8080)
    ///     .computed("addr", |cfg| {
    ///         Ok(json!(format!("{}:{}", cfg.get("host")?.as_str().unwrap_or(""), cfg.get("port")?)))
    ///     })
    ///     .build();
    ///
    /// assert_eq!(store.get("addr")?, json!("localhost:8080"));
    /// # Ok::<(), lazycfg::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    pub(crate) fn from_parts(settings: Settings, events: EventManager) -> Self {
        Self {
            settings: retain_defined_keys(settings),
            events,
            ..Self::default()
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get a single setting value.
    ///
    /// Returns `Value::Null` when the key is missing or its value is null.
    /// Computed settings are evaluated on every call.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key is empty ([`Error::KeyNotDefined`])
    /// - A computed setting fails or re-enters itself
    pub fn get(&self, key: &str) -> Result<Value> {
        self.get_or(key, Value::Null)
    }

    /// Get a single setting value, falling back when it resolves to null.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_or(&self, key: &str, fallback: impl Into<Value>) -> Result<Value> {
        let value = self.resolve(key)?;
        if value.is_null() {
            Ok(fallback.into())
        } else {
            Ok(value)
        }
    }

    /// Resolve `key` to its effective value, null when absent.
    fn resolve(&self, key: &str) -> Result<Value> {
        if !is_defined_key(key) {
            return Err(Error::KeyNotDefined);
        }

        match self.cache.get_or_resolve(&self.settings, key) {
            CachedSetting::Absent => Ok(Value::Null),
            CachedSetting::Present(SettingValue::Literal(value)) => Ok(value),
            CachedSetting::Present(computed) => self.evaluate_computed(key, &computed),
        }
    }

    fn evaluate_computed(&self, key: &str, setting: &SettingValue) -> Result<Value> {
        if self.resolving.borrow().iter().any(|k| k == key) {
            warn!("Circular reference detected while resolving '{key}'");
            return Err(Error::CircularReference(key.to_string()));
        }

        trace!("Evaluating computed setting '{key}'");
        self.resolving.borrow_mut().push(key.to_string());
        let result = setting.evaluate(self);
        self.resolving.borrow_mut().pop();
        result
    }

    /// Get the whole settings mapping
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Check whether `key` is present in the settings mapping
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    /// Iterate over all setting keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.settings.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Resolve every setting into a JSON object.
    ///
    /// Computed settings are evaluated; null values are kept as null.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a computed setting.
    pub fn resolve_all(&self) -> Result<Map<String, Value>> {
        let mut resolved = Map::new();
        for key in self.settings.keys() {
            resolved.insert(key.clone(), self.get(key)?);
        }
        Ok(resolved)
    }

    /// Get the cached entry for `key`, if it has been resolved
    #[must_use]
    pub fn cached(&self, key: &str) -> Option<CachedSetting> {
        self.cache.peek(key)
    }

    /// Number of keys currently resolved into the cache
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Number of times the whole cache has been wiped
    #[must_use]
    pub fn cache_generation(&self) -> u64 {
        self.cache.generation()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Set a single setting value.
    ///
    /// The key's cache entry is invalidated so the next read sees the new
    /// value. A null value is allowed. Non-finite `f64` values have no JSON
    /// form and are stored as null, so `get_or` returns its fallback for them
    /// and `get_number` returns NaN.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyOrValueNotDefined`] if the key is empty. Nothing
    /// is written in that case.
    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) -> Result<&mut Self> {
        if !is_defined_key(key) {
            return Err(Error::KeyOrValueNotDefined);
        }

        let value = value.into();
        debug!("Set '{key}' to {value:?}");
        self.settings.insert(key.to_string(), value.clone());
        self.cache.invalidate(key);
        self.events.notify(key, &value);
        Ok(self)
    }

    /// Remove a setting, returning its previous value
    pub fn remove(&mut self, key: &str) -> Option<SettingValue> {
        let removed = self.settings.remove(key)?;
        debug!("Removed '{key}'");
        self.cache.invalidate(key);
        self.events.notify(key, &SettingValue::null());
        Some(removed)
    }

    /// Replace the whole settings mapping and clear the cache.
    ///
    /// Entries with an empty key are dropped.
    pub fn replace_settings(&mut self, settings: Settings) -> &mut Self {
        debug!("Replacing settings ({} keys)", settings.len());
        self.settings = retain_defined_keys(settings);
        self.cache.invalidate_all();
        for (key, value) in &self.settings {
            self.events.notify(key, value);
        }
        self
    }

    /// Replace the whole settings mapping from a JSON value.
    ///
    /// Non-object values yield an empty mapping, as in [`from_value`](Self::from_value).
    pub fn replace_settings_from_value(&mut self, value: Value) -> &mut Self {
        self.replace_settings(settings_from_value(value))
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Register a listener called for every written setting
    pub fn on_change<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&str, &SettingValue) + Send + Sync + 'static,
    {
        self.events.on_change(callback);
        self
    }

    /// Register a listener for a single key
    pub fn watch<F>(&mut self, key: &str, callback: F) -> &mut Self
    where
        F: Fn(&str, &SettingValue) + Send + Sync + 'static,
    {
        self.events.watch(key, callback);
        self
    }

    /// Get the event manager
    #[must_use]
    pub fn events(&self) -> &EventManager {
        &self.events
    }
}

impl From<Settings> for ConfigStore {
    fn from(settings: Settings) -> Self {
        Self::with_settings(settings)
    }
}

impl From<Value> for ConfigStore {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}
