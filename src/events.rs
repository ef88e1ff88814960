//! Event system for settings changes
//!
//! Provides callbacks fired when a setting is written, removed or when the
//! whole settings mapping is replaced.

use crate::value::SettingValue;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Type alias for a change callback
pub type ChangeCallback = Arc<dyn Fn(&str, &SettingValue) + Send + Sync>;

/// Manages event listeners for settings changes
#[derive(Clone, Default)]
pub struct EventManager {
    /// Global listeners (called for all changes)
    global_listeners: Vec<ChangeCallback>,

    /// Per-key listeners (called only for specific setting changes)
    key_listeners: HashMap<String, Vec<ChangeCallback>>,
}

impl EventManager {
    /// Create a new event manager
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a global change listener (called for all settings changes)
    ///
    /// # Arguments
    /// * `callback` - Function receiving (`key`, `new_value`)
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: Fn(&str, &SettingValue) + Send + Sync + 'static,
    {
        self.global_listeners.push(Arc::new(callback));
    }

    /// Register a listener for a specific setting key
    ///
    /// # Arguments
    /// * `key` - The setting key (e.g., "`dark_mode`")
    /// * `callback` - Function receiving (`key`, `new_value`)
    pub fn watch<F>(&mut self, key: &str, callback: F)
    where
        F: Fn(&str, &SettingValue) + Send + Sync + 'static,
    {
        self.key_listeners
            .entry(key.to_string())
            .or_default()
            .push(Arc::new(callback));
    }

    /// Notify all relevant listeners of a change
    pub fn notify(&self, key: &str, new_value: &SettingValue) {
        for callback in &self.global_listeners {
            callback(key, new_value);
        }

        if let Some(listeners) = self.key_listeners.get(key) {
            for callback in listeners {
                callback(key, new_value);
            }
        }
    }

    /// Total number of registered listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.global_listeners.len() + self.key_listeners.values().map(Vec::len).sum::<usize>()
    }

    /// Remove all listeners
    pub fn clear(&mut self) {
        self.global_listeners.clear();
        self.key_listeners.clear();
    }
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventManager")
            .field("global_listeners", &self.global_listeners.len())
            .field("key_listeners", &self.key_listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
