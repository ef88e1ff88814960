//! Common test utilities for lazycfg integration tests
//!
//! Provides shared fixtures and helper functions.

#![allow(dead_code)]

use lazycfg::{ConfigStore, SettingValue};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Install a test logger once per test binary
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Test Fixtures
// =============================================================================

/// Server settings deserialized through `get_as`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Store pre-populated with the people settings used across tests
pub fn people_store() -> ConfigStore {
    init_logger();
    ConfigStore::from_value(json!({
        "name": "Doc Brown",
        "occupation": "Weather Man",
    }))
}

/// A computed setting that counts how many times it has been evaluated
pub fn counting_setting(value: serde_json::Value) -> (SettingValue, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let setting = SettingValue::computed(move |_| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        Ok(value.clone())
    });
    (setting, calls)
}

/// Read a call counter
pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
