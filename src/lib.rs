//! # lazycfg - Lazy Config Store
//!
//! A small, framework-agnostic Rust library wrapping a flat key/value settings
//! map with typed getters and lazily resolved, optionally computed values.
//!
//! ## Features
//!
//! - **Typed Getters**: `get`, `get_boolean`, `get_number` and serde-typed `get_as`
//! - **Lazy Resolution**: Values are memoized per key on first access
//! - **Computed Values**: A setting may be a function of the store itself
//! - **Bulk Access**: Read or replace the whole settings mapping at once
//! - **Change Events**: Callbacks when settings are written
//!
//! ## Quick Start
//!
//! ```rust
//! use lazycfg::ConfigStore;
//! use serde_json::json;
//!
//! let mut config = ConfigStore::from_value(json!({
//!     "name": "Doc Brown",
//!     "debug": "true",
//!     "port": "8080/tcp",
//! }));
//!
//! assert_eq!(config.get("name")?, json!("Doc Brown"));
//! assert_eq!(config.get_or("occupation", "Weather Man")?, json!("Weather Man"));
//! assert!(config.get_boolean("debug")?);
//! assert_eq!(config.get_number("port")?, 8080.0);
//!
//! config.set("occupation", "Inventor")?;
//! assert_eq!(config.get("occupation")?, json!("Inventor"));
//! # Ok::<(), lazycfg::Error>(())
//! ```
//!
//! ## Computed Values
//!
//! ```rust
//! use lazycfg::{ConfigStore, SettingValue};
//! use serde_json::json;
//!
//! let mut config = ConfigStore::new();
//! config
//!     .set("first", "Emmett")?
//!     .set("last", "Brown")?
//!     .set(
//!         "full",
//!         SettingValue::computed(|cfg| {
//!             let first = cfg.get("first")?;
//!             let last = cfg.get("last")?;
//!             Ok(json!(format!(
//!                 "{} {}",
//!                 first.as_str().unwrap_or_default(),
//!                 last.as_str().unwrap_or_default()
//!             )))
//!         }),
//!     )?;
//!
//! assert_eq!(config.get("full")?, json!("Emmett Brown"));
//!
//! // Computed values are evaluated on every read
//! config.set("first", "Doc")?;
//! assert_eq!(config.get("full")?, json!("Doc Brown"));
//! # Ok::<(), lazycfg::Error>(())
//! ```
//!
//! ## Caching Behavior
//!
//! The first read of a key memoizes the settings value for that key. Writing
//! the key with [`ConfigStore::set`] invalidates that entry only, and
//! [`ConfigStore::replace_settings`] wipes the whole cache. Computed settings
//! are cached as functions, never as their results.

// Core modules
mod coerce;
mod error;
mod events;
mod store;
mod value;

// Re-exports from core
pub use error::{Error, Result};
pub use events::{ChangeCallback, EventManager};
pub use store::{CachedSetting, ConfigStore, StoreBuilder};
pub use value::{ComputedFn, SettingValue, Settings};
