//! Error types for lazycfg

use thiserror::Error;

/// Result type alias for lazycfg operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for lazycfg
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("config key is not defined")]
    KeyNotDefined,

    #[error("key or value is not defined")]
    KeyOrValueNotDefined,

    // -------------------------------------------------------------------------
    // Resolution Errors
    // -------------------------------------------------------------------------
    #[error("Circular reference while resolving computed setting '{0}'")]
    CircularReference(String),

    #[error("Computed setting '{key}' failed: {reason}")]
    Computed { key: String, reason: String },

    #[error("Failed to parse setting '{key}': {reason}")]
    Parse { key: String, reason: String },
}

impl Error {
    /// Check if this error was caused by a missing key or value argument
    #[must_use]
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Error::KeyNotDefined | Error::KeyOrValueNotDefined)
    }

    /// Build a [`Error::Computed`] from inside a computed setting
    pub fn computed(key: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Error::Computed {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Only the empty string stands for an omitted key; any other text is a key.
pub(crate) fn is_defined_key(key: &str) -> bool {
    !key.is_empty()
}
