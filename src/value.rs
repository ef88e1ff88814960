//! Setting value types
//!
//! A setting is either a plain JSON literal or a computed value that is
//! derived from the store every time it is read.

use crate::error::{Result, is_defined_key};
use crate::store::ConfigStore;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Type alias for a computed setting function
pub type ComputedFn = Arc<dyn Fn(&ConfigStore) -> Result<Value> + Send + Sync>;

/// Backing settings mapping of a [`ConfigStore`]
pub type Settings = HashMap<String, SettingValue>;

/// A raw setting as stored in the settings mapping
#[derive(Clone)]
pub enum SettingValue {
    /// A plain value, returned as-is
    Literal(Value),
    /// A function of the store, invoked on every read
    Computed(ComputedFn),
}

impl SettingValue {
    /// Create a computed setting from a closure
    ///
    /// # Example
    ///
    /// ```rust
    /// use lazycfg::{ConfigStore, SettingValue};
    /// use serde_json::json;
    ///
    /// let mut store = ConfigStore::new();
    /// store.set("port", 8080)?;
    /// store.set(
    ///     "url",
    ///     SettingValue::computed(|cfg| {
    ///         Ok(json!(format!("http://localhost:{}", cfg.get("port")?)))
    ///     }),
    /// )?;
    /// assert_eq!(store.get("url")?, json!("http://localhost:8080"));
    /// # Ok::<(), lazycfg::Error>(())
    /// ```
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&ConfigStore) -> Result<Value> + Send + Sync + 'static,
    {
        SettingValue::Computed(Arc::new(f))
    }

    /// The null literal
    #[must_use]
    pub fn null() -> Self {
        SettingValue::Literal(Value::Null)
    }

    #[must_use]
    pub fn is_computed(&self) -> bool {
        matches!(self, SettingValue::Computed(_))
    }

    /// Get the literal value, if this is not a computed setting
    #[must_use]
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            SettingValue::Literal(value) => Some(value),
            SettingValue::Computed(_) => None,
        }
    }

    /// Produce the effective value, invoking the function for computed settings
    pub(crate) fn evaluate(&self, store: &ConfigStore) -> Result<Value> {
        match self {
            SettingValue::Literal(value) => Ok(value.clone()),
            SettingValue::Computed(f) => f(store),
        }
    }
}

impl fmt::Debug for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            SettingValue::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}

impl PartialEq for SettingValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SettingValue::Literal(a), SettingValue::Literal(b)) => a == b,
            (SettingValue::Computed(a), SettingValue::Computed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Value> for SettingValue {
    fn from(value: Value) -> Self {
        SettingValue::Literal(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Literal(Value::String(value.to_string()))
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Literal(Value::String(value))
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Literal(Value::Bool(value))
    }
}

/// Non-finite numbers (NaN, infinities) have no JSON form and become the null
/// literal, so reads of such a setting fall back like any other null.
impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Literal(
            serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number),
        )
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SettingValue {
                fn from(value: $ty) -> Self {
                    SettingValue::Literal(Value::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: Into<SettingValue>> From<Option<T>> for SettingValue {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(SettingValue::null, Into::into)
    }
}

/// Drop entries whose key is the empty string, which no read can reach.
pub(crate) fn retain_defined_keys(mut settings: Settings) -> Settings {
    settings.retain(|key, _| {
        let defined = is_defined_key(key);
        if !defined {
            log::debug!("Dropping setting with an empty key");
        }
        defined
    });
    settings
}

/// Convert a JSON value into a settings mapping.
///
/// Objects become settings of literals. Anything else (null, arrays, scalars)
/// yields an empty mapping.
pub(crate) fn settings_from_value(value: Value) -> Settings {
    match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| (key, SettingValue::Literal(value)))
            .collect(),
        other => {
            log::debug!(
                "Ignoring non-object settings initializer ({}), starting empty",
                kind_of(&other)
            );
            Settings::new()
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conversions() {
        assert_eq!(SettingValue::from("a"), SettingValue::Literal(json!("a")));
        assert_eq!(SettingValue::from(6), SettingValue::Literal(json!(6)));
        assert_eq!(SettingValue::from(true), SettingValue::Literal(json!(true)));
        assert_eq!(SettingValue::from(1.5), SettingValue::Literal(json!(1.5)));
        assert_eq!(SettingValue::from(f64::NAN), SettingValue::null());
        assert_eq!(SettingValue::from(None::<&str>), SettingValue::null());
        assert_eq!(SettingValue::from(Some(2u8)), SettingValue::Literal(json!(2)));
    }

    #[test]
    fn test_computed_equality_is_identity() {
        let a = SettingValue::computed(|_| Ok(json!(1)));
        let b = SettingValue::computed(|_| Ok(json!(1)));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(a, SettingValue::Literal(json!(1)));
        assert!(a.is_computed());
        assert!(a.as_literal().is_none());
    }

    #[test]
    fn test_settings_from_value() {
        let settings = settings_from_value(json!({"name": "Doc Brown", "n": 2}));
        assert_eq!(settings.len(), 2);
        assert_eq!(settings["name"], SettingValue::from("Doc Brown"));

        assert!(settings_from_value(Value::Null).is_empty());
        assert!(settings_from_value(json!([1, 2, 3])).is_empty());
        assert!(settings_from_value(json!("text")).is_empty());
    }

    #[test]
    fn test_retain_defined_keys() {
        let settings = retain_defined_keys(settings_from_value(json!({"": 1, " ": 2, "a": 3})));
        assert_eq!(settings.len(), 2);
        assert!(settings.contains_key(" "));
        assert!(!settings.contains_key(""));
    }

    #[test]
    fn test_debug_hides_closure() {
        let computed = SettingValue::computed(|_| Ok(Value::Null));
        assert_eq!(format!("{computed:?}"), "Computed(<fn>)");
        assert_eq!(
            format!("{:?}", SettingValue::from("x")),
            "Literal(String(\"x\"))"
        );
    }
}
