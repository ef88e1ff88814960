use crate::coerce;
use crate::error::{Error, Result};
use crate::store::ConfigStore;

use serde::de::DeserializeOwned;

impl ConfigStore {
    /// Get a setting as a boolean, defaulting to `false`.
    ///
    /// See [`get_boolean_or`](Self::get_boolean_or).
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_boolean(&self, key: &str) -> Result<bool> {
        self.get_boolean_or(key, false)
    }

    /// Get a setting as a boolean.
    ///
    /// A null or missing value returns `fallback`. Strings are true only for
    /// the exact text `"true"`. Anything else follows truthiness: `false` and
    /// zero are false, other numbers, arrays and objects are true.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_boolean_or(&self, key: &str, fallback: bool) -> Result<bool> {
        let value = self.get(key)?;
        if value.is_null() {
            return Ok(fallback);
        }
        Ok(coerce::to_boolean(&value))
    }

    /// Get a setting as a number, defaulting to NaN.
    ///
    /// Callers that do not supply a fallback must check `is_nan()` themselves.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_number(&self, key: &str) -> Result<f64> {
        self.get_number_or(key, f64::NAN)
    }

    /// Get a setting as a number.
    ///
    /// Numbers are returned as-is. Other values are stringified and the
    /// longest leading float is parsed, so `"6baymax"` gives `6` while
    /// `"baymax6"` gives `fallback`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_number_or(&self, key: &str, fallback: f64) -> Result<f64> {
        let value = self.get(key)?;
        let number = coerce::to_number(&value);
        Ok(if number.is_nan() { fallback } else { number })
    }

    /// Get a setting deserialized into `T`.
    ///
    /// A missing key deserializes from null, so `Option<T>` yields `None`.
    ///
    /// # Type Parameters
    ///
    /// * `T` - The type to deserialize the value into
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`get`](Self::get) fails
    /// - The value cannot be deserialized to type `T`
    pub fn get_as<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value = self.get(key)?;
        serde_json::from_value(value).map_err(|e| Error::Parse {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}
