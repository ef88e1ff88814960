//! Loose value coercions used by the typed getters
//!
//! Booleans follow truthiness rules and numbers use a leading-prefix float
//! parse over the stringified value.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("float prefix pattern is valid")
});

/// Truthiness of a non-null value.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Boolean coercion: only the exact text `"true"` is true for strings.
pub(crate) fn to_boolean(value: &Value) -> bool {
    match value {
        Value::String(s) => s == "true",
        other => truthy(other),
    }
}

/// Number coercion through a leading-prefix parse. Returns NaN when nothing
/// numeric leads the stringified value.
pub(crate) fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        other => parse_float_prefix(&stringify(other)),
    }
}

/// Parse the longest floating-point prefix of `text`.
pub(crate) fn parse_float_prefix(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let Some(found) = FLOAT_PREFIX.find(trimmed) else {
        return f64::NAN;
    };
    let literal = found.as_str();
    if let Some(rest) = literal.strip_suffix("Infinity") {
        return if rest == "-" {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    literal.parse::<f64>().unwrap_or(f64::NAN)
}

/// Text form of a value as used by number coercion.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => stringify(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
