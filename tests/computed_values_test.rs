//! Computed Value Integration Tests
//!
//! Settings that are functions of the store:
//! - Cross-key references
//! - Re-evaluation on every read
//! - Error propagation and circular references

mod common;

use common::{calls, counting_setting, init_logger};
use lazycfg::{CachedSetting, ConfigStore, Error, SettingValue};
use serde_json::{Value, json};

fn prefixed_store() -> ConfigStore {
    init_logger();
    ConfigStore::builder()
        .set("testNum", 2)
        .computed("testFn", |cfg| {
            Ok(json!(format!("testFnReturnValue+{}", cfg.get("testNum")?)))
        })
        .build()
}

#[test]
fn test_computed_reads_other_keys() {
    let config = prefixed_store();

    assert_eq!(config.get_number("testNum").unwrap(), 2.0);
    assert_eq!(config.get("testFn").unwrap(), json!("testFnReturnValue+2"));
}

#[test]
fn test_computed_sees_updated_dependency() {
    let mut config = prefixed_store();
    assert_eq!(config.get("testFn").unwrap(), json!("testFnReturnValue+2"));

    config.set("testNum", 5).unwrap();
    assert_eq!(config.get("testFn").unwrap(), json!("testFnReturnValue+5"));
}

#[test]
fn test_computed_invoked_on_every_get() {
    let (setting, counter) = counting_setting(json!("fresh"));
    let mut config = ConfigStore::new();
    config.set("dynamic", setting).unwrap();

    assert_eq!(calls(&counter), 0);
    for expected in 1..=3 {
        assert_eq!(config.get("dynamic").unwrap(), json!("fresh"));
        assert_eq!(calls(&counter), expected);
    }

    // The cache keeps the function, not its result
    assert!(matches!(
        config.cached("dynamic"),
        Some(CachedSetting::Present(SettingValue::Computed(_)))
    ));
}

#[test]
fn test_computed_null_uses_fallback() {
    let config = ConfigStore::builder()
        .computed("nothing", |_| Ok(Value::Null))
        .computed("flag", |_| Ok(json!("true")))
        .build();

    assert_eq!(config.get_or("nothing", "fb").unwrap(), json!("fb"));
    assert!(config.get_boolean_or("nothing", true).unwrap());
    assert!(config.get_boolean("flag").unwrap());
}

#[test]
fn test_computed_error_propagates() {
    let config = ConfigStore::builder()
        .computed("broken", |_| Err(Error::computed("broken", "upstream unavailable")))
        .computed("dependent", |cfg| cfg.get("broken"))
        .build();

    let err = config.get("dependent").unwrap_err();
    assert!(matches!(err, Error::Computed { ref key, .. } if key == "broken"));

    // A failed evaluation leaves the store usable
    assert!(matches!(config.get("broken"), Err(Error::Computed { .. })));
}

#[test]
fn test_self_reference_is_detected() {
    let config = ConfigStore::builder()
        .computed("loop", |cfg| cfg.get("loop"))
        .build();

    let err = config.get("loop").unwrap_err();
    assert!(matches!(err, Error::CircularReference(ref key) if key == "loop"));
}

#[test]
fn test_mutual_reference_is_detected() {
    let config = ConfigStore::builder()
        .computed("a", |cfg| cfg.get("b"))
        .computed("b", |cfg| cfg.get("a"))
        .set("plain", 1)
        .build();

    assert!(matches!(config.get("a"), Err(Error::CircularReference(_))));
    assert!(matches!(config.get("b"), Err(Error::CircularReference(_))));

    // The resolution stack unwinds after the error
    assert_eq!(config.get("plain").unwrap(), json!(1));
}

#[test]
fn test_same_computed_in_sibling_positions_is_not_circular() {
    let config = ConfigStore::builder()
        .set("n", 3)
        .computed("square", |cfg| {
            let n = cfg.get_number("n")?;
            Ok(json!(n * n))
        })
        .computed("sum", |cfg| {
            Ok(json!(cfg.get_number("square")? + cfg.get_number("square")?))
        })
        .build();

    assert_eq!(config.get_number("sum").unwrap(), 18.0);
}

#[test]
fn test_replacing_computed_with_literal() {
    let mut config = prefixed_store();
    config.get("testFn").unwrap();

    config.set("testFn", "static").unwrap();
    assert_eq!(config.get("testFn").unwrap(), json!("static"));
}
