//! Live reconfiguration and registry fallback tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{json, Value};

use ctxlog::reload::{self, ChangeCallback, ChangeEvent, ChangeSource};
use ctxlog::{registry, Context, Level, Registry, Settings};

mod common;

/// In-memory change source driven manually by the tests.
#[derive(Default)]
struct FakeSource {
    callbacks: Mutex<HashMap<String, Vec<ChangeCallback>>>,
}

impl FakeSource {
    fn fire(&self, key: &str, value: Value) {
        let callbacks = self.callbacks.lock().unwrap();
        if let Some(registered) = callbacks.get(key) {
            for callback in registered {
                callback(&ChangeEvent {
                    key: key.to_owned(),
                    value: value.clone(),
                });
            }
        }
    }
}

impl ChangeSource for FakeSource {
    fn on_change(&self, key: &str, callback: ChangeCallback) {
        self.callbacks
            .lock()
            .unwrap()
            .entry(key.to_owned())
            .or_default()
            .push(callback);
    }
}

fn leaked_registry() -> &'static Registry {
    Box::leak(Box::new(Registry::with_defaults()))
}

#[test]
fn test_severity_key_derivation() {
    assert_eq!(reload::severity_key("APP"), "APP_LOG_LEVEL");
}

#[test]
fn test_watch_swaps_logger_on_valid_token() {
    let registry = leaked_registry();
    let source = FakeSource::default();
    reload::watch(registry, "APP", "1.2.3", &Settings::default(), &source);

    assert!(!registry.current().enabled(Level::Debug));
    source.fire("APP_LOG_LEVEL", json!("debug"));
    assert!(registry.current().enabled(Level::Debug));

    source.fire("APP_LOG_LEVEL", json!("error"));
    assert!(!registry.current().enabled(Level::Warn));
    assert!(registry.current().enabled(Level::Error));
}

#[test]
fn test_watch_drops_invalid_updates() {
    let registry = leaked_registry();
    let source = FakeSource::default();
    reload::watch(registry, "APP", "1.2.3", &Settings::default(), &source);

    // unrecognized token
    source.fire("APP_LOG_LEVEL", json!("loud"));
    assert!(!registry.current().enabled(Level::Debug));
    assert!(registry.current().enabled(Level::Info));

    // non-string payload
    source.fire("APP_LOG_LEVEL", json!(42));
    assert!(!registry.current().enabled(Level::Debug));
    assert!(registry.current().enabled(Level::Info));
}

#[test]
fn test_watch_ignores_other_keys() {
    let registry = leaked_registry();
    let source = FakeSource::default();
    reload::watch(registry, "APP", "1.2.3", &Settings::default(), &source);

    source.fire("OTHER_LOG_LEVEL", json!("debug"));
    assert!(!registry.current().enabled(Level::Debug));
}

#[test]
fn test_resolve_falls_back_to_global_registry() {
    let (writer, handle) = common::capture_handle(Some(Level::Info), &Settings::default());
    registry::replace(handle);

    // context without an attached logger resolves to the replaced handle
    let ctx = Context::new();
    ctxlog::info(&ctx, "through global");

    assert_eq!(writer.records()[0]["message"], "through global");

    registry::replace(registry::global().default_handle());
}
