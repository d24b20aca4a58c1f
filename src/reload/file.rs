//! File-backed change notification source.
//!
//! Watches a TOML settings file, flattens it into uppercase underscore-joined
//! keys (`[app] log_level` becomes `APP_LOG_LEVEL`) and fires registered
//! callbacks for keys whose value changed since the last snapshot. Load or
//! parse failures keep the previous snapshot.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use serde_json::Value;
use thiserror::Error;

use crate::level::Level;
use crate::logger::registry;
use crate::reload::{ChangeCallback, ChangeEvent, ChangeSource};

/// Error type for settings file loading.
#[derive(Debug, Error)]
pub enum FileSourceError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

type CallbackMap = HashMap<String, Vec<ChangeCallback>>;
type Snapshot = HashMap<String, Value>;

/// A change source that monitors a TOML file for key changes.
pub struct FileChangeSource {
    path: PathBuf,
    callbacks: Arc<Mutex<CallbackMap>>,
    snapshot: Arc<Mutex<Snapshot>>,
}

impl FileChangeSource {
    /// Create a source for the given file. The initial snapshot is taken
    /// immediately; an unreadable file starts from an empty snapshot.
    pub fn new(path: &Path) -> Self {
        let snapshot = load_keys(path).unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            callbacks: Arc::new(Mutex::new(HashMap::new())),
            snapshot: Arc::new(Mutex::new(snapshot)),
        }
    }

    /// Start watching the file.
    ///
    /// Returns the watcher guard; dropping it stops the subscription.
    pub fn run(&self) -> Result<RecommendedWatcher, notify::Error> {
        let callbacks = Arc::clone(&self.callbacks);
        let snapshot = Arc::clone(&self.snapshot);
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    match load_keys(&path) {
                        Ok(next) => dispatch_changes(&callbacks, &snapshot, next),
                        Err(err) => registry::current().log(
                            Level::Error,
                            &format!(
                                "failed to reload {}: {err}; keeping current settings",
                                path.display()
                            ),
                            &[],
                        ),
                    }
                }
                Ok(_) => {}
                Err(err) => registry::current().log(
                    Level::Error,
                    &format!("settings watch error: {err}"),
                    &[],
                ),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;
        Ok(watcher)
    }
}

impl ChangeSource for FileChangeSource {
    fn on_change(&self, key: &str, callback: ChangeCallback) {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_owned())
            .or_default()
            .push(callback);
    }
}

fn load_keys(path: &Path) -> Result<Snapshot, FileSourceError> {
    let content = fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&content)?;
    let mut keys = HashMap::new();
    flatten(&table, None, &mut keys);
    Ok(keys)
}

/// Flatten nested tables into `PARENT_CHILD`-style uppercase keys.
fn flatten(table: &toml::Table, prefix: Option<&str>, out: &mut Snapshot) {
    for (key, value) in table {
        let flat_key = match prefix {
            Some(p) => format!("{p}_{}", key.to_uppercase()),
            None => key.to_uppercase(),
        };
        match value {
            toml::Value::Table(inner) => flatten(inner, Some(&flat_key), out),
            other => {
                if let Ok(json) = serde_json::to_value(other) {
                    out.insert(flat_key, json);
                }
            }
        }
    }
}

/// Fire callbacks for keys whose value differs from the snapshot, then
/// replace the snapshot.
fn dispatch_changes(
    callbacks: &Mutex<CallbackMap>,
    snapshot: &Mutex<Snapshot>,
    next: Snapshot,
) {
    let mut snap = snapshot.lock().unwrap_or_else(PoisonError::into_inner);
    let callbacks = callbacks.lock().unwrap_or_else(PoisonError::into_inner);
    for (key, value) in &next {
        if snap.get(key) == Some(value) {
            continue;
        }
        if let Some(registered) = callbacks.get(key) {
            for callback in registered {
                callback(&ChangeEvent {
                    key: key.clone(),
                    value: value.clone(),
                });
            }
        }
    }
    *snap = next;
}
