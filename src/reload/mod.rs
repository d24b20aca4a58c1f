//! Live logger reconfiguration.
//!
//! The core registers a callback with an external change-notification
//! source; on a severity change it rebuilds the logger and swaps it into the
//! registry. Invalid updates are logged locally and dropped, leaving the
//! previous handle active. [`file::FileChangeSource`] is a file-backed
//! source implementation.

pub mod file;

use serde_json::Value;

use crate::config::Settings;
use crate::level::Level;
use crate::logger::{build, Registry};

/// A configuration change delivered by a change-notification source.
///
/// For the severity key the payload is expected to be a string token;
/// validation happens at this boundary.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub key: String,
    pub value: Value,
}

/// Callback invoked by a change source when a watched key changes.
pub type ChangeCallback = Box<dyn Fn(&ChangeEvent) + Send + Sync>;

/// External source of configuration change notifications. Registration is
/// fire-and-forget; there is no unregistration path.
pub trait ChangeSource {
    fn on_change(&self, key: &str, callback: ChangeCallback);
}

/// The settings key carrying the severity threshold for the given prefix.
pub fn severity_key(prefix: &str) -> String {
    format!("{prefix}_LOG_LEVEL")
}

/// Register a callback that rebuilds and hot-swaps the registry's logger
/// whenever the configured severity changes.
///
/// A payload that is not a string, or a string that is not a recognized
/// severity token, is logged through the registry's current handle and
/// ignored; no retry.
pub fn watch(
    registry: &'static Registry,
    prefix: &str,
    version: &str,
    settings: &Settings,
    source: &impl ChangeSource,
) {
    let settings = settings.clone();
    let version = version.to_owned();
    source.on_change(
        &severity_key(prefix),
        Box::new(move |event| {
            let Some(token) = event.value.as_str() else {
                registry.current().log(
                    Level::Error,
                    &format!("ignoring log level update with non-string payload: {}", event.value),
                    &[],
                );
                return;
            };
            let level = match token.parse::<Level>() {
                Ok(level) => level,
                Err(err) => {
                    registry.current().log(
                        Level::Error,
                        &format!("ignoring log level update: {err}"),
                        &[],
                    );
                    return;
                }
            };
            let settings = settings.clone().with_version(version.clone());
            registry.replace(build(Some(level), &settings));
        }),
    );
}
