//! Process-wide logger registry.
//!
//! Holds the current handle behind a reader/writer lock: arbitrarily many
//! concurrent readers, one writer swapping it on (re)configuration.
//! Concurrent `replace` calls do not corrupt state but are last-writer-wins,
//! so reconfiguration is expected to be serialized by the caller (the
//! single-callback change source in `reload` satisfies this).

use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::config::{load_from_env, Settings, SettingsError};
use crate::level::{AtomicLevel, Level, ParseLevelError};
use crate::logger::handle::{build, Handle};

static DEFAULT_GATE: Lazy<Arc<AtomicLevel>> = Lazy::new(|| Arc::new(AtomicLevel::new(Level::Info)));

/// The process default gate, shared by every handle built without an
/// explicit severity.
pub fn default_gate() -> Arc<AtomicLevel> {
    Arc::clone(&DEFAULT_GATE)
}

/// Error type for registry initialization from the environment.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("unrecognized log level in settings: {0}")]
    ParseLevel(#[from] ParseLevelError),
}

/// Holder of the current logger handle plus the initial default handle.
#[derive(Debug)]
pub struct Registry {
    current: RwLock<Handle>,
    default_handle: Handle,
}

impl Registry {
    /// A registry initialized with a handle built from default settings at
    /// the shared default gate, so [`Registry::current`] never observes an
    /// uninitialized value.
    pub fn with_defaults() -> Self {
        let handle = build(None, &Settings::default());
        Self {
            current: RwLock::new(handle.clone()),
            default_handle: handle,
        }
    }

    /// The current handle.
    pub fn current(&self) -> Handle {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new current handle.
    pub fn replace(&self, handle: Handle) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = handle;
    }

    /// The handle the registry was initialized with.
    pub fn default_handle(&self) -> Handle {
        self.default_handle.clone()
    }

    /// Load settings from prefixed environment variables, override the
    /// version, parse the configured severity, build a new handle and swap
    /// it in. The one construction path that can fail.
    pub fn init_from_env(&self, prefix: &str, version: &str) -> Result<(), InitError> {
        let settings = load_from_env(prefix)?.with_version(version);
        let level = settings.log_level.parse::<Level>()?;
        self.replace(build(Some(level), &settings));
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::with_defaults);

/// The process-global registry, the fallback default when no registry or
/// handle is threaded explicitly.
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// Current handle of the global registry.
pub fn current() -> Handle {
    GLOBAL.current()
}

/// Swap the global registry's current handle.
pub fn replace(handle: Handle) {
    GLOBAL.replace(handle);
}

/// [`Registry::init_from_env`] on the global registry.
pub fn init_from_env(prefix: &str, version: &str) -> Result<(), InitError> {
    GLOBAL.init_from_env(prefix, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_swaps_current() {
        let registry = Registry::with_defaults();
        let stricter = registry.current().with_min_level(Level::Error);

        assert!(registry.current().enabled(Level::Info));
        registry.replace(stricter);
        assert!(!registry.current().enabled(Level::Info));
        // the initial handle is retained unchanged
        assert!(registry.default_handle().enabled(Level::Info));
    }

    #[test]
    fn test_init_from_env_applies_severity() {
        std::env::set_var("CTXLOG_RT_OK_LOG_LEVEL", "debug");
        let registry = Registry::with_defaults();

        assert!(!registry.current().enabled(Level::Debug));
        registry.init_from_env("CTXLOG_RT_OK", "9.9.9").unwrap();
        assert!(registry.current().enabled(Level::Debug));
    }

    #[test]
    fn test_init_from_env_rejects_bad_token() {
        std::env::set_var("CTXLOG_RT_BAD_LOG_LEVEL", "loud");
        let registry = Registry::with_defaults();

        let err = registry.init_from_env("CTXLOG_RT_BAD", "9.9.9").unwrap_err();
        assert!(matches!(err, InitError::ParseLevel(_)));
        // previous handle remains in force
        assert!(registry.current().enabled(Level::Info));
    }
}
