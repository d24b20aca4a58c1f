//! Severity levels and the atomic minimum-severity gate.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Log severity, ordered by increasing seriousness.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl Level {
    /// Lowercase token used in encoded records and settings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Debug,
            1 => Self::Info,
            2 => Self::Warn,
            3 => Self::Error,
            _ => Self::Fatal,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a severity token is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized severity token: {0:?}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}

/// Atomically mutable minimum-severity threshold.
///
/// Handles built without an explicit severity share one process-wide
/// instance, so retuning it retunes all of them at once.
#[derive(Debug)]
pub struct AtomicLevel(AtomicU8);

impl AtomicLevel {
    pub const fn new(level: Level) -> Self {
        Self(AtomicU8::new(level as u8))
    }

    pub fn get(&self) -> Level {
        Level::from_u8(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, level: Level) {
        self.0.store(level as u8, Ordering::Relaxed);
    }

    /// Whether an entry at `level` passes this threshold.
    pub fn enables(&self, level: Level) -> bool {
        level >= self.get()
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("Fatal".parse::<Level>().unwrap(), Level::Fatal);
    }

    #[test]
    fn test_parse_rejects_unknown_token() {
        let err = "loud".parse::<Level>().unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_serde_lowercase_tokens() {
        assert_eq!(serde_json::to_value(Level::Warn).unwrap(), "warn");
        let parsed: Level = serde_json::from_value(serde_json::json!("error")).unwrap();
        assert_eq!(parsed, Level::Error);
    }

    #[test]
    fn test_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn test_atomic_level_retune() {
        let gate = AtomicLevel::new(Level::Info);
        assert!(!gate.enables(Level::Debug));
        assert!(gate.enables(Level::Warn));

        gate.set(Level::Error);
        assert_eq!(gate.get(), Level::Error);
        assert!(!gate.enables(Level::Warn));
        assert!(gate.enables(Level::Fatal));
    }
}
