//! Logger settings schema.

use serde::{Deserialize, Serialize};

/// Settings a logger handle is built from.
///
/// Immutable per build; a copy may have its version patched afterwards via
/// [`Settings::with_version`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum severity token (debug, info, warn, error, fatal).
    pub log_level: String,

    /// Field name carrying the record message.
    pub message_key: String,

    /// Field name carrying the record severity.
    pub level_key: String,

    /// Field name carrying the record timestamp.
    pub time_key: String,

    /// Application name attached to every record.
    pub app_name: String,

    /// Host identity attached to every record.
    pub host: String,

    /// Version string attached to every record.
    pub version: String,

    /// Human-readable colorized console output instead of JSON.
    pub dev_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            message_key: "message".to_string(),
            level_key: "severity".to_string(),
            time_key: "timestamp".to_string(),
            app_name: "app".to_string(),
            host: "localhost".to_string(),
            version: "0.0.0".to_string(),
            dev_mode: false,
        }
    }
}

impl Settings {
    /// Return a copy with the version field replaced.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.message_key, "message");
        assert_eq!(settings.level_key, "severity");
        assert_eq!(settings.time_key, "timestamp");
        assert_eq!(settings.app_name, "app");
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.version, "0.0.0");
        assert!(!settings.dev_mode);
    }

    #[test]
    fn test_with_version() {
        let settings = Settings::default().with_version("1.2.3");
        assert_eq!(settings.version, "1.2.3");
        assert_eq!(settings.app_name, "app");
    }
}
