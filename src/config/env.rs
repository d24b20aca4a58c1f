//! Settings loading from the process environment.

use thiserror::Error;

use crate::config::settings::Settings;

/// Error type for settings loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load logger settings: {0}")]
    Load(#[from] config::ConfigError),
}

/// Load [`Settings`] from environment variables carrying the given prefix.
///
/// `load_from_env("APP")` reads `APP_LOG_LEVEL`, `APP_MESSAGE_KEY`,
/// `APP_DEV_MODE` and so on; unset variables keep their defaults.
pub fn load_from_env(prefix: &str) -> Result<Settings, SettingsError> {
    let loaded = config::Config::builder()
        .add_source(config::Environment::with_prefix(prefix).try_parsing(true))
        .build()?;

    Ok(loaded.try_deserialize()?)
}
