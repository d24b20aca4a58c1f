//! Logger configuration.

pub mod env;
pub mod settings;

pub use env::{load_from_env, SettingsError};
pub use settings::Settings;
