//! Context-scoped structured logging.
//!
//! A process-wide current logger lives in a hot-swappable registry. Call
//! chains derive immutable [`Context`] values that carry a field-enriched
//! logger handle and an append-only hashtag list; the leveled emission
//! functions resolve the effective logger from the context and write one
//! structured record per line to stdout.
//!
//! ```no_run
//! use serde_json::json;
//!
//! let ctx = ctxlog::Context::new().with_tags(["release"]);
//! ctxlog::info(&ctx, "service started");
//! ctxlog::info_kv(&ctx, "listening", &[json!("port"), json!(8080)]);
//! ```

pub mod config;
pub mod context;
pub mod level;
pub mod logger;
pub mod reload;
pub mod sink;

pub use config::{load_from_env, Settings, SettingsError};
pub use context::{
    debug, debug_kv, debugf, emit, error, error_kv, errorf, fatal, fatal_kv, fatalf, info,
    info_kv, infof, warn, warn_kv, warnf, Context,
};
pub use level::{AtomicLevel, Level, ParseLevelError};
pub use logger::{build, build_with_writer, registry, Handle, InitError, Registry};
