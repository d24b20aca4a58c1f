//! Logger handles and the factory building them from settings.

use std::fmt;
use std::process;
use std::sync::Arc;

use crate::config::Settings;
use crate::level::{AtomicLevel, Level};
use crate::logger::registry;
use crate::sink::{
    EncoderKeys, EncoderSink, Field, Format, LevelGate, LineWriter, Record, Sink, StdoutWriter,
};

/// An immutable logger bound to a base field set and a severity gate.
///
/// Cloning is cheap; deriving a stricter or field-enriched view produces a
/// new handle and leaves the original untouched.
#[derive(Clone)]
pub struct Handle {
    sink: Arc<dyn Sink>,
}

impl Handle {
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self { sink }
    }

    /// Whether an entry at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        self.sink.enabled(level)
    }

    /// A new handle with the given fields appended to the base field set.
    pub fn with_fields(&self, fields: Vec<Field>) -> Handle {
        Handle::new(self.sink.with_fields(fields))
    }

    /// A new handle gated at `level`, independent of this handle's own gate.
    pub fn with_min_level(&self, level: Level) -> Handle {
        Handle::new(Arc::new(LevelGate::new(Arc::clone(&self.sink), level)))
    }

    /// Write one leveled record. No-op when the gate rejects the level.
    pub fn log(&self, level: Level, message: &str, fields: &[Field]) {
        if !self.sink.enabled(level) {
            return;
        }
        self.sink.write(&Record {
            level,
            message,
            fields,
        });
    }

    /// Write a fatal record, then terminate the process.
    pub fn fatal(&self, message: &str, fields: &[Field]) -> ! {
        self.sink.write(&Record {
            level: Level::Fatal,
            message,
            fields,
        });
        process::exit(1);
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle").finish_non_exhaustive()
    }
}

/// Build a ready-to-use handle from settings. Never fails; severity must be
/// validated by the caller, and `None` borrows the shared process default
/// gate.
pub fn build(severity: Option<Level>, settings: &Settings) -> Handle {
    build_with_writer(severity, settings, Arc::new(StdoutWriter))
}

/// [`build`] with an explicit line writer. Production callers want stdout;
/// tests substitute a capturing writer.
pub fn build_with_writer(
    severity: Option<Level>,
    settings: &Settings,
    writer: Arc<dyn LineWriter>,
) -> Handle {
    let gate = match severity {
        Some(level) => Arc::new(AtomicLevel::new(level)),
        None => registry::default_gate(),
    };
    let format = if settings.dev_mode {
        Format::Console
    } else {
        Format::Json
    };
    let keys = EncoderKeys {
        time: settings.time_key.clone(),
        level: settings.level_key.clone(),
        message: settings.message_key.clone(),
    };
    let handle = Handle::new(Arc::new(EncoderSink::new(format, keys, gate, writer)));

    let mut base = Vec::new();
    if !settings.version.is_empty() {
        base.push(Field::new("version", settings.version.as_str()));
    }
    if !settings.app_name.is_empty() {
        base.push(Field::new("application_name", settings.app_name.as_str()));
    }
    if !settings.host.is_empty() {
        base.push(Field::new("host", settings.host.as_str()));
    }
    if base.is_empty() {
        handle
    } else {
        handle.with_fields(base)
    }
}
