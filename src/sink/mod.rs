//! Log record sinks.
//!
//! A [`Sink`] is the write side of a logger handle: it decides eligibility,
//! encodes records and forwards the encoded line to a [`LineWriter`]. Sinks
//! are immutable; attaching fields or tightening the severity gate produces a
//! new sink around the old one.

pub mod encoder;
pub mod gate;

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::level::Level;

pub use encoder::{EncoderKeys, EncoderSink, Format};
pub use gate::LevelGate;

/// A single structured field attached to a log record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Encode a duration as fractional seconds.
    pub fn duration(key: impl Into<String>, duration: Duration) -> Self {
        Self::new(key, duration.as_secs_f64())
    }
}

/// One log record on its way to the writer.
#[derive(Debug)]
pub struct Record<'a> {
    pub level: Level,
    pub message: &'a str,
    pub fields: &'a [Field],
}

/// Write side of a logger handle.
pub trait Sink: Send + Sync {
    /// Whether an entry at `level` would be written.
    fn enabled(&self, level: Level) -> bool;

    /// Encode and write one record. Ineligible records are dropped; errors
    /// inside the encoding machinery are reported on stdout, never returned.
    fn write(&self, record: &Record<'_>);

    /// A new sink with the given fields appended to the base field set.
    fn with_fields(&self, fields: Vec<Field>) -> Arc<dyn Sink>;
}

/// Destination for encoded log lines.
///
/// One call per record, line ending included, so concurrent writers cannot
/// interleave fragments.
pub trait LineWriter: Send + Sync {
    fn write_line(&self, line: &[u8]);
}

/// Line writer backed by the process standard output stream.
#[derive(Debug, Default)]
pub struct StdoutWriter;

impl LineWriter for StdoutWriter {
    fn write_line(&self, line: &[u8]) {
        let mut out = io::stdout().lock();
        let _ = out.write_all(line);
    }
}
