//! Record encoding.
//!
//! JSON output is one object per line, serialized in a single buffer and
//! flushed with one write so multithreaded emission cannot fragment lines.
//! Console output is the development-mode rendering with a colorized level.

use std::io::{self, Write};
use std::sync::Arc;

use serde::ser::{SerializeMap, Serializer};
use serde_json::Value;
use time::format_description::well_known::Iso8601;
use time::OffsetDateTime;

use crate::level::{AtomicLevel, Level};
use crate::sink::{Field, LineWriter, Record, Sink};

/// Output rendering selected by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Machine-readable, one JSON object per line.
    Json,
    /// Colorized human-readable rendering for development.
    Console,
}

/// Configurable field names for the three structural entries.
#[derive(Debug, Clone)]
pub struct EncoderKeys {
    pub time: String,
    pub level: String,
    pub message: String,
}

/// Writer-backed sink encoding records as JSON or console lines.
pub struct EncoderSink {
    format: Format,
    keys: EncoderKeys,
    gate: Arc<AtomicLevel>,
    base: Vec<Field>,
    writer: Arc<dyn LineWriter>,
}

impl EncoderSink {
    pub fn new(
        format: Format,
        keys: EncoderKeys,
        gate: Arc<AtomicLevel>,
        writer: Arc<dyn LineWriter>,
    ) -> Self {
        Self {
            format,
            keys,
            gate,
            base: Vec::new(),
            writer,
        }
    }

    fn encode_json(&self, record: &Record<'_>) -> Result<Vec<u8>, serde_json::Error> {
        let mut buffer = Vec::with_capacity(256);
        let mut serializer = serde_json::Serializer::new(&mut buffer);
        let mut map = serializer.serialize_map(None)?;

        if let Ok(now) = OffsetDateTime::now_utc().format(&Iso8601::DEFAULT) {
            map.serialize_entry(&self.keys.time, &now)?;
        }
        map.serialize_entry(&self.keys.level, record.level.as_str())?;
        map.serialize_entry(&self.keys.message, record.message)?;
        for field in self.base.iter().chain(record.fields) {
            map.serialize_entry(&field.key, &field.value)?;
        }

        map.end()?;
        Ok(buffer)
    }

    fn encode_console(&self, record: &Record<'_>) -> Result<Vec<u8>, serde_json::Error> {
        let mut line = String::with_capacity(128);

        if let Ok(now) = OffsetDateTime::now_utc().format(&Iso8601::DEFAULT) {
            line.push_str(&now);
            line.push('\t');
        }
        line.push_str(level_color(record.level));
        line.push_str(record.level.as_str());
        line.push_str("\x1b[0m\t");
        line.push_str(record.message);

        if !self.base.is_empty() || !record.fields.is_empty() {
            let mut object = serde_json::Map::new();
            for field in self.base.iter().chain(record.fields) {
                object.insert(field.key.clone(), field.value.clone());
            }
            line.push('\t');
            line.push_str(&serde_json::to_string(&Value::Object(object))?);
        }

        Ok(line.into_bytes())
    }
}

impl Sink for EncoderSink {
    fn enabled(&self, level: Level) -> bool {
        self.gate.enables(level)
    }

    fn write(&self, record: &Record<'_>) {
        // Own threshold applies even when reached through a gate wrapper.
        if !self.enabled(record.level) {
            return;
        }

        let encoded = match self.format {
            Format::Json => self.encode_json(record),
            Format::Console => self.encode_console(record),
        };
        match encoded {
            Ok(mut line) => {
                line.push(b'\n');
                self.writer.write_line(&line);
            }
            Err(err) => {
                let mut out = io::stdout().lock();
                let _ = writeln!(out, "ctxlog: failed to encode log record: {err}");
            }
        }
    }

    fn with_fields(&self, fields: Vec<Field>) -> Arc<dyn Sink> {
        let mut base = self.base.clone();
        base.extend(fields);
        Arc::new(Self {
            format: self.format,
            keys: self.keys.clone(),
            gate: Arc::clone(&self.gate),
            base,
            writer: Arc::clone(&self.writer),
        })
    }
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Debug => "\x1b[35m",
        Level::Info => "\x1b[34m",
        Level::Warn => "\x1b[33m",
        Level::Error | Level::Fatal => "\x1b[31m",
    }
}
