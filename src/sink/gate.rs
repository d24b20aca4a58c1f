//! Severity gate wrapper.

use std::sync::Arc;

use crate::level::Level;
use crate::sink::{Field, Record, Sink};

/// Decorates a sink with an independent minimum severity.
///
/// Lets a derived logger view be stricter than its parent without rebuilding
/// the parent: the gate decides eligibility first, and only then delegates to
/// the inner sink's write path, where the inner sink's own threshold still
/// applies.
pub struct LevelGate {
    inner: Arc<dyn Sink>,
    level: Level,
}

impl LevelGate {
    pub fn new(inner: Arc<dyn Sink>, level: Level) -> Self {
        Self { inner, level }
    }
}

impl Sink for LevelGate {
    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn write(&self, record: &Record<'_>) {
        if !self.enabled(record.level) {
            return;
        }
        self.inner.write(record);
    }

    fn with_fields(&self, fields: Vec<Field>) -> Arc<dyn Sink> {
        Arc::new(Self {
            inner: self.inner.with_fields(fields),
            level: self.level,
        })
    }
}
