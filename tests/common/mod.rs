//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use ctxlog::sink::LineWriter;
use ctxlog::{build_with_writer, Handle, Level, Settings};

/// Line writer capturing encoded records instead of printing them.
#[derive(Clone, Default)]
pub struct CaptureWriter {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Captured lines parsed as JSON records.
    pub fn records(&self) -> Vec<serde_json::Value> {
        self.lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

impl LineWriter for CaptureWriter {
    fn write_line(&self, line: &[u8]) {
        self.lines
            .lock()
            .unwrap()
            .push(String::from_utf8_lossy(line).trim_end().to_string());
    }
}

/// Build a handle writing into a fresh capture writer.
#[allow(dead_code)]
pub fn capture_handle(severity: Option<Level>, settings: &Settings) -> (CaptureWriter, Handle) {
    let writer = CaptureWriter::new();
    let handle = build_with_writer(severity, settings, Arc::new(writer.clone()));
    (writer, handle)
}
