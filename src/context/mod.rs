//! Execution context carrying a logger and accumulated tags.
//!
//! A [`Context`] is an immutable value: every derivation returns a new
//! context and never mutates the parent, so concurrent derivations from the
//! same parent are independent.

pub mod tags;

mod emit;

use std::sync::Arc;

use serde_json::Value;

use crate::level::Level;
use crate::logger::{registry, Handle};
use crate::sink::Field;

pub use emit::{
    debug, debug_kv, debugf, emit, error, error_kv, errorf, fatal, fatal_kv, fatalf, info,
    info_kv, infof, warn, warn_kv, warnf,
};

/// Per-call-chain carrier of two independent optional attachments: a logger
/// handle already enriched with extra fields, and an append-only tag list.
#[derive(Debug, Clone, Default)]
pub struct Context {
    logger: Option<Handle>,
    tags: Option<Arc<Vec<String>>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context whose resolved logger is `handle`, tags untouched.
    pub fn with_logger(&self, handle: Handle) -> Context {
        Context {
            logger: Some(handle),
            tags: self.tags.clone(),
        }
    }

    /// Derive a context whose logger carries the given key/value pairs as
    /// structured fields, starting from the resolved logger.
    ///
    /// Malformed input is tolerated: an odd trailing element is dropped, and
    /// a pair whose key is not a string is skipped with a warning, while all
    /// valid pairs are still applied.
    pub fn with_fields(&self, kvs: &[Value]) -> Context {
        let logger = self.resolve();
        let fields = fields_from_kvs(&logger, kvs);
        self.with_logger(logger.with_fields(fields))
    }

    /// Derive a context with the given tags appended to any inherited list.
    /// The parent's list is copied, never mutated.
    pub fn with_tags<I, T>(&self, tags: I) -> Context
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut list: Vec<String> = self.tags.as_deref().cloned().unwrap_or_default();
        list.extend(tags.into_iter().map(Into::into));
        Context {
            logger: self.logger.clone(),
            tags: Some(Arc::new(list)),
        }
    }

    /// The attached logger, or the global registry's current handle.
    /// Always usable.
    pub fn resolve(&self) -> Handle {
        self.logger.clone().unwrap_or_else(registry::current)
    }

    /// Tags accumulated by this context and its ancestors, if any were
    /// attached.
    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref().map(Vec::as_slice)
    }
}

/// Convert a flat key/value list into fields, applying the tolerance rules.
/// Warnings about non-string keys go through `logger`.
pub(crate) fn fields_from_kvs(logger: &Handle, kvs: &[Value]) -> Vec<Field> {
    let mut fields = Vec::with_capacity(kvs.len() / 2);
    for pair in kvs.chunks_exact(2) {
        match pair[0].as_str() {
            Some(key) => fields.push(Field::new(key, pair[1].clone())),
            None => logger.log(
                Level::Warn,
                &format!("skipping structured field with non-string key: {}", pair[0]),
                &[],
            ),
        }
    }
    fields
}
