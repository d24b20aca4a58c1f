//! Leveled emission entry points.
//!
//! One core [`emit`] resolves the effective logger from the context, applies
//! the kv tolerance rules, appends the rendered hashtag field when the
//! context carries tags, and delegates to the handle. The per-level
//! functions are thin adapters over it, three call shapes each: plain
//! message, `format_args!` formatting, and explicit key/value pairs.

use std::fmt;

use serde_json::Value;

use crate::context::tags::{render_tags, TAGS_KEY};
use crate::context::{fields_from_kvs, Context};
use crate::level::Level;
use crate::logger::Handle;
use crate::sink::Field;

fn collect(ctx: &Context, logger: &Handle, kvs: &[Value]) -> Vec<Field> {
    let mut fields = fields_from_kvs(logger, kvs);
    if let Some(tags) = ctx.tags() {
        fields.push(Field::new(TAGS_KEY, render_tags(tags)));
    }
    fields
}

/// Resolve the context's logger and write one leveled record.
pub fn emit(ctx: &Context, level: Level, message: &str, kvs: &[Value]) {
    if level == Level::Fatal {
        emit_fatal(ctx, message, kvs);
    }
    let logger = ctx.resolve();
    let fields = collect(ctx, &logger, kvs);
    logger.log(level, message, &fields);
}

fn emit_fatal(ctx: &Context, message: &str, kvs: &[Value]) -> ! {
    let logger = ctx.resolve();
    let fields = collect(ctx, &logger, kvs);
    logger.fatal(message, &fields)
}

pub fn debug(ctx: &Context, message: impl fmt::Display) {
    emit(ctx, Level::Debug, &message.to_string(), &[]);
}

pub fn debugf(ctx: &Context, args: fmt::Arguments<'_>) {
    emit(ctx, Level::Debug, &args.to_string(), &[]);
}

pub fn debug_kv(ctx: &Context, message: &str, kvs: &[Value]) {
    emit(ctx, Level::Debug, message, kvs);
}

pub fn info(ctx: &Context, message: impl fmt::Display) {
    emit(ctx, Level::Info, &message.to_string(), &[]);
}

pub fn infof(ctx: &Context, args: fmt::Arguments<'_>) {
    emit(ctx, Level::Info, &args.to_string(), &[]);
}

pub fn info_kv(ctx: &Context, message: &str, kvs: &[Value]) {
    emit(ctx, Level::Info, message, kvs);
}

pub fn warn(ctx: &Context, message: impl fmt::Display) {
    emit(ctx, Level::Warn, &message.to_string(), &[]);
}

pub fn warnf(ctx: &Context, args: fmt::Arguments<'_>) {
    emit(ctx, Level::Warn, &args.to_string(), &[]);
}

pub fn warn_kv(ctx: &Context, message: &str, kvs: &[Value]) {
    emit(ctx, Level::Warn, message, kvs);
}

pub fn error(ctx: &Context, message: impl fmt::Display) {
    emit(ctx, Level::Error, &message.to_string(), &[]);
}

pub fn errorf(ctx: &Context, args: fmt::Arguments<'_>) {
    emit(ctx, Level::Error, &args.to_string(), &[]);
}

pub fn error_kv(ctx: &Context, message: &str, kvs: &[Value]) {
    emit(ctx, Level::Error, message, kvs);
}

/// Write a fatal record through the context, then terminate the process.
pub fn fatal(ctx: &Context, message: impl fmt::Display) -> ! {
    emit_fatal(ctx, &message.to_string(), &[])
}

/// [`fatal`] with `format_args!` formatting.
pub fn fatalf(ctx: &Context, args: fmt::Arguments<'_>) -> ! {
    emit_fatal(ctx, &args.to_string(), &[])
}

/// [`fatal`] with explicit key/value pairs.
pub fn fatal_kv(ctx: &Context, message: &str, kvs: &[Value]) -> ! {
    emit_fatal(ctx, message, kvs)
}
