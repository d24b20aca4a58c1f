//! Logger handles, the construction path and the process registry.

pub mod handle;
pub mod registry;

pub use handle::{build, build_with_writer, Handle};
pub use registry::{InitError, Registry};
