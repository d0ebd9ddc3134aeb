//! Core handler infrastructure: the per-command context and the registry
//! that routes parsed lines to handlers.

pub mod context;
pub mod registry;

pub use context::{Context, Handler};
pub use registry::Registry;
