//! Terminal presentation for the `jrh` orchestrator.

pub mod context;
pub mod theme;

pub use context::OutputContext;
pub use theme::{StatusIndicator, Theme};
