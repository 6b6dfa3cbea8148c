//! Shared types and utilities for the JUnit Report Helper.
//!
//! Used by both the `jrh` orchestrator and the `jrh-convert` converter.

pub mod config;
pub mod errors;
pub mod junit;
pub mod logging;
pub mod paths;
pub mod render;

pub use config::{BrowserMode, ColorChoice, ConfigSource, EnvError, Settings, Sourced};
pub use errors::{ErrorCategory, ErrorCode, ErrorEntry};
pub use junit::{CaseStatus, ParseError, SuiteSummary, TestCase, TestSuite};
pub use logging::{LogConfig, LogFormat, LoggingGuards, init_logging};
pub use paths::{REPORT_SUFFIX, default_report_name, has_report_extension, resolve_output_path};
pub use render::{clean_test_name, escape_html, format_duration, render_html};
