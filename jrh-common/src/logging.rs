//! Tracing subscriber setup shared by the `jrh` binaries.
//!
//! Logs always go to stderr (stdout carries user-facing output) and can be
//! mirrored to a file through a non-blocking writer.
//!
//! # Environment Variables
//!
//! - `JRH_LOG`: level filter (`trace`, `debug`, `info`, `warn`, `error`, `off`)
//! - `JRH_LOG_FORMAT`: `pretty` (default) or `json`
//! - `JRH_LOG_FILE`: also append log lines to this file

use crate::config::{EnvError, EnvParser};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
    pub stderr: bool,
}

impl LogConfig {
    /// Build a config from `JRH_LOG*` variables, with `default_level` as fallback.
    ///
    /// Invalid values fall back to defaults and are returned so the caller can
    /// report them once a subscriber is installed.
    pub fn from_env(default_level: &str) -> (Self, Vec<EnvError>) {
        let mut parser = EnvParser::new();
        let level = parser.get_log_level("LOG", default_level).value;
        let format = match parser
            .get_choice("LOG_FORMAT", "pretty", &["pretty", "json"])
            .value
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        let file = parser.get_optional_string("LOG_FILE").value.map(PathBuf::from);

        let config = Self {
            level,
            format,
            file,
            stderr: false,
        };
        (config, parser.take_errors())
    }

    pub fn with_stderr(mut self) -> Self {
        self.stderr = true;
        self
    }

    pub fn with_level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            file: None,
            stderr: true,
        }
    }
}

/// Keeps background log writers alive; drop at the end of `main`.
#[must_use]
pub struct LoggingGuards {
    _file: Option<WorkerGuard>,
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<LoggingGuards> {
    let filter = EnvFilter::try_new(&config.level).or_else(|_| EnvFilter::try_new("warn"))?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.stderr {
        let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
            LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
            LogFormat::Pretty => fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact()
                .boxed(),
        };
        layers.push(layer);
    }

    let mut file_guard = None;
    if let Some(path) = &config.file {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        layers.push(fmt::layer().json().with_writer(writer).with_ansi(false).boxed());
        file_guard = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    Ok(LoggingGuards { _file: file_guard })
}
