//! Orchestrator settings resolved from the environment.

use super::env::{EnvError, EnvParser};
use super::source::Sourced;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Converter program looked up next to the `jrh` executable.
pub const DEFAULT_CONVERTER: &str = "junit_to_html.py";

/// Interpreter candidates, tried in order.
pub const DEFAULT_INTERPRETERS: &[&str] = &["python3", "python"];

pub const DEFAULT_PROMPT_TIMEOUT_SECS: u64 = 10;
pub const MAX_PROMPT_TIMEOUT_SECS: u64 = 300;

/// When to colorize terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub const VARIANTS: &'static [&'static str] = &["auto", "always", "never"];
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(format!("unknown color choice '{other}'")),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Always => write!(f, "always"),
            Self::Never => write!(f, "never"),
        }
    }
}

/// What to do with the finished report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserMode {
    /// Prompt with a bounded wait, defaulting to no.
    #[default]
    Ask,
    /// Open without prompting.
    Always,
    /// Never open or prompt.
    Never,
}

impl BrowserMode {
    pub const VARIANTS: &'static [&'static str] = &["ask", "always", "never"];
}

impl FromStr for BrowserMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ask" => Ok(Self::Ask),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(format!("unknown browser mode '{other}'")),
        }
    }
}

/// Settings for one orchestrator run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Converter program; relative paths resolve against the executable directory.
    pub converter: Sourced<PathBuf>,
    /// Interpreter candidates. Empty means the converter runs directly.
    pub interpreters: Sourced<Vec<String>>,
    pub prompt_timeout_secs: Sourced<u64>,
    pub browser: Sourced<BrowserMode>,
    pub color: Sourced<ColorChoice>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            converter: Sourced::default_value(PathBuf::from(DEFAULT_CONVERTER)),
            interpreters: Sourced::default_value(
                DEFAULT_INTERPRETERS.iter().map(|s| (*s).to_string()).collect(),
            ),
            prompt_timeout_secs: Sourced::default_value(DEFAULT_PROMPT_TIMEOUT_SECS),
            browser: Sourced::default_value(BrowserMode::Ask),
            color: Sourced::default_value(ColorChoice::Auto),
        }
    }
}

impl Settings {
    /// Load settings from `JRH_*` variables.
    ///
    /// Invalid values fall back to defaults; the problems are returned so the
    /// caller can surface them as warnings.
    pub fn from_env() -> (Self, Vec<EnvError>) {
        let mut parser = EnvParser::new();
        let defaults = Self::default();

        let settings = Self {
            converter: parser.get_path("CONVERTER", DEFAULT_CONVERTER),
            interpreters: parser
                .get_string_list("INTERPRETERS", defaults.interpreters.value.clone()),
            prompt_timeout_secs: parser.get_u64_range(
                "PROMPT_TIMEOUT_SECS",
                DEFAULT_PROMPT_TIMEOUT_SECS,
                0,
                MAX_PROMPT_TIMEOUT_SECS,
            ),
            browser: parser
                .get_choice("OPEN_BROWSER", "ask", BrowserMode::VARIANTS)
                .map(|v| v.parse().unwrap_or_default()),
            color: parser
                .get_choice("COLOR", "auto", ColorChoice::VARIANTS)
                .map(|v| v.parse().unwrap_or_default()),
        };

        (settings, parser.take_errors())
    }

    pub fn prompt_timeout(&self) -> Duration {
        Duration::from_secs(self.prompt_timeout_secs.value)
    }

    /// Whether an interpreter must be resolved before running the converter.
    pub fn needs_interpreter(&self) -> bool {
        !self.interpreters.value.is_empty()
    }
}
