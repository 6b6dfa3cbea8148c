//! Typed access to `JRH_*` environment variables.
//!
//! Bad values never abort a lookup: the parser records an [`EnvError`],
//! hands back the default, and lets the caller report every problem at once.

use super::source::Sourced;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Invalid value for {var}: expected {expected}, got '{value}'")]
    InvalidValue {
        var: String,
        expected: String,
        value: String,
    },

    #[error("Value out of range for {var}: {value} (valid: {min}..={max})")]
    OutOfRange {
        var: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Invalid log level for {var}: {value}")]
    InvalidLogLevel { var: String, value: String },
}

/// Reads `JRH_`-prefixed variables and accumulates validation errors.
pub struct EnvParser {
    prefix: &'static str,
    errors: Vec<EnvError>,
}

impl EnvParser {
    pub fn new() -> Self {
        Self {
            prefix: "JRH_",
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[EnvError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Drain the errors collected so far.
    pub fn take_errors(&mut self) -> Vec<EnvError> {
        std::mem::take(&mut self.errors)
    }

    /// Full variable name and its value, if set to valid Unicode.
    fn lookup(&self, name: &str) -> (String, Option<String>) {
        let var = format!("{}{name}", self.prefix);
        let value = env::var(&var).ok();
        (var, value)
    }

    /// Integer in `min..=max`.
    ///
    /// Unparseable input falls back to a plain default; an out-of-range
    /// number falls back but stays attributed to the variable.
    pub fn get_u64_range(&mut self, name: &str, default: u64, min: u64, max: u64) -> Sourced<u64> {
        let (var, value) = self.lookup(name);
        let Some(raw) = value else {
            return Sourced::default_value(default);
        };

        match raw.trim().parse::<u64>() {
            Ok(n) if (min..=max).contains(&n) => Sourced::from_env(n, var),
            Ok(n) => {
                self.errors.push(EnvError::OutOfRange {
                    var: var.clone(),
                    value: n.to_string(),
                    min: min.to_string(),
                    max: max.to_string(),
                });
                Sourced::from_env(default, var)
            }
            Err(_) => {
                self.errors.push(EnvError::InvalidValue {
                    var,
                    expected: "unsigned 64-bit integer".to_string(),
                    value: raw,
                });
                Sourced::default_value(default)
            }
        }
    }

    /// One of `allowed`, matched case-insensitively and returned lowercase.
    pub fn get_choice(&mut self, name: &str, default: &str, allowed: &[&str]) -> Sourced<String> {
        let (var, value) = self.lookup(name);
        let Some(raw) = value else {
            return Sourced::default_value(default.to_string());
        };

        let lower = raw.trim().to_lowercase();
        if allowed.contains(&lower.as_str()) {
            return Sourced::from_env(lower, var);
        }
        self.errors.push(EnvError::InvalidValue {
            var: var.clone(),
            expected: format!("one of {}", allowed.join("/")),
            value: raw,
        });
        Sourced::from_env(default.to_string(), var)
    }

    /// Filesystem path with a leading `~/` expanded. Empty counts as unset.
    pub fn get_path(&mut self, name: &str, default: &str) -> Sourced<PathBuf> {
        match self.lookup(name) {
            (var, Some(raw)) if !raw.is_empty() => Sourced::from_env(expand_home(&raw), var),
            _ => Sourced::default_value(expand_home(default)),
        }
    }

    /// A `tracing` level name.
    pub fn get_log_level(&mut self, name: &str, default: &str) -> Sourced<String> {
        let (var, value) = self.lookup(name);
        let Some(raw) = value else {
            return Sourced::default_value(default.to_string());
        };

        let lower = raw.to_lowercase();
        if LOG_LEVELS.contains(&lower.as_str()) {
            Sourced::from_env(lower, var)
        } else {
            self.errors.push(EnvError::InvalidLogLevel {
                var: var.clone(),
                value: raw,
            });
            Sourced::from_env(default.to_string(), var)
        }
    }

    /// Comma-separated list. Set-but-empty yields an empty list.
    pub fn get_string_list(&mut self, name: &str, default: Vec<String>) -> Sourced<Vec<String>> {
        match self.lookup(name) {
            (var, Some(raw)) => Sourced::from_env(split_list(&raw), var),
            (_, None) => Sourced::default_value(default),
        }
    }

    /// Raw string; unset and empty both give `None`.
    pub fn get_optional_string(&mut self, name: &str) -> Sourced<Option<String>> {
        match self.lookup(name) {
            (var, Some(raw)) => Sourced::from_env(Some(raw).filter(|v| !v.is_empty()), var),
            (_, None) => Sourced::default_value(None),
        }
    }
}

impl Default for EnvParser {
    fn default() -> Self {
        Self::new()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn expand_home(value: &str) -> PathBuf {
    if let Some(stripped) = value.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(value)
}
