//! Configuration system for JRH.
//!
//! Settings come from built-in defaults, `JRH_*` environment variables, and
//! command-line flags, in increasing order of precedence. Every value keeps
//! track of where it came from.

pub mod env;
pub mod settings;
pub mod source;

pub use env::{EnvError, EnvParser};
pub use settings::{BrowserMode, ColorChoice, Settings};
pub use source::{ConfigSource, Sourced};

#[cfg(test)]
pub(crate) fn env_test_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
