//! Converter process execution.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// A fully resolved converter command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ExitOutcome {
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs converter invocations to completion.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<ExitOutcome>;
}

/// Spawns real processes sharing this process's stdout and stderr.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<ExitOutcome> {
        debug!(
            program = %invocation.program.display(),
            args = ?invocation.args,
            "Spawning converter"
        );
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        debug!(status = ?status.code(), "Converter exited");
        Ok(ExitOutcome {
            code: status.code(),
        })
    }
}
