//! The report pipeline: validate, convert, verify, and optionally open.

use crate::browser::BrowserLauncher;
use crate::error::ReportError;
use crate::preflight::{PreflightRequest, run_preflight};
use crate::prompt::Prompter;
use crate::runner::{CommandRunner, Invocation};
use crate::ui::{OutputContext, StatusIndicator};
use jrh_common::{BrowserMode, resolve_output_path};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// One orchestrator run, fully resolved from CLI and environment.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub converter: PathBuf,
    pub interpreters: Vec<String>,
    pub browser: BrowserMode,
    pub prompt_timeout: Duration,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub absolute: PathBuf,
    pub opened: bool,
}

type PathLookup<'a> = Box<dyn Fn(&str) -> Option<PathBuf> + 'a>;

pub struct Orchestrator<'a> {
    runner: &'a dyn CommandRunner,
    prompter: &'a dyn Prompter,
    browser: &'a dyn BrowserLauncher,
    ctx: OutputContext,
    exe_dir: PathBuf,
    lookup: PathLookup<'a>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        prompter: &'a dyn Prompter,
        browser: &'a dyn BrowserLauncher,
        ctx: OutputContext,
        exe_dir: PathBuf,
    ) -> Self {
        Self {
            runner,
            prompter,
            browser,
            ctx,
            exe_dir,
            lookup: Box::new(|name| which::which(name).ok()),
        }
    }

    /// Replace the `PATH` search used for interpreter lookup.
    pub fn with_lookup(mut self, lookup: impl Fn(&str) -> Option<PathBuf> + 'a) -> Self {
        self.lookup = Box::new(lookup);
        self
    }

    pub fn run(&self, options: &RunOptions) -> Result<RunSummary, ReportError> {
        let style = self.ctx.theme();

        let request = PreflightRequest {
            input: &options.input,
            converter: &options.converter,
            interpreters: &options.interpreters,
            exe_dir: &self.exe_dir,
        };
        let preflight = run_preflight(&request, |name| (self.lookup)(name))?;
        for issue in preflight.warnings() {
            eprintln!(
                "{} {} {}",
                StatusIndicator::Warning.display(style),
                style.warning("Warning:"),
                issue.message
            );
        }

        let output = resolve_output_path(&options.input, options.output.as_deref());
        let invocation = build_invocation(
            preflight.interpreter.as_deref(),
            &preflight.converter,
            &options.input,
            &output,
        );
        info!(
            input = %options.input.display(),
            output = %output.display(),
            converter = %preflight.converter.display(),
            "Running converter"
        );

        let outcome = self
            .runner
            .run(&invocation)
            .map_err(|source| ReportError::ConverterLaunch {
                program: invocation.program.clone(),
                source,
            })?;
        if !outcome.is_success() {
            return Err(ReportError::ConverterFailed { code: outcome.code });
        }

        if !output.is_file() {
            return Err(ReportError::OutputMissing { path: output });
        }

        let absolute = absolute_path(&output);
        println!(
            "{} {}",
            StatusIndicator::Success.display(style),
            style.success("HTML report generated successfully!")
        );
        println!(
            "  {} Report: {}",
            StatusIndicator::Info.display(style),
            output.display()
        );
        println!(
            "  {} Absolute path: {}",
            StatusIndicator::Info.display(style),
            style.highlight(&absolute.display().to_string())
        );

        let opened = self.maybe_open(&absolute, options);
        Ok(RunSummary {
            output,
            absolute,
            opened,
        })
    }

    fn maybe_open(&self, report: &Path, options: &RunOptions) -> bool {
        if !self.browser.available() {
            debug!("No browser launcher for this platform");
            return false;
        }

        let wanted = match options.browser {
            BrowserMode::Never => false,
            BrowserMode::Always => true,
            BrowserMode::Ask => self.prompter.confirm(
                "Open report in browser?",
                options.prompt_timeout,
                false,
            ),
        };
        if !wanted {
            return false;
        }

        match self.browser.open(report) {
            Ok(()) => true,
            Err(e) => {
                warn!(launcher = self.browser.name(), error = %e, "Failed to open browser");
                let style = self.ctx.theme();
                eprintln!(
                    "{} Could not open browser with {}: {e}",
                    StatusIndicator::Warning.display(style),
                    self.browser.name()
                );
                false
            }
        }
    }
}

/// Converter command line; the output path is always passed explicitly.
pub fn build_invocation(
    interpreter: Option<&Path>,
    converter: &Path,
    input: &Path,
    output: &Path,
) -> Invocation {
    let base = match interpreter {
        Some(interpreter) => Invocation::new(interpreter).arg(converter),
        None => Invocation::new(converter),
    };
    base.arg(input).arg(output)
}

fn absolute_path(path: &Path) -> PathBuf {
    match std::fs::canonicalize(path) {
        Ok(abs) => abs,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Canonicalize failed");
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    }
}
