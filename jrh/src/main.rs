//! JUnit Report Helper (jrh)
//!
//! Turns a JUnit XML result file into a browsable HTML report by running a
//! converter program, verifying the report was written, and optionally
//! opening it in the platform browser.

mod browser;
mod error;
mod pipeline;
mod preflight;
mod prompt;
mod runner;
mod ui;

use clap::{ArgAction, CommandFactory, Parser};
use error::ReportError;
use jrh_common::{BrowserMode, ColorChoice, ErrorCode, LogConfig, Settings, init_logging};
use pipeline::{Orchestrator, RunOptions};
use preflight::{executable_dir, native_converter_name};
use prompt::TerminalPrompter;
use runner::SystemRunner;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use ui::{OutputContext, StatusIndicator};

#[derive(Parser, Debug)]
#[command(name = "jrh")]
#[command(
    version,
    about = "JUnit Report Helper - convert JUnit XML results into an HTML report"
)]
#[command(after_help = "EXAMPLES:
    jrh reports/run.xml                      writes reports/run_report.html
    jrh reports/run.xml summary.html         writes reports/summary.html
    jrh reports/run.xml /tmp/out/summary.html
    jrh --native --no-open reports/run.xml")]
struct Cli {
    /// JUnit XML report to convert
    input: PathBuf,

    /// Output HTML file. A bare file name is placed next to the input
    output: Option<PathBuf>,

    /// Converter program, relative to the jrh executable unless absolute [env: JRH_CONVERTER]
    #[arg(long, value_name = "PATH", conflicts_with = "native")]
    converter: Option<PathBuf>,

    /// Use the bundled jrh-convert binary; no interpreter needed
    #[arg(long)]
    native: bool,

    /// Open the report in a browser without asking [env: JRH_OPEN_BROWSER=always]
    #[arg(long, conflicts_with = "no_open")]
    open: bool,

    /// Never offer to open the report [env: JRH_OPEN_BROWSER=never]
    #[arg(long)]
    no_open: bool,

    /// Seconds to wait for an answer to the open prompt; 0 disables it [env: JRH_PROMPT_TIMEOUT_SECS]
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(0..=300))]
    prompt_timeout: Option<u64>,

    /// Colorize output [env: JRH_COLOR]
    #[arg(long, value_name = "WHEN", value_parser = ["auto", "always", "never"])]
    color: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace) [env: JRH_LOG]
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn browser_override(&self) -> Option<BrowserMode> {
        if self.open {
            Some(BrowserMode::Always)
        } else if self.no_open {
            Some(BrowserMode::Never)
        } else {
            None
        }
    }

    fn log_level(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

/// No arguments, or a help flag in first position, means usage and success.
fn wants_help(args: &[OsString]) -> bool {
    match args.first() {
        None => true,
        Some(first) => first == "-h" || first == "--help",
    }
}

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();
    if wants_help(args.get(1..).unwrap_or_default()) {
        let _ = Cli::command().print_help();
        println!();
        return ExitCode::SUCCESS;
    }

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let (log_config, mut env_errors) = LogConfig::from_env("warn");
    let mut log_config = log_config.with_stderr();
    if let Some(level) = cli.log_level() {
        log_config = log_config.with_level(level);
    }
    let _guards = match init_logging(&log_config) {
        Ok(guards) => Some(guards),
        Err(e) => {
            eprintln!("warning: failed to initialize logging: {e}");
            None
        }
    };

    let (settings, settings_errors) = Settings::from_env();
    env_errors.extend(settings_errors);
    let settings = apply_cli(settings, &cli);
    let ctx = OutputContext::detect(settings.color.value);
    let style = ctx.theme();

    for err in &env_errors {
        warn!(code = %ErrorCode::EnvConfigInvalid.code_string(), "{err}");
        eprintln!(
            "{} {} {err} (using default)",
            StatusIndicator::Warning.display(style),
            style.warning("Warning:")
        );
    }

    match run(&cli, &settings, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, &ctx);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

fn apply_cli(mut settings: Settings, cli: &Cli) -> Settings {
    if cli.native {
        settings
            .converter
            .override_with(Some(PathBuf::from(native_converter_name())));
        settings.interpreters.override_with(Some(Vec::new()));
    }
    settings.converter.override_with(cli.converter.clone());
    settings.browser.override_with(cli.browser_override());
    settings.prompt_timeout_secs.override_with(cli.prompt_timeout);
    settings
        .color
        .override_with(cli.color.as_deref().and_then(|c| c.parse::<ColorChoice>().ok()));
    settings
}

fn run(cli: &Cli, settings: &Settings, ctx: OutputContext) -> Result<(), ReportError> {
    debug!(
        converter = %settings.converter.value.display(),
        converter_source = %settings.converter.describe_source(),
        interpreters = ?settings.interpreters.value,
        browser = ?settings.browser.value,
        prompt_timeout_secs = settings.prompt_timeout_secs.value,
        "Resolved settings"
    );

    let exe_dir = executable_dir()?;
    let runner = SystemRunner;
    let prompter = TerminalPrompter::new(ctx.is_interactive());
    let launcher = browser::detect();
    let orchestrator = Orchestrator::new(&runner, &prompter, launcher.as_ref(), ctx, exe_dir);

    let options = RunOptions {
        input: cli.input.clone(),
        output: cli.output.clone(),
        converter: settings.converter.value.clone(),
        interpreters: settings.interpreters.value.clone(),
        browser: settings.browser.value,
        prompt_timeout: settings.prompt_timeout(),
    };
    let summary = orchestrator.run(&options)?;
    debug!(
        output = %summary.output.display(),
        absolute = %summary.absolute.display(),
        opened = summary.opened,
        "Report ready"
    );
    Ok(())
}

fn report_error(err: &ReportError, ctx: &OutputContext) {
    let style = ctx.theme();
    let entry = err.code().entry();
    eprintln!(
        "{} {} {err}",
        StatusIndicator::Error.display(style),
        style.error(&format!("[{}]", entry.code))
    );
    for step in &entry.remediation {
        eprintln!("  {} {}", style.muted("→"), step);
    }
}
