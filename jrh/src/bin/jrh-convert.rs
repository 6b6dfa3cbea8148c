//! jrh-convert: native JUnit XML to HTML converter.
//!
//! Honors the converter contract used by `jrh`: takes an input report path
//! and an optional output path, writes exactly one HTML document, and exits
//! non-zero on any failure.

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{ArgAction, Parser};
use jrh_common::{LogConfig, init_logging, junit, render_html, resolve_output_path};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "jrh-convert", version)]
#[command(about = "Convert a JUnit XML report into a self-contained HTML page")]
struct Cli {
    /// JUnit XML report to read
    input: PathBuf,

    /// HTML file to write. A bare file name is placed next to the input
    output: Option<PathBuf>,

    /// Print the suite summary as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity [env: JRH_LOG]
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
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

    let (log_config, env_errors) = LogConfig::from_env("warn");
    let mut log_config = log_config.with_stderr();
    match cli.verbose {
        0 => {}
        1 => log_config = log_config.with_level("info"),
        _ => log_config = log_config.with_level("debug"),
    }
    let _guards = init_logging(&log_config).ok();
    for err in &env_errors {
        warn!("{err} (using default)");
    }

    match convert(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn convert(cli: &Cli) -> Result<()> {
    if !cli.input.exists() {
        bail!("Input file not found: {}", cli.input.display());
    }
    let output = resolve_output_path(&cli.input, cli.output.as_deref());

    println!("Parsing JUnit XML: {}", cli.input.display());
    let suite = junit::parse_file(&cli.input)
        .map_err(|e| anyhow::anyhow!("[{}] {e}", e.code().code_string()))?;
    info!(suite = %suite.name, cases = suite.cases.len(), "Parsed report");

    println!("Generating HTML report: {}", output.display());
    let html = render_html(&suite, &cli.input, Local::now());
    write_report(&output, &html)?;

    let summary = suite.summary();
    println!("✅ Report generated successfully!");
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("📊 Summary: {summary}");
    }

    let absolute = std::path::absolute(&output).unwrap_or_else(|_| output.clone());
    println!(
        "\n🌐 Open the report in your browser: file://{}",
        absolute.display()
    );
    Ok(())
}

fn write_report(output: &Path, html: &str) -> Result<()> {
    debug!(path = %output.display(), bytes = html.len(), "Writing report");
    std::fs::write(output, html).with_context(|| {
        format!(
            "[{}] Failed to write {}",
            jrh_common::ErrorCode::OutputWriteFailed.code_string(),
            output.display()
        )
    })
}
