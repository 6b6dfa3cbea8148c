//! Argument and environment validation before the converter runs.
//!
//! Checks run in a fixed order and stop at the first fatal problem:
//! interpreter, converter program, input file. The input extension check is
//! advisory and only adds a warning to the report.

use crate::error::ReportError;
use jrh_common::{ErrorCode, has_report_extension};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything the pipeline needs to launch the converter.
#[derive(Debug, Clone)]
pub struct PreflightReport {
    /// Resolved interpreter, or `None` when the converter runs directly.
    pub interpreter: Option<PathBuf>,
    pub converter: PathBuf,
    pub input: PathBuf,
    pub issues: Vec<PreflightIssue>,
}

impl PreflightReport {
    pub fn warnings(&self) -> impl Iterator<Item = &PreflightIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity >= Severity::Warning)
    }

    fn log(&self) {
        for issue in &self.issues {
            match issue.severity {
                Severity::Info => info!(check = %issue.check, "{}", issue.message),
                Severity::Warning => warn!(check = %issue.check, "{}", issue.message),
            }
        }
    }
}

/// An issue found during preflight checks.
#[derive(Debug, Clone)]
pub struct PreflightIssue {
    pub severity: Severity,
    /// Which check found the issue.
    pub check: String,
    pub message: String,
    pub code: Option<ErrorCode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
}

/// Inputs to [`run_preflight`].
#[derive(Debug, Clone)]
pub struct PreflightRequest<'a> {
    pub input: &'a Path,
    /// Converter program; relative paths resolve against `exe_dir`.
    pub converter: &'a Path,
    /// Interpreter candidates in order of preference.
    pub interpreters: &'a [String],
    /// Directory holding the running orchestrator.
    pub exe_dir: &'a Path,
}

/// Directory of the running executable.
pub fn executable_dir() -> Result<PathBuf, ReportError> {
    let exe = std::env::current_exe().map_err(ReportError::ExecutableDirUnknown)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        ReportError::ExecutableDirUnknown(std::io::Error::other(format!(
            "{} has no parent directory",
            exe.display()
        )))
    })
}

/// File name of the native converter shipped next to `jrh`.
pub fn native_converter_name() -> String {
    format!("jrh-convert{}", std::env::consts::EXE_SUFFIX)
}

/// Absolute converter paths are kept; relative ones hang off `exe_dir`.
pub fn resolve_converter(converter: &Path, exe_dir: &Path) -> PathBuf {
    if converter.is_absolute() {
        converter.to_path_buf()
    } else {
        exe_dir.join(converter)
    }
}

/// First candidate that `lookup` resolves.
pub fn find_interpreter<F>(candidates: &[String], lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    candidates.iter().find_map(|name| {
        let found = lookup(name);
        debug!(candidate = %name, found = ?found, "Interpreter lookup");
        found
    })
}

/// Validate the environment and input, using `lookup` to search `PATH`.
pub fn run_preflight<F>(request: &PreflightRequest<'_>, lookup: F) -> Result<PreflightReport, ReportError>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    let mut issues = Vec::new();

    let interpreter = if request.interpreters.is_empty() {
        issues.push(PreflightIssue {
            severity: Severity::Info,
            check: "interpreter".to_string(),
            message: "Converter runs directly; no interpreter required".to_string(),
            code: None,
        });
        None
    } else {
        let found = find_interpreter(request.interpreters, lookup).ok_or_else(|| {
            ReportError::InterpreterNotFound {
                candidates: request.interpreters.to_vec(),
            }
        })?;
        Some(found)
    };

    let converter = resolve_converter(request.converter, request.exe_dir);
    if !converter.is_file() {
        return Err(ReportError::ConverterNotFound { path: converter });
    }

    if !request.input.exists() {
        return Err(ReportError::InputNotFound {
            path: request.input.to_path_buf(),
        });
    }

    if !has_report_extension(request.input) {
        issues.push(PreflightIssue {
            severity: Severity::Warning,
            check: "input".to_string(),
            message: format!(
                "Input file does not have a .xml extension: {}",
                request.input.display()
            ),
            code: Some(ErrorCode::InputExtensionUnexpected),
        });
    }

    let report = PreflightReport {
        interpreter,
        converter,
        input: request.input.to_path_buf(),
        issues,
    };
    report.log();
    Ok(report)
}
