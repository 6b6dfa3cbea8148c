//! Fatal orchestrator errors.

use jrh_common::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("No interpreter found on PATH (tried: {})", candidates.join(", "))]
    InterpreterNotFound { candidates: Vec<String> },

    #[error("Converter not found at {}", path.display())]
    ConverterNotFound { path: PathBuf },

    #[error("Cannot determine the directory of the running executable: {0}")]
    ExecutableDirUnknown(#[source] std::io::Error),

    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to launch converter {}: {source}", program.display())]
    ConverterLaunch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", converter_failed_message(*code))]
    ConverterFailed { code: Option<i32> },

    #[error("Converter exited successfully but the report was not created: {}", path.display())]
    OutputMissing { path: PathBuf },
}

fn converter_failed_message(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("Converter failed with exit status {code}"),
        None => "Converter was terminated by a signal".to_string(),
    }
}

impl ReportError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InterpreterNotFound { .. } => ErrorCode::InterpreterNotFound,
            Self::ConverterNotFound { .. } => ErrorCode::ConverterNotFound,
            Self::ExecutableDirUnknown(_) => ErrorCode::ExecutableDirUnknown,
            Self::InputNotFound { .. } => ErrorCode::InputNotFound,
            Self::ConverterLaunch { .. } => ErrorCode::ConverterLaunchFailed,
            Self::ConverterFailed { code: Some(_) } => ErrorCode::ConverterFailed,
            Self::ConverterFailed { code: None } => ErrorCode::ConverterKilled,
            Self::OutputMissing { .. } => ErrorCode::OutputMissing,
        }
    }

    /// Process exit status for this failure.
    ///
    /// A converter's own non-zero status is passed through; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConverterFailed { code: Some(code) } if *code != 0 => *code,
            _ => 1,
        }
    }
}
