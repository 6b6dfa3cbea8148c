//! Error Catalog for the JUnit Report Helper
//!
//! Every fatal condition the orchestrator or the converter can hit has a
//! stable code (JRH-E001 through JRH-E499), a message, and remediation steps.
//!
//! # Error Code Ranges
//!
//! | Range      | Category    | Description                               |
//! |------------|-------------|-------------------------------------------|
//! | E001-E099  | Environment | Interpreter, converter, executable lookup |
//! | E100-E199  | Input       | Input report file problems                |
//! | E200-E299  | Converter   | Converter process failures                |
//! | E300-E399  | Output      | Generated report artifact problems        |
//! | E400-E499  | Report      | JUnit XML parsing errors                  |
//!
//! # Example
//!
//! ```rust
//! use jrh_common::errors::catalog::ErrorCode;
//!
//! let entry = ErrorCode::InputNotFound.entry();
//! eprintln!("{}: {}", entry.code, entry.message);
//! for (n, step) in entry.remediation.iter().enumerate() {
//!     println!("  {}. {step}", n + 1);
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enumeration covering all JRH error scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    // =========================================================================
    // Environment Errors (E001-E099)
    // =========================================================================
    /// No interpreter candidate resolves on PATH
    InterpreterNotFound,
    /// Converter program is missing
    ConverterNotFound,
    /// Converter process could not be spawned
    ConverterLaunchFailed,
    /// Directory of the running executable could not be determined
    ExecutableDirUnknown,
    /// A `JRH_*` variable could not be parsed
    EnvConfigInvalid,

    // =========================================================================
    // Input Errors (E100-E199)
    // =========================================================================
    /// Input report file does not exist
    InputNotFound,
    /// Input report file could not be read
    InputUnreadable,
    /// Input report does not carry the expected extension (advisory)
    InputExtensionUnexpected,

    // =========================================================================
    // Converter Errors (E200-E299)
    // =========================================================================
    /// Converter exited with a non-zero status
    ConverterFailed,
    /// Converter was terminated by a signal
    ConverterKilled,

    // =========================================================================
    // Output Errors (E300-E399)
    // =========================================================================
    /// Converter reported success but the report file is absent
    OutputMissing,
    /// Report file could not be written
    OutputWriteFailed,

    // =========================================================================
    // Report Errors (E400-E499)
    // =========================================================================
    /// Input is not well-formed XML
    ReportXmlInvalid,
    /// XML contains no testsuite element
    ReportNoTestSuite,
    /// A numeric attribute could not be parsed
    ReportInvalidNumber,
}

impl ErrorCode {
    /// Numeric part of the code, e.g. `100` for `JRH-E100`.
    #[must_use]
    pub const fn code_number(&self) -> u16 {
        match self {
            // Environment (001-099)
            Self::InterpreterNotFound => 1,
            Self::ConverterNotFound => 2,
            Self::ConverterLaunchFailed => 3,
            Self::ExecutableDirUnknown => 4,
            Self::EnvConfigInvalid => 5,

            // Input (100-199)
            Self::InputNotFound => 100,
            Self::InputUnreadable => 101,
            Self::InputExtensionUnexpected => 102,

            // Converter (200-299)
            Self::ConverterFailed => 200,
            Self::ConverterKilled => 201,

            // Output (300-399)
            Self::OutputMissing => 300,
            Self::OutputWriteFailed => 301,

            // Report (400-499)
            Self::ReportXmlInvalid => 400,
            Self::ReportNoTestSuite => 401,
            Self::ReportInvalidNumber => 402,
        }
    }

    /// Returns the formatted error code string (e.g., "JRH-E001").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("JRH-E{:03}", self.code_number())
    }

    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.code_number() {
            1..=99 => ErrorCategory::Environment,
            100..=199 => ErrorCategory::Input,
            200..=299 => ErrorCategory::Converter,
            300..=399 => ErrorCategory::Output,
            _ => ErrorCategory::Report,
        }
    }

    /// Owned entry suitable for display or JSON.
    #[must_use]
    pub fn entry(&self) -> ErrorEntry {
        ErrorEntry {
            code: self.code_string(),
            category: self.category(),
            message: self.message().to_string(),
            remediation: self
                .remediation()
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    /// Short description without the code prefix.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::InterpreterNotFound => "No usable interpreter found on PATH",
            Self::ConverterNotFound => "Converter program not found",
            Self::ConverterLaunchFailed => "Failed to launch the converter process",
            Self::ExecutableDirUnknown => "Could not determine the directory of this executable",
            Self::EnvConfigInvalid => "Environment variable has invalid value",

            Self::InputNotFound => "Input report file not found",
            Self::InputUnreadable => "Input report file could not be read",
            Self::InputExtensionUnexpected => "Input report does not have an .xml extension",

            Self::ConverterFailed => "Converter exited with a non-zero status",
            Self::ConverterKilled => "Converter was terminated by a signal",

            Self::OutputMissing => "Converter succeeded but the expected report was not created",
            Self::OutputWriteFailed => "Failed to write the HTML report",

            Self::ReportXmlInvalid => "Input is not well-formed XML",
            Self::ReportNoTestSuite => "No testsuite element found in the report",
            Self::ReportInvalidNumber => "Report attribute is not a valid number",
        }
    }

    /// Returns remediation steps for the error.
    #[must_use]
    pub const fn remediation(&self) -> &'static [&'static str] {
        match self {
            Self::InterpreterNotFound => &[
                "Install python3 and make sure it is on PATH",
                "Set JRH_INTERPRETERS to a comma-separated list of interpreter names",
                "Use --native to run the built-in converter without an interpreter",
            ],
            Self::ConverterNotFound => &[
                "Place the converter next to the jrh executable",
                "Point --converter or JRH_CONVERTER at the converter program",
            ],
            Self::ConverterLaunchFailed => &[
                "Check that the converter (or its interpreter) is executable",
                "Run with --verbose to see the exact command line",
            ],
            Self::ExecutableDirUnknown => &[
                "Pass an absolute path with --converter",
            ],
            Self::EnvConfigInvalid => &[
                "Check JRH_* environment variables for typos",
                "Unset the variable to fall back to the default",
            ],
            Self::InputNotFound => &[
                "Check the input path for typos",
                "Make sure the test run actually produced a JUnit report",
            ],
            Self::InputUnreadable => &[
                "Check file permissions on the input report",
            ],
            Self::InputExtensionUnexpected => &[
                "Make sure the input is a JUnit XML report",
            ],
            Self::ConverterFailed => &[
                "Read the converter output above for the underlying error",
                "Validate the input report with an XML linter",
            ],
            Self::ConverterKilled => &[
                "Check for resource limits or an external kill",
                "Re-run the conversion",
            ],
            Self::OutputMissing => &[
                "Make sure the converter honors an explicit output path argument",
                "Check that the output directory is writable",
            ],
            Self::OutputWriteFailed => &[
                "Check that the output directory exists and is writable",
            ],
            Self::ReportXmlInvalid => &[
                "Check that the test run finished writing the report",
                "Validate the input report with an XML linter",
            ],
            Self::ReportNoTestSuite => &[
                "Make sure the report is in JUnit format (testsuites/testsuite/testcase)",
            ],
            Self::ReportInvalidNumber => &[
                "Check tests/failures/errors/skipped/time attributes for non-numeric values",
            ],
        }
    }

    /// Every code, in numeric order.
    #[must_use]
    pub const fn all() -> &'static [ErrorCode] {
        &[
            Self::InterpreterNotFound,
            Self::ConverterNotFound,
            Self::ConverterLaunchFailed,
            Self::ExecutableDirUnknown,
            Self::EnvConfigInvalid,
            Self::InputNotFound,
            Self::InputUnreadable,
            Self::InputExtensionUnexpected,
            Self::ConverterFailed,
            Self::ConverterKilled,
            Self::OutputMissing,
            Self::OutputWriteFailed,
            Self::ReportXmlInvalid,
            Self::ReportNoTestSuite,
            Self::ReportInvalidNumber,
        ]
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code_string(), self.message())
    }
}

/// Broad class of an [`ErrorCode`], one per hundred-block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Interpreter and converter lookup errors (E001-E099)
    Environment,
    /// Input report errors (E100-E199)
    Input,
    /// Converter process errors (E200-E299)
    Converter,
    /// Report artifact errors (E300-E399)
    Output,
    /// JUnit parsing errors (E400-E499)
    Report,
}

impl ErrorCategory {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Environment => "Environment",
            Self::Input => "Input",
            Self::Converter => "Converter",
            Self::Output => "Output",
            Self::Report => "Report",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Catalog entry as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Error code string (e.g., "JRH-E001")
    pub code: String,
    /// Error category
    pub category: ErrorCategory,
    /// One-line description
    pub message: String,
    /// What the user can try, in order
    pub remediation: Vec<String>,
}
