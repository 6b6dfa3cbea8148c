//! JUnit XML report model and parser.
//!
//! Reads the first `<testsuite>` of a report: either a direct child of the
//! root element (`<testsuites><testsuite>..`) or the root itself. Additional
//! suites are skipped with a warning.

use crate::errors::ErrorCode;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Outcome of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Passed,
    Failed,
    Skipped,
    Error,
}

impl CaseStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Error => "error",
        }
    }

    // skipped > error > failure when a case carries several outcome elements
    const fn precedence(&self) -> u8 {
        match self {
            Self::Passed => 0,
            Self::Failed => 1,
            Self::Error => 2,
            Self::Skipped => 3,
        }
    }

    const fn default_detail(&self) -> &'static str {
        match self {
            Self::Passed => "",
            Self::Failed => "Test failed",
            Self::Skipped => "Skipped",
            Self::Error => "Error occurred",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<testcase>` element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase {
    pub name: String,
    pub classname: String,
    /// Duration in seconds.
    pub time: f64,
    pub status: CaseStatus,
    /// Skip reason, error, or failure text. `None` for passed cases.
    pub detail: Option<String>,
    /// Trimmed `<system-out>` content.
    pub system_out: Option<String>,
}

/// One `<testsuite>` element with its test cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSuite {
    pub name: String,
    pub tests: u64,
    pub disabled: u64,
    pub errors: u64,
    pub failures: u64,
    pub skipped: u64,
    /// Duration in seconds.
    pub time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    /// Tests that neither failed, errored, nor were skipped.
    pub fn passed(&self) -> u64 {
        self.tests
            .saturating_sub(self.errors)
            .saturating_sub(self.failures)
            .saturating_sub(self.skipped)
    }

    pub fn summary(&self) -> SuiteSummary {
        SuiteSummary {
            name: self.name.clone(),
            tests: self.tests,
            passed: self.passed(),
            failures: self.failures,
            errors: self.errors,
            skipped: self.skipped,
            time: self.time,
            cases: self.cases.len(),
        }
    }
}

/// Counts reported after a conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteSummary {
    pub name: String,
    pub tests: u64,
    pub passed: u64,
    pub failures: u64,
    pub errors: u64,
    pub skipped: u64,
    pub time: f64,
    pub cases: usize,
}

impl fmt::Display for SuiteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tests, {} passed, {} failed, {} errors, {} skipped",
            self.tests, self.passed, self.failures, self.errors, self.skipped
        )
    }
}

/// Errors raised while reading a JUnit report.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("No testsuite found in XML")]
    NoTestSuite,

    #[error("Invalid value for attribute '{attribute}': '{value}'")]
    InvalidNumber { attribute: String, value: String },
}

impl ParseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::InputUnreadable,
            Self::Xml { .. } => ErrorCode::ReportXmlInvalid,
            Self::NoTestSuite => ErrorCode::ReportNoTestSuite,
            Self::InvalidNumber { .. } => ErrorCode::ReportInvalidNumber,
        }
    }
}

/// Read and parse a JUnit report from disk.
pub fn parse_file(path: &Path) -> Result<TestSuite, ParseError> {
    let xml = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&xml)
}

/// Parse a JUnit report held in memory.
pub fn parse_str(xml: &str) -> Result<TestSuite, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut parser = SuiteParser::default();
    let mut depth = 0usize;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader.read_event().map_err(|e| xml_error(position, e))?;
        match event {
            Event::Start(e) => {
                parser.open(&e, depth, position)?;
                depth += 1;
            }
            Event::Empty(e) => {
                parser.open(&e, depth, position)?;
                parser.close(depth);
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                parser.close(depth);
            }
            Event::Text(t) => {
                if parser.capturing() {
                    let text = t.unescape().map_err(|e| xml_error(position, e))?;
                    parser.text(&text);
                }
            }
            Event::CData(c) => {
                if parser.capturing() {
                    parser.text(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    parser.finish()
}

fn xml_error(position: u64, err: impl fmt::Display) -> ParseError {
    ParseError::Xml {
        position,
        message: err.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureKind {
    Outcome(CaseStatus),
    SystemOut,
}

#[derive(Debug)]
struct Capture {
    kind: CaptureKind,
    depth: usize,
    message: Option<String>,
    text: String,
}

#[derive(Debug, Default)]
struct SuiteParser {
    suite: Option<(TestSuite, usize)>,
    finished: Option<TestSuite>,
    ignored_suites: usize,
    case: Option<(TestCase, usize)>,
    capture: Option<Capture>,
}

impl SuiteParser {
    fn capturing(&self) -> bool {
        self.capture.is_some()
    }

    fn open(&mut self, e: &BytesStart<'_>, depth: usize, position: u64) -> Result<(), ParseError> {
        let name = e.local_name();
        match name.as_ref() {
            b"testsuite" if depth <= 1 => {
                if self.suite.is_some() || self.finished.is_some() {
                    self.ignored_suites += 1;
                } else {
                    let attrs = attributes(e, position)?;
                    self.suite = Some((suite_from_attrs(&attrs)?, depth));
                }
            }
            b"testcase" => {
                if self.suite.as_ref().is_some_and(|(_, d)| depth == d + 1) {
                    let attrs = attributes(e, position)?;
                    self.case = Some((case_from_attrs(&attrs)?, depth));
                }
            }
            tag => {
                if !self.case.as_ref().is_some_and(|(_, d)| depth == d + 1) {
                    return Ok(());
                }
                let kind = match tag {
                    b"skipped" => CaptureKind::Outcome(CaseStatus::Skipped),
                    b"error" => CaptureKind::Outcome(CaseStatus::Error),
                    b"failure" => CaptureKind::Outcome(CaseStatus::Failed),
                    b"system-out" => CaptureKind::SystemOut,
                    _ => return Ok(()),
                };
                let mut attrs = attributes(e, position)?;
                self.capture = Some(Capture {
                    kind,
                    depth,
                    message: attrs.remove("message"),
                    text: String::new(),
                });
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if let Some(capture) = self.capture.as_mut() {
            capture.text.push_str(text);
        }
    }

    fn close(&mut self, depth: usize) {
        if self.capture.as_ref().is_some_and(|c| c.depth == depth) {
            if let (Some(capture), Some((case, _))) = (self.capture.take(), self.case.as_mut()) {
                apply_capture(case, capture);
            }
            return;
        }

        if self.case.as_ref().is_some_and(|(_, d)| *d == depth) {
            if let (Some((case, _)), Some((suite, _))) = (self.case.take(), self.suite.as_mut()) {
                suite.cases.push(case);
            }
            return;
        }

        if self.suite.as_ref().is_some_and(|(_, d)| *d == depth)
            && let Some((suite, _)) = self.suite.take()
        {
            self.finished = Some(suite);
        }
    }

    fn finish(self) -> Result<TestSuite, ParseError> {
        if self.ignored_suites > 0 {
            warn!(
                ignored = self.ignored_suites,
                "Report contains more than one testsuite; only the first is rendered"
            );
        }
        let suite = self
            .finished
            .or(self.suite.map(|(suite, _)| suite))
            .ok_or(ParseError::NoTestSuite)?;
        debug!(
            suite = %suite.name,
            cases = suite.cases.len(),
            "Parsed JUnit testsuite"
        );
        Ok(suite)
    }
}

fn apply_capture(case: &mut TestCase, capture: Capture) {
    let text = capture.text.trim();
    match capture.kind {
        CaptureKind::Outcome(status) => {
            if status.precedence() <= case.status.precedence() {
                return;
            }
            let detail = if !text.is_empty() {
                text.to_string()
            } else {
                capture
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| status.default_detail().to_string())
            };
            case.status = status;
            case.detail = Some(detail);
        }
        CaptureKind::SystemOut => {
            if text.is_empty() {
                return;
            }
            match case.system_out.as_mut() {
                Some(existing) => {
                    existing.push('\n');
                    existing.push_str(text);
                }
                None => case.system_out = Some(text.to_string()),
            }
        }
    }
}

fn attributes(e: &BytesStart<'_>, position: u64) -> Result<HashMap<String, String>, ParseError> {
    let mut attrs = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_error(position, err))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| xml_error(position, err))?
            .into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn suite_from_attrs(attrs: &HashMap<String, String>) -> Result<TestSuite, ParseError> {
    Ok(TestSuite {
        name: text_attr(attrs, "name", "Unknown"),
        tests: count_attr(attrs, "tests")?,
        disabled: count_attr(attrs, "disabled")?,
        errors: count_attr(attrs, "errors")?,
        failures: count_attr(attrs, "failures")?,
        skipped: count_attr(attrs, "skipped")?,
        time: time_attr(attrs, "time")?,
        timestamp: attrs.get("timestamp").cloned(),
        hostname: attrs.get("hostname").cloned(),
        cases: Vec::new(),
    })
}

fn case_from_attrs(attrs: &HashMap<String, String>) -> Result<TestCase, ParseError> {
    Ok(TestCase {
        name: text_attr(attrs, "name", "Unknown"),
        classname: text_attr(attrs, "classname", ""),
        time: time_attr(attrs, "time")?,
        status: CaseStatus::Passed,
        detail: None,
        system_out: None,
    })
}

fn text_attr(attrs: &HashMap<String, String>, key: &str, default: &str) -> String {
    attrs
        .get(key)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn count_attr(attrs: &HashMap<String, String>, key: &str) -> Result<u64, ParseError> {
    match attrs.get(key) {
        None => Ok(0),
        Some(raw) => raw.trim().parse().map_err(|_| ParseError::InvalidNumber {
            attribute: key.to_string(),
            value: raw.clone(),
        }),
    }
}

fn time_attr(attrs: &HashMap<String, String>, key: &str) -> Result<f64, ParseError> {
    match attrs.get(key) {
        None => Ok(0.0),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite())
            .ok_or_else(|| ParseError::InvalidNumber {
                attribute: key.to_string(),
                value: raw.clone(),
            }),
    }
}
