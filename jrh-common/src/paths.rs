//! Output path resolution for generated reports.
//!
//! Both the orchestrator and the native converter resolve the report
//! destination through [`resolve_output_path`], so they always agree on
//! where the HTML file lands.

use std::path::{Path, PathBuf, is_separator};

/// Suffix appended to the input stem when no output path is given.
pub const REPORT_SUFFIX: &str = "_report.html";

/// Extension expected on structured test reports.
pub const REPORT_INPUT_EXTENSION: &str = "xml";

/// Resolve where the HTML report for `input` should be written.
///
/// - `output` containing a path separator is used verbatim.
/// - `output` without a separator is placed next to `input`.
/// - no `output` yields `<input-dir>/<input-stem>_report.html`.
///
/// Performs no I/O.
pub fn resolve_output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    let input_dir = input.parent().unwrap_or_else(|| Path::new(""));

    match output {
        Some(out) if has_separator(out) => out.to_path_buf(),
        Some(out) => input_dir.join(out),
        None => input_dir.join(default_report_name(input)),
    }
}

/// Default report file name for an input path (`run.xml` -> `run_report.html`).
pub fn default_report_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}{REPORT_SUFFIX}")
}

/// Whether the path carries a `.xml` extension (case-insensitive).
pub fn has_report_extension(input: &Path) -> bool {
    input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(REPORT_INPUT_EXTENSION))
}

fn has_separator(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().chars().any(is_separator)
}
