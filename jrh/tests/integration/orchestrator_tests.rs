use std::fs;

use crate::common::fixtures::{FAILING_CONVERTER, SILENT_CONVERTER, WRITING_CONVERTER};
use crate::common::{
    ReportDir, assert_contains, assert_exit_code, assert_path_exists, init_test_logging,
    jrh_command,
};

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_no_arguments_prints_usage_and_succeeds() {
    init_test_logging();
    crate::test_log!("TEST START: test_no_arguments_prints_usage_and_succeeds");

    let output = jrh_command().output().expect("Failed to run jrh");

    assert_exit_code(&output, 0);
    assert_contains(&stdout_of(&output), "Usage");
    crate::test_log!("TEST PASS: test_no_arguments_prints_usage_and_succeeds");
}

#[test]
fn test_help_first_wins_over_other_arguments() {
    init_test_logging();
    crate::test_log!("TEST START: test_help_first_wins_over_other_arguments");

    for flag in ["-h", "--help"] {
        let output = jrh_command()
            .args([flag, "does-not-exist.xml", "--bogus-flag"])
            .output()
            .expect("Failed to run jrh");

        assert_exit_code(&output, 0);
        assert_contains(&stdout_of(&output), "JUnit Report Helper");
    }
    crate::test_log!("TEST PASS: test_help_first_wins_over_other_arguments");
}

#[test]
fn test_missing_interpreter_is_fatal() {
    init_test_logging();
    crate::test_log!("TEST START: test_missing_interpreter_is_fatal");

    let fixture = ReportDir::new();
    let output = jrh_command()
        .env("JRH_INTERPRETERS", "jrh-no-such-interpreter-a,jrh-no-such-interpreter-b")
        .arg(&fixture.input)
        .arg("--no-open")
        .output()
        .expect("Failed to run jrh");

    assert_exit_code(&output, 1);
    let stderr = stderr_of(&output);
    assert_contains(&stderr, "JRH-E001");
    assert_contains(&stderr, "jrh-no-such-interpreter-a, jrh-no-such-interpreter-b");
    crate::test_log!("TEST PASS: test_missing_interpreter_is_fatal");
}

#[test]
fn test_missing_converter_is_fatal() {
    init_test_logging();
    crate::test_log!("TEST START: test_missing_converter_is_fatal");

    let fixture = ReportDir::new();
    let output = jrh_command()
        .env("JRH_INTERPRETERS", "")
        .arg("--converter")
        .arg(fixture.path().join("missing-converter"))
        .arg(&fixture.input)
        .output()
        .expect("Failed to run jrh");

    assert_exit_code(&output, 1);
    assert_contains(&stderr_of(&output), "JRH-E002");
    crate::test_log!("TEST PASS: test_missing_converter_is_fatal");
}

#[cfg(unix)]
#[test]
fn test_missing_input_fails_before_converter_runs() {
    init_test_logging();
    crate::test_log!("TEST START: test_missing_input_fails_before_converter_runs");

    let fixture = ReportDir::new();
    let converter = fixture.converter(SILENT_CONVERTER);
    let missing = fixture.reports.join("absent.xml");

    let output = jrh_command()
        .env("JRH_INTERPRETERS", "sh")
        .arg("--converter")
        .arg(&converter)
        .arg("--no-open")
        .arg(&missing)
        .output()
        .expect("Failed to run jrh");

    assert_exit_code(&output, 1);
    assert_contains(&stderr_of(&output), "JRH-E100");
    assert!(
        !fixture.reports.join("converter-ran.txt").exists(),
        "converter must not run for a missing input"
    );
    crate::test_log!("TEST PASS: test_missing_input_fails_before_converter_runs");
}

#[cfg(unix)]
#[test]
fn test_converter_success_without_output_is_postcondition_failure() {
    init_test_logging();
    crate::test_log!("TEST START: test_converter_success_without_output_is_postcondition_failure");

    let fixture = ReportDir::new();
    let converter = fixture.converter(SILENT_CONVERTER);

    let output = jrh_command()
        .env("JRH_INTERPRETERS", "sh")
        .arg("--converter")
        .arg(&converter)
        .arg("--no-open")
        .arg(&fixture.input)
        .output()
        .expect("Failed to run jrh");

    assert_exit_code(&output, 1);
    assert_path_exists(&fixture.reports.join("converter-ran.txt"));
    let stderr = stderr_of(&output);
    assert_contains(&stderr, "JRH-E300");
    assert_contains(&stderr, "run_report.html");
    crate::test_log!("TEST PASS: test_converter_success_without_output_is_postcondition_failure");
}

#[cfg(unix)]
#[test]
fn test_converter_writing_report_succeeds_with_absolute_path() {
    init_test_logging();
    crate::test_log!("TEST START: test_converter_writing_report_succeeds_with_absolute_path");

    let fixture = ReportDir::new();
    let converter = fixture.converter(WRITING_CONVERTER);

    let output = jrh_command()
        .env("JRH_INTERPRETERS", "sh")
        .arg("--converter")
        .arg(&converter)
        .arg("--no-open")
        .arg(&fixture.input)
        .output()
        .expect("Failed to run jrh");

    assert_exit_code(&output, 0);
    let report = fixture.reports.join("run_report.html");
    assert_path_exists(&report);

    let absolute = fs::canonicalize(&report).expect("canonicalize report");
    let stdout = stdout_of(&output);
    assert_contains(&stdout, "HTML report generated successfully");
    assert_contains(&stdout, &absolute.display().to_string());

    // The output path is always passed explicitly.
    let args = fs::read_to_string(fixture.reports.join("converter-args.txt")).expect("args file");
    assert_contains(&args, &report.display().to_string());
    crate::test_log!("TEST PASS: test_converter_writing_report_succeeds_with_absolute_path");
}

#[cfg(unix)]
#[test]
fn test_bare_output_name_lands_next_to_input() {
    init_test_logging();
    crate::test_log!("TEST START: test_bare_output_name_lands_next_to_input");

    let fixture = ReportDir::new();
    let converter = fixture.converter(WRITING_CONVERTER);

    let output = jrh_command()
        .env("JRH_INTERPRETERS", "sh")
        .env("JRH_OPEN_BROWSER", "never")
        .arg("--converter")
        .arg(&converter)
        .arg(&fixture.input)
        .arg("summary.html")
        .output()
        .expect("Failed to run jrh");

    assert_exit_code(&output, 0);
    assert_path_exists(&fixture.reports.join("summary.html"));
    crate::test_log!("TEST PASS: test_bare_output_name_lands_next_to_input");
}

#[cfg(unix)]
#[test]
fn test_converter_exit_status_propagates() {
    init_test_logging();
    crate::test_log!("TEST START: test_converter_exit_status_propagates");

    let fixture = ReportDir::new();
    let converter = fixture.converter(FAILING_CONVERTER);

    let output = jrh_command()
        .env("JRH_INTERPRETERS", "sh")
        .arg("--converter")
        .arg(&converter)
        .arg("--no-open")
        .arg(&fixture.input)
        .output()
        .expect("Failed to run jrh");

    assert_exit_code(&output, 3);
    let stderr = stderr_of(&output);
    assert_contains(&stderr, "converter exploded");
    assert_contains(&stderr, "JRH-E200");
    crate::test_log!("TEST PASS: test_converter_exit_status_propagates");
}

#[cfg(unix)]
#[test]
fn test_unexpected_extension_only_warns() {
    init_test_logging();
    crate::test_log!("TEST START: test_unexpected_extension_only_warns");

    let fixture = ReportDir::with_report("results.txt", "<testsuites/>");
    let converter = fixture.converter(WRITING_CONVERTER);

    let output = jrh_command()
        .env("JRH_INTERPRETERS", "sh")
        .arg("--converter")
        .arg(&converter)
        .arg("--no-open")
        .arg(&fixture.input)
        .output()
        .expect("Failed to run jrh");

    assert_exit_code(&output, 0);
    assert_contains(&stderr_of(&output), ".xml extension");
    assert_path_exists(&fixture.reports.join("results_report.html"));
    crate::test_log!("TEST PASS: test_unexpected_extension_only_warns");
}

#[test]
fn test_invalid_env_value_warns_and_continues() {
    init_test_logging();
    crate::test_log!("TEST START: test_invalid_env_value_warns_and_continues");

    let fixture = ReportDir::new();
    let output = jrh_command()
        .env("JRH_PROMPT_TIMEOUT_SECS", "forever")
        .env("JRH_INTERPRETERS", "")
        .arg("--converter")
        .arg(fixture.path().join("missing-converter"))
        .arg(&fixture.input)
        .output()
        .expect("Failed to run jrh");

    let stderr = stderr_of(&output);
    assert_contains(&stderr, "JRH_PROMPT_TIMEOUT_SECS");
    assert_contains(&stderr, "JRH-E002");
    crate::test_log!("TEST PASS: test_invalid_env_value_warns_and_continues");
}

#[test]
fn test_invalid_log_level_warns_and_continues() {
    init_test_logging();
    crate::test_log!("TEST START: test_invalid_log_level_warns_and_continues");

    let fixture = ReportDir::new();
    let output = jrh_command()
        .env("JRH_LOG", "verbose")
        .env("JRH_INTERPRETERS", "")
        .arg("--converter")
        .arg(fixture.path().join("missing-converter"))
        .arg(&fixture.input)
        .output()
        .expect("Failed to run jrh");

    let stderr = stderr_of(&output);
    assert_contains(&stderr, "Invalid log level for JRH_LOG: verbose");
    assert_contains(&stderr, "JRH-E002");
    crate::test_log!("TEST PASS: test_invalid_log_level_warns_and_continues");
}

#[test]
fn test_native_converter_end_to_end() {
    init_test_logging();
    crate::test_log!("TEST START: test_native_converter_end_to_end");

    let fixture = ReportDir::new();
    let output = jrh_command()
        .arg("--native")
        .arg("--no-open")
        .arg(&fixture.input)
        .output()
        .expect("Failed to run jrh");

    assert_exit_code(&output, 0);
    let report = fixture.reports.join("run_report.html");
    assert_path_exists(&report);

    let html = fs::read_to_string(&report).expect("read report");
    assert_contains(&html, "nginx is running");
    assert_contains(&html, "connection refused");

    let stdout = stdout_of(&output);
    assert_contains(&stdout, "Summary: 3 tests, 1 passed, 1 failed, 0 errors, 1 skipped");
    assert_contains(&stdout, "HTML report generated successfully");
    crate::test_log!("TEST PASS: test_native_converter_end_to_end");
}
