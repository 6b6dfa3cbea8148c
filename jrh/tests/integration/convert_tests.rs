use std::fs;

use crate::common::{
    ReportDir, assert_contains, assert_exit_code, assert_path_exists, init_test_logging,
    jrh_convert_command,
};

#[test]
fn test_convert_default_output_name() {
    init_test_logging();
    crate::test_log!("TEST START: test_convert_default_output_name");

    let fixture = ReportDir::new();
    let output = jrh_convert_command()
        .arg(&fixture.input)
        .output()
        .expect("Failed to run jrh-convert");

    assert_exit_code(&output, 0);
    let report = fixture.reports.join("run_report.html");
    assert_path_exists(&report);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "Report generated successfully");
    assert_contains(&stdout, "file://");

    let html = fs::read_to_string(&report).expect("read report");
    assert_contains(&html, "<title>Test Report - verify</title>");
    assert_contains(&html, "1. nginx is running");
    assert_contains(&html, "status-skipped");
    assert_contains(&html, "no certificate configured");
    crate::test_log!("TEST PASS: test_convert_default_output_name");
}

#[test]
fn test_convert_explicit_output_path() {
    init_test_logging();
    crate::test_log!("TEST START: test_convert_explicit_output_path");

    let fixture = ReportDir::new();
    let out_dir = fixture.path().join("out");
    fs::create_dir_all(&out_dir).expect("create out dir");
    let target = out_dir.join("summary.html");

    let output = jrh_convert_command()
        .arg(&fixture.input)
        .arg(&target)
        .output()
        .expect("Failed to run jrh-convert");

    assert_exit_code(&output, 0);
    assert_path_exists(&target);
    assert!(!fixture.reports.join("run_report.html").exists());
    crate::test_log!("TEST PASS: test_convert_explicit_output_path");
}

#[test]
fn test_convert_json_summary() {
    init_test_logging();
    crate::test_log!("TEST START: test_convert_json_summary");

    let fixture = ReportDir::new();
    let output = jrh_convert_command()
        .arg("--json")
        .arg(&fixture.input)
        .output()
        .expect("Failed to run jrh-convert");

    assert_exit_code(&output, 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let start = stdout.find('{').expect("json start");
    let end = stdout.rfind('}').expect("json end");
    let summary: serde_json::Value =
        serde_json::from_str(&stdout[start..=end]).expect("valid JSON summary");

    assert_eq!(summary["name"], "verify");
    assert_eq!(summary["tests"], 3);
    assert_eq!(summary["passed"], 1);
    assert_eq!(summary["failures"], 1);
    assert_eq!(summary["skipped"], 1);
    crate::test_log!("TEST PASS: test_convert_json_summary");
}

#[test]
fn test_convert_missing_input_fails() {
    init_test_logging();
    crate::test_log!("TEST START: test_convert_missing_input_fails");

    let fixture = ReportDir::new();
    let output = jrh_convert_command()
        .arg(fixture.reports.join("absent.xml"))
        .output()
        .expect("Failed to run jrh-convert");

    assert_exit_code(&output, 1);
    assert_contains(&String::from_utf8_lossy(&output.stderr), "Input file not found");
    crate::test_log!("TEST PASS: test_convert_missing_input_fails");
}

#[test]
fn test_convert_malformed_xml_fails_without_output() {
    init_test_logging();
    crate::test_log!("TEST START: test_convert_malformed_xml_fails_without_output");

    let fixture = ReportDir::with_report("broken.xml", "<testsuites><testsuite></testsuites>");
    let output = jrh_convert_command()
        .arg(&fixture.input)
        .output()
        .expect("Failed to run jrh-convert");

    assert_exit_code(&output, 1);
    assert_contains(&String::from_utf8_lossy(&output.stderr), "JRH-E400");
    assert!(!fixture.reports.join("broken_report.html").exists());
    crate::test_log!("TEST PASS: test_convert_malformed_xml_fails_without_output");
}

#[test]
fn test_convert_without_testsuite_fails() {
    init_test_logging();
    crate::test_log!("TEST START: test_convert_without_testsuite_fails");

    let fixture = ReportDir::with_report("empty.xml", "<testsuites></testsuites>");
    let output = jrh_convert_command()
        .arg(&fixture.input)
        .output()
        .expect("Failed to run jrh-convert");

    assert_exit_code(&output, 1);
    assert_contains(&String::from_utf8_lossy(&output.stderr), "No testsuite found");
    crate::test_log!("TEST PASS: test_convert_without_testsuite_fails");
}

#[test]
fn test_convert_missing_output_directory_fails() {
    init_test_logging();
    crate::test_log!("TEST START: test_convert_missing_output_directory_fails");

    let fixture = ReportDir::new();
    let missing_dir = fixture.path().join("not-created");
    let target = missing_dir.join("summary.html");

    let output = jrh_convert_command()
        .arg(&fixture.input)
        .arg(&target)
        .output()
        .expect("Failed to run jrh-convert");

    assert_exit_code(&output, 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "JRH-E301");
    assert_contains(&stderr, "Failed to write");
    assert!(!missing_dir.exists());
    crate::test_log!("TEST PASS: test_convert_missing_output_directory_fails");
}
