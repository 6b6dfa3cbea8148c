//! Self-contained HTML rendering for a parsed [`TestSuite`].

use crate::junit::{CaseStatus, TestCase, TestSuite};
use chrono::{DateTime, Local};
use regex::Regex;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::LazyLock;

const MAX_NAME_CHARS: usize = 60;

static HOST_TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"\[[^\]]+\]\s*"));
static VERIFY_PREFIX: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^Verify:\s*"));
static TEST_CASE_PREFIX: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^TEST_CASE:\s*"));
static LONG_PARAMS: LazyLock<Regex> = LazyLock::new(|| compile(r"\s*\([^)]{50,}\)"));
static PARAM_TAILS: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [
        compile(r"\s+(that=|fail_msg=|success_msg=).*"),
        compile(r"\s+port=\d+.*"),
        compile(r"\s+host=.*"),
        compile(r"\s+state=.*"),
        compile(r"\s+timeout=\d+.*"),
    ]
});
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+"));

fn compile(pattern: &str) -> Regex {
    // Patterns are literals above; a failure here is a programming error.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern}: {e}"))
}

/// Shorten a test name for display.
///
/// Drops host tags such as `[centos]`, `Verify:`/`TEST_CASE:` prefixes, long
/// parameter lists and `key=value` tails, then truncates to 60 characters.
pub fn clean_test_name(name: &str) -> String {
    if name.is_empty() {
        return "Unknown Test".to_string();
    }

    let mut cleaned = HOST_TAG.replace_all(name, "").into_owned();
    cleaned = VERIFY_PREFIX.replace(&cleaned, "").into_owned();
    cleaned = TEST_CASE_PREFIX.replace(&cleaned, "").into_owned();
    cleaned = LONG_PARAMS.replace_all(&cleaned, "").into_owned();

    if let Some((first, _)) = cleaned.split_once(',') {
        cleaned = first.trim().to_string();
    }
    for tail in PARAM_TAILS.iter() {
        cleaned = tail.replace_all(&cleaned, "").into_owned();
    }
    let cleaned = WHITESPACE.replace_all(&cleaned, " ").trim().to_string();

    if cleaned.chars().count() > MAX_NAME_CHARS {
        let head: String = cleaned.chars().take(MAX_NAME_CHARS - 3).collect();
        return format!("{head}...");
    }
    if cleaned.is_empty() {
        return "Test Case".to_string();
    }
    cleaned
}

/// Human-readable duration: `250.0 ms`, `1.50 s`, `2m 5.5s`.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("{:.1} ms", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{seconds:.2} s")
    } else {
        let minutes = (seconds / 60.0).floor() as u64;
        format!("{minutes}m {:.1}s", seconds % 60.0)
    }
}

/// Escape text for HTML element and attribute content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"<style>
*{box-sizing:border-box}
body{margin:0;font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;background:#f4f6fa;color:#1f2933}
.container{max-width:1100px;margin:0 auto;padding:24px}
.header{background:linear-gradient(135deg,#3b5bdb,#7048e8);color:#fff;border-radius:12px;padding:28px 32px;margin-bottom:24px}
.header h1{margin:0 0 6px;font-size:28px}
.subtitle{opacity:.9}
.source-info{margin-top:14px;background:rgba(255,255,255,.15);border-radius:8px;padding:10px 14px}
.source-label{font-size:11px;text-transform:uppercase;letter-spacing:.08em;opacity:.8}
.source-path{font-family:ui-monospace,Menlo,monospace;word-break:break-all}
.stats-grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(150px,1fr));gap:14px;margin-bottom:24px}
.stat-card{background:#fff;border-radius:10px;padding:18px;text-align:center;box-shadow:0 1px 3px rgba(0,0,0,.08)}
.stat-number{font-size:28px;font-weight:700}
.stat-label{font-size:12px;text-transform:uppercase;color:#616e7c;margin-top:4px}
.tests-passed{color:#2b8a3e}.tests-failed{color:#c92a2a}.tests-errors{color:#e8590c}.tests-skipped{color:#868e96}
.test-results{background:#fff;border-radius:10px;box-shadow:0 1px 3px rgba(0,0,0,.08);overflow:hidden}
.test-results-header{display:flex;justify-content:space-between;align-items:center;padding:16px 20px;border-bottom:1px solid #e4e7eb;font-weight:600}
.bulk-action-btn{border:1px solid #cbd2d9;background:#fff;border-radius:6px;padding:6px 12px;cursor:pointer;margin-left:6px}
.test-case{border-bottom:1px solid #e4e7eb}
.test-case summary{display:flex;justify-content:space-between;align-items:center;padding:12px 20px;cursor:pointer;list-style:none}
.test-case summary::-webkit-details-marker{display:none}
.test-case summary::before{content:"\25B6";font-size:11px;color:#7b8794;margin-right:10px;transition:transform .15s}
.test-case[open] summary::before{transform:rotate(90deg)}
.test-name{flex:1;font-weight:500}
.test-status{font-size:11px;font-weight:700;padding:4px 10px;border-radius:12px;color:#fff}
.status-passed{background:#2f9e44}.status-failed{background:#e03131}.status-error{background:#f76707}.status-skipped{background:#868e96}
.test-details{padding:4px 20px 16px 42px;background:#f8f9fb}
.test-detail-row{display:flex;gap:10px;padding:4px 0}
.test-detail-label{min-width:90px;font-weight:600;color:#52606d}
.test-detail-value{font-family:ui-monospace,Menlo,monospace;word-break:break-all}
.error-message,.skipped-reason,.system-out{margin-top:10px;padding:10px 12px;border-radius:6px;white-space:pre-wrap;font-family:ui-monospace,Menlo,monospace;font-size:13px}
.error-message{background:#fff5f5;border-left:4px solid #e03131}
.skipped-reason{background:#f1f3f5;border-left:4px solid #868e96}
.system-out{background:#1f2933;color:#e4e7eb}
.footer{text-align:center;color:#7b8794;font-size:12px;margin-top:24px}
</style>"#;

const SCRIPT: &str = r#"<script>
document.addEventListener('DOMContentLoaded',function(){
  var cases=document.querySelectorAll('details.test-case');
  function setAll(open){cases.forEach(function(c){c.open=open;});}
  document.getElementById('expand-all').addEventListener('click',function(){setAll(true);});
  document.getElementById('collapse-all').addEventListener('click',function(){setAll(false);});
  document.addEventListener('keydown',function(e){
    if(!(e.ctrlKey||e.metaKey))return;
    if(e.key==='a'){e.preventDefault();setAll(true);}
    else if(e.key==='d'){e.preventDefault();setAll(false);}
  });
});
</script>"#;

/// Render the full report document.
pub fn render_html(suite: &TestSuite, source: &Path, generated_at: DateTime<Local>) -> String {
    let stamp = generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
    let name = escape_html(&suite.name);
    let mut html = String::with_capacity(8 * 1024 + suite.cases.len() * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(html, "<title>Test Report - {name}</title>");
    html.push_str(STYLE);
    html.push_str("\n</head>\n<body>\n<div class=\"container\">\n");

    html.push_str("<div class=\"header\">\n<h1>Test Report</h1>\n");
    let _ = write!(html, "<div class=\"subtitle\">{name} &bull; Generated on {stamp}");
    if let Some(host) = &suite.hostname {
        let _ = write!(html, " &bull; {}", escape_html(host));
    }
    if let Some(started) = &suite.timestamp {
        let _ = write!(html, " &bull; Run started {}", escape_html(started));
    }
    html.push_str("</div>\n");
    let source = source.display().to_string();
    if !source.is_empty() {
        let _ = writeln!(
            html,
            "<div class=\"source-info\"><div class=\"source-label\">Source File</div>\
             <div class=\"source-path\">{}</div></div>",
            escape_html(&source)
        );
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"stats-grid\">\n");
    stat_card(&mut html, &suite.tests.to_string(), "tests-total", "Total Tests");
    stat_card(&mut html, &suite.passed().to_string(), "tests-passed", "Passed");
    stat_card(&mut html, &suite.failures.to_string(), "tests-failed", "Failed");
    stat_card(&mut html, &suite.errors.to_string(), "tests-errors", "Errors");
    stat_card(&mut html, &suite.skipped.to_string(), "tests-skipped", "Skipped");
    if suite.disabled > 0 {
        stat_card(&mut html, &suite.disabled.to_string(), "tests-skipped", "Disabled");
    }
    stat_card(&mut html, &format_duration(suite.time), "", "Total Time");
    html.push_str("</div>\n");

    html.push_str("<div class=\"test-results\">\n<div class=\"test-results-header\">");
    let _ = write!(html, "<div>Test Cases ({})</div>", suite.cases.len());
    html.push_str(
        "<div class=\"bulk-actions\">\
         <button class=\"bulk-action-btn\" id=\"expand-all\">Expand All</button>\
         <button class=\"bulk-action-btn\" id=\"collapse-all\">Collapse All</button>\
         </div></div>\n",
    );
    for (index, case) in suite.cases.iter().enumerate() {
        test_case_entry(&mut html, index + 1, case);
    }
    html.push_str("</div>\n");

    let _ = writeln!(
        html,
        "<div class=\"footer\"><p>Generated by jrh-convert &bull; {stamp}</p></div>"
    );
    html.push_str("</div>\n");
    html.push_str(SCRIPT);
    html.push_str("\n</body>\n</html>\n");
    html
}

fn stat_card(html: &mut String, value: &str, class: &str, label: &str) {
    let _ = writeln!(
        html,
        "<div class=\"stat-card\"><div class=\"stat-number {class}\">{}</div>\
         <div class=\"stat-label\">{label}</div></div>",
        escape_html(value)
    );
}

fn test_case_entry(html: &mut String, number: usize, case: &TestCase) {
    let status = case.status.as_str();
    let _ = writeln!(
        html,
        "<details class=\"test-case\"><summary><span class=\"test-name\">{number}. {}</span>\
         <span class=\"test-status status-{status}\">{}</span></summary>",
        escape_html(&clean_test_name(&case.name)),
        status.to_uppercase()
    );

    html.push_str("<div class=\"test-details\">\n");
    detail_row(html, "Full Name:", &escape_html(&case.name));
    detail_row(html, "Duration:", &format_duration(case.time));
    detail_row(html, "Class:", &escape_html(&case.classname));

    if let Some(detail) = &case.detail {
        let (class, label) = match case.status {
            CaseStatus::Skipped => ("skipped-reason", "Skip Reason:"),
            CaseStatus::Error => ("error-message", "Error:"),
            CaseStatus::Failed => ("error-message", "Failure:"),
            CaseStatus::Passed => ("", ""),
        };
        if !class.is_empty() {
            let _ = writeln!(
                html,
                "<div class=\"{class}\"><strong>{label}</strong> {}</div>",
                escape_html(detail)
            );
        }
    }
    if let Some(output) = &case.system_out {
        let _ = writeln!(
            html,
            "<div class=\"system-out\"><strong>Output:</strong>\n{}</div>",
            escape_html(output)
        );
    }
    html.push_str("</div>\n</details>\n");
}

fn detail_row(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(
        html,
        "<div class=\"test-detail-row\"><div class=\"test-detail-label\">{label}</div>\
         <div class=\"test-detail-value\">{value}</div></div>"
    );
}
