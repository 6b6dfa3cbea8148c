use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

pub const SAMPLE_REPORT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<testsuites>
  <testsuite name="verify" tests="3" errors="0" failures="1" skipped="1" time="4.25">
    <testcase name="[centos] Verify: nginx is running" classname="verify.yml" time="0.5">
      <system-out>ok: [centos]</system-out>
    </testcase>
    <testcase name="port 8080 open" classname="verify.yml" time="3.5">
      <failure message="timeout">connection refused</failure>
    </testcase>
    <testcase name="tls certificate" classname="verify.yml" time="0.25">
      <skipped message="no certificate configured"/>
    </testcase>
  </testsuite>
</testsuites>
"#;

/// Converter stub that writes an HTML file to its second argument.
pub const WRITING_CONVERTER: &str = "printf '<html>stub</html>' > \"$2\"\necho \"$1 $2\" > \"$(dirname \"$2\")/converter-args.txt\"\n";

/// Converter stub that succeeds without writing anything.
pub const SILENT_CONVERTER: &str = "touch \"$(dirname \"$1\")/converter-ran.txt\"\nexit 0\n";

/// Converter stub that fails with status 3.
pub const FAILING_CONVERTER: &str = "echo 'converter exploded' >&2\nexit 3\n";

/// A temporary `reports/` directory holding one JUnit file.
pub struct ReportDir {
    pub dir: TempDir,
    pub reports: PathBuf,
    pub input: PathBuf,
}

impl ReportDir {
    pub fn new() -> Self {
        Self::with_report("run.xml", SAMPLE_REPORT)
    }

    pub fn with_report(name: &str, contents: &str) -> Self {
        crate::test_log!("FIXTURE: Creating report directory with {}", name);

        let dir = TempDir::new().expect("Failed to create temp dir");
        let reports = dir.path().join("reports");
        fs::create_dir_all(&reports).expect("Failed to create reports dir");
        let input = reports.join(name);
        fs::write(&input, contents).expect("Failed to write JUnit report");

        Self {
            dir,
            reports,
            input,
        }
    }

    /// Write a `sh` converter script and return its absolute path.
    pub fn converter(&self, body: &str) -> PathBuf {
        let path = self.dir.path().join("converter.sh");
        fs::write(&path, body).expect("Failed to write converter stub");
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

fn isolated(program: &str) -> Command {
    let mut cmd = Command::new(program);
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("JRH_") {
            cmd.env_remove(&key);
        }
    }
    cmd.env("NO_COLOR", "1").stdin(Stdio::null());
    cmd
}

/// `jrh` with a clean `JRH_*` environment and no stdin.
pub fn jrh_command() -> Command {
    isolated(env!("CARGO_BIN_EXE_jrh"))
}

pub fn jrh_convert_command() -> Command {
    isolated(env!("CARGO_BIN_EXE_jrh-convert"))
}
