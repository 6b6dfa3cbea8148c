//! Opening the finished report in the platform browser.
//!
//! Best effort only: a missing opener is silently skipped and a failed launch
//! is reported by the caller as a warning.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Something that can hand a file to the desktop's default viewer.
pub trait BrowserLauncher {
    fn name(&self) -> &'static str;

    /// Whether [`open`](Self::open) can do anything on this system.
    fn available(&self) -> bool {
        true
    }

    fn open(&self, path: &Path) -> std::io::Result<()>;
}

/// macOS `open`.
#[derive(Debug, Default)]
pub struct MacOpen;

impl BrowserLauncher for MacOpen {
    fn name(&self) -> &'static str {
        "open"
    }

    fn open(&self, path: &Path) -> std::io::Result<()> {
        spawn_detached(Path::new("open"), path)
    }
}

/// freedesktop `xdg-open`, resolved on `PATH`.
#[derive(Debug)]
pub struct XdgOpen {
    program: PathBuf,
}

impl XdgOpen {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

impl BrowserLauncher for XdgOpen {
    fn name(&self) -> &'static str {
        "xdg-open"
    }

    fn open(&self, path: &Path) -> std::io::Result<()> {
        spawn_detached(&self.program, path)
    }
}

/// No known opener on this platform.
#[derive(Debug, Default)]
pub struct NoBrowser;

impl BrowserLauncher for NoBrowser {
    fn name(&self) -> &'static str {
        "none"
    }

    fn available(&self) -> bool {
        false
    }

    fn open(&self, path: &Path) -> std::io::Result<()> {
        debug!(path = %path.display(), "No browser launcher available; skipping");
        Ok(())
    }
}

fn spawn_detached(program: &Path, target: &Path) -> std::io::Result<()> {
    debug!(program = %program.display(), target = %target.display(), "Opening report");
    Command::new(program)
        .arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

/// Platform families with distinct opener behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    OtherUnix,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(unix) {
            Self::OtherUnix
        } else {
            Self::Other
        }
    }
}

/// Pick the launcher for the running platform.
pub fn detect() -> Box<dyn BrowserLauncher> {
    detect_for(Platform::current(), |name| which::which(name).ok())
}

/// Pick the launcher for `platform`, using `lookup` to search `PATH`.
pub fn detect_for<F>(platform: Platform, lookup: F) -> Box<dyn BrowserLauncher>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    match platform {
        Platform::MacOs => Box::new(MacOpen),
        Platform::OtherUnix => match lookup("xdg-open") {
            Some(program) => Box::new(XdgOpen::new(program)),
            None => Box::new(NoBrowser),
        },
        Platform::Other => Box::new(NoBrowser),
    }
}
