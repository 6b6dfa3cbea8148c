//! Styles for orchestrator output.

use console::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    enabled: bool,
}

impl Theme {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        style.force_styling(self.enabled).apply_to(text).to_string()
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(Style::new().green(), text)
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(Style::new().red().bold(), text)
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(Style::new().yellow(), text)
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(Style::new().dim(), text)
    }

    pub fn highlight(&self, text: &str) -> String {
        self.paint(Style::new().cyan().bold(), text)
    }
}

/// Leading marker for a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    Success,
    Error,
    Warning,
    Info,
}

impl StatusIndicator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✗",
            Self::Warning => "⚠",
            Self::Info => "→",
        }
    }

    pub fn display(&self, theme: &Theme) -> String {
        let symbol = self.symbol();
        match self {
            Self::Success => theme.success(symbol),
            Self::Error => theme.error(symbol),
            Self::Warning => theme.warning(symbol),
            Self::Info => theme.muted(symbol),
        }
    }
}
