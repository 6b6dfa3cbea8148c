//! Terminal capabilities for one run.

use super::theme::Theme;
use jrh_common::ColorChoice;
use std::io::IsTerminal;

/// Color and interactivity decisions, made once at startup and passed down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputContext {
    color: bool,
    interactive: bool,
    theme: Theme,
}

impl OutputContext {
    pub fn new(color: bool, interactive: bool) -> Self {
        Self {
            color,
            interactive,
            theme: Theme::new(color),
        }
    }

    /// Inspect the real terminal.
    pub fn detect(choice: ColorChoice) -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        let color = resolve_color(choice, no_color, std::io::stdout().is_terminal());
        Self::new(color, std::io::stdin().is_terminal())
    }

    /// No color, no prompts.
    #[cfg(test)]
    pub fn plain() -> Self {
        Self::new(false, false)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Whether stdin is attached to a terminal an operator can answer from.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

fn resolve_color(choice: ColorChoice, no_color: bool, stdout_tty: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => !no_color && stdout_tty,
    }
}
