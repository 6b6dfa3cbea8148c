//! Yes/no questions with a bounded wait.

use std::io::{BufRead, BufReader, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Asks the operator a yes/no question.
pub trait Prompter {
    /// Returns `default` on timeout, EOF, or an unrecognized answer.
    fn confirm(&self, question: &str, timeout: Duration, default: bool) -> bool;
}

/// Read one answer line from `input`, giving up after `timeout`.
///
/// The reader runs on a helper thread; on timeout that thread is abandoned
/// still blocked on its read.
pub fn confirm_with_timeout<R>(input: R, timeout: Duration, default: bool) -> bool
where
    R: BufRead + Send + 'static,
{
    if timeout.is_zero() {
        return default;
    }

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut input = input;
        let mut line = String::new();
        let read = input.read_line(&mut line).map(|n| (n, line));
        let _ = tx.send(read);
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok((0, _))) => {
            debug!("Prompt input closed");
            default
        }
        Ok(Ok((_, line))) => parse_answer(&line).unwrap_or(default),
        Ok(Err(e)) => {
            debug!(error = %e, "Failed to read prompt answer");
            default
        }
        Err(_) => {
            debug!(timeout_secs = timeout.as_secs(), "Prompt timed out");
            default
        }
    }
}

/// `Some(true)` for y/yes, `Some(false)` for n/no, `None` otherwise.
pub fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Prompts on stdout and reads the answer from stdin.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str, timeout: Duration, default: bool) -> bool {
        if !self.interactive {
            debug!("stdin is not a terminal; using default answer");
            return default;
        }

        let choices = if default { "[Y/n]" } else { "[y/N]" };
        print!("{question} {choices} ({}s) ", timeout.as_secs());
        let _ = std::io::stdout().flush();

        let answer = confirm_with_timeout(BufReader::new(std::io::stdin()), timeout, default);
        println!();
        answer
    }
}
