//! Operator-facing status output for the config command.
//!
//! The handler never prints directly; it hands every status line (or the
//! formatted store on `view`) to a [`Reporter`]. Hosts pick the sink.

use std::sync::Mutex;

pub trait Reporter: Send + Sync {
    fn report(&self, message: &str);
}

/// Writes each message to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn report(&self, message: &str) {
        println!("{}", message);
    }
}

/// Drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&self, _message: &str) {}
}

/// Keeps every message in memory so callers can inspect what would have
/// been shown.
#[derive(Debug, Default)]
pub struct CaptureReporter {
    lines: Mutex<Vec<String>>,
}

impl CaptureReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<String> {
        self.lines().pop()
    }
}

impl Reporter for CaptureReporter {
    fn report(&self, message: &str) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}
