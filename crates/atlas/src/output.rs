//! Terminal output for CLI commands.
//!
//! Status lines go to stderr so that stdout carries only command results,
//! which are JSON and safe to pipe into other tools.

use console::{Style, Term};
use serde::Serialize;

use crate::error::CliError;

#[derive(Clone, Copy)]
enum Tone {
    Plain,
    Success,
    Warning,
    Error,
    Highlight,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Success => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Error => Style::new().red(),
            Self::Highlight => Style::new().cyan().bold(),
        }
    }
}

/// Status and result writer.
pub(crate) struct Output {
    status: Term,
    results: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            results: Term::stdout(),
        }
    }

    fn status_line(&self, tone: Tone, msg: &str) {
        // A closed stderr is not worth failing the command over.
        let _ = self
            .status
            .write_line(&tone.style().apply_to(msg).to_string());
    }

    pub(crate) fn info(&self, msg: &str) {
        self.status_line(Tone::Plain, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.status_line(Tone::Success, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.status_line(Tone::Warning, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.status_line(Tone::Error, msg);
    }

    pub(crate) fn highlight(&self, msg: &str) {
        self.status_line(Tone::Highlight, msg);
    }

    /// Write a command result as pretty JSON on stdout.
    pub(crate) fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), CliError> {
        let rendered = serde_json::to_string_pretty(value)?;
        self.results.write_line(&rendered)?;
        Ok(())
    }
}
