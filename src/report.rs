//! Non-fatal warnings collected during a run.
//!
//! Problems that should not abort a batch (a degenerate shape, say) are
//! recorded here and printed once the run finishes. Anything worse is a
//! `SplitError` and stops the run.

use crate::output::{plural, Printer};

/// A single warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Machine-readable code, e.g. "shapesplit::export::degenerate".
    pub code: String,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Collected warnings for one run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Print every warning, followed by a one-line tally.
    pub fn print(&self, printer: &Printer) {
        if self.is_empty() {
            return;
        }

        for d in &self.diagnostics {
            eprintln!("  {}[{}]: {}", printer.warning_label(), d.code, d.message);
            if let Some(help) = &d.help {
                eprintln!("    {}: {}", printer.dim("help"), help);
            }
        }

        printer.warning(
            "Warnings",
            &plural(self.warning_count(), "warning", "warnings"),
        );
    }
}
