use derive_more::Display;
use owo_colors::{OwoColorize, Style};
use std::{
    fmt,
    io::{self, Write},
};

use crate::Span;

/// Collects the diagnostics emitted while checking one program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn write(&self, mut w: impl Write) -> io::Result<()> {
        for diagnostic in &self.diagnostics {
            diagnostic.write(&mut w)?;
        }
        Ok(())
    }

    /// Prints the report to the standard error output.
    pub fn eprint(&self) -> io::Result<()> {
        self.write(io::stderr())
    }
}

/// Represents the severity of a diagnostic message.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

/// Converts a type into a source diagnostic.
pub trait IntoDiagnostic: fmt::Display + Sized {
    /// Converts the type into a source diagnostic.
    fn into_diagnostic(self, span: Span) -> Diagnostic {
        Diagnostic::error(span, self.to_string())
    }
}

/// Represents a diagnostic message with source location information.
///
/// Diagnostics include a message, a severity level, the span in the source
/// code and optional notes for additional context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// The main diagnostic message.
    pub message: String,
    /// The severity of the diagnostic.
    pub severity: Severity,
    /// The source code location this diagnostic refers to.
    pub span: Span,
    /// Additional notes related to the diagnostic.
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, span: Span, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            span,
            notes: Vec::new(),
        }
    }

    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, span, message)
    }

    pub fn warn(span: Span, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, span, message)
    }

    /// Adds a note to the diagnostic and returns self for method chaining.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn write(&self, mut w: impl Write) -> io::Result<()> {
        let Diagnostic {
            message,
            severity,
            span,
            notes,
        } = self;

        let style = match severity {
            Severity::Warning => Style::new().yellow(),
            Severity::Error => Style::new().red(),
        };

        writeln!(w, "{} at {span}: {message}", severity.style(style))?;

        for note in notes {
            writeln!(w, "  {} {note}", "Note:".blue())?;
        }

        Ok(())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Oops;

    impl fmt::Display for Oops {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "oops")
        }
    }

    impl IntoDiagnostic for Oops {}

    #[test]
    fn into_diagnostic_is_error() {
        let diag = Oops.into_diagnostic(Span::new(1, 2));

        assert!(diag.is_error());
        assert_eq!(diag.message, "oops");
        assert_eq!(diag.span, Span::new(1, 2));
    }

    #[test]
    fn report_tracks_errors() {
        let mut report = Report::new();
        assert!(report.is_empty());

        report.add_diagnostic(Diagnostic::warn(Span::new(0, 1), "careful"));
        assert!(!report.has_errors());

        report.add_diagnostic(Diagnostic::error(Span::new(0, 1), "broken").with_note("why"));
        assert!(report.has_errors());

        let mut out = Vec::new();
        report.write(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("careful"));
        assert!(out.contains("broken"));
        assert!(out.contains("why"));
    }
}
