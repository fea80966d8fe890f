//! Source positions and diagnostics attached to them.
//!
//! Important concepts in this module include:
//!
//! - the *span*, represented by [`Span`], a byte range into the checked source;
//! - the *diagnostic*, represented by [`Diagnostic`], a structured message
//!   that downstream tooling renders however it likes.

mod diag;
mod span;

pub use diag::{Diagnostic, IntoDiagnostic, Report, Severity};
pub use span::{Located, Span};
