//! Error types for record normalization.
//!
//! A single record can have several problems at once (two bad timestamps, for
//! instance). Each problem is a [`FieldIssue`]; a rejected record carries all
//! of them in one [`NormalizeError`].

use thiserror::Error;

/// Which record shape an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Print,
    Printer,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Print => write!(f, "print"),
            RecordKind::Printer => write!(f, "printer"),
        }
    }
}

/// One problem found while normalizing a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldIssue {
    /// A non-empty timestamp string that no accepted format matches.
    #[error("`{field}` is not a recognisable timestamp: {value:?}")]
    UnparseableTimestamp { field: &'static str, value: String },

    /// A field needed to derive another one is absent.
    #[error("`{field}` is required but missing")]
    MissingRequiredField { field: &'static str },

    /// The raw JSON could not be read as the expected record shape.
    #[error("malformed record: {reason}")]
    Malformed { reason: String },
}

/// A record that was rejected, with every issue found in it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} record rejected: {}", render_issues(.issues))]
pub struct NormalizeError {
    pub kind: RecordKind,
    pub issues: Vec<FieldIssue>,
}

impl NormalizeError {
    pub fn new(kind: RecordKind, issues: Vec<FieldIssue>) -> Self {
        Self { kind, issues }
    }

    /// True if any issue is a missing required field.
    pub fn is_missing_field(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, FieldIssue::MissingRequiredField { .. }))
    }
}

fn render_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
