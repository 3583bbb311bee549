//! Error types for form editing and submission.

use crate::draft::ListField;
use boxoffice_rs_client::SubmissionError;
use boxoffice_rs_history::HistoryError;
use std::fmt;
use thiserror::Error;

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Wire name of the offending field.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl FieldViolation {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors returned by draft edits and the form controller.
#[derive(Debug, Error)]
pub enum FormError {
    /// Required fields are missing or out of range.
    #[error("invalid form: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),
    /// A submission is already awaiting its response.
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    /// The form cannot be changed in its current state.
    #[error("form is not editable while {0}")]
    NotEditable(&'static str),
    /// A result arrived without a matching submission.
    #[error("no submission is in flight")]
    NotSubmitting,
    /// The list already holds its maximum number of entries.
    #[error("{list} accepts at most {max} entries")]
    ListFull { list: ListField, max: usize },
    /// The last slot must be filled before adding another.
    #[error("fill the last {0} entry before adding another")]
    EmptyLastSlot(ListField),
    /// Slot index does not exist.
    #[error("{list} has no entry at index {index}")]
    SlotOutOfRange { list: ListField, index: usize },
    /// The prediction request failed.
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    /// The record could not be saved.
    #[error("failed to save prediction: {0}")]
    History(#[from] HistoryError),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
