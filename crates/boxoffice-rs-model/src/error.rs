//! Error types for the record model.

use thiserror::Error;

/// Errors returned when parsing vocabulary values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabularyError {
    /// The value is not part of the named vocabulary.
    #[error("unknown {vocabulary}: {value}")]
    Unknown {
        vocabulary: &'static str,
        value: String,
    },
}
