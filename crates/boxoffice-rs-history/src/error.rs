//! Error types for history persistence.

use boxoffice_rs_model::RecordId;

/// Errors returned by history stores on write.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// A record with the same id is already stored.
    #[error("duplicate record id: {0}")]
    DuplicateId(RecordId),
}
