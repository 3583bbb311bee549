//! Error types for prediction submission.

use thiserror::Error;

/// Errors returned when a prediction request fails.
///
/// Messages are meant to be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The request could not be sent or the response could not be read.
    #[error("failed to reach prediction service: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("prediction service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The body is not JSON or lacks the expected shape.
    #[error("malformed prediction response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        SubmissionError::Transport(err.to_string())
    }
}
