//! Prediction client and the predictor seam used by the form controller.

use crate::error::SubmissionError;
use crate::response::parse_prediction;
use async_trait::async_trait;
use boxoffice_rs_config::ServiceConfig;
use boxoffice_rs_model::{InputFields, PredictedFields};
use log::{debug, info};

/// Longest response body kept in a status error.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[async_trait]
/// Source of predictions for a set of movie attributes.
pub trait Predictor: Send + Sync {
    /// Predict outcome metrics for sanitized input.
    async fn predict(&self, input: &InputFields) -> Result<PredictedFields, SubmissionError>;
}

/// HTTP client for the prediction service.
///
/// One call issues exactly one request: no retry, no caching, and no timeout
/// beyond the transport default.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: reqwest::Client,
    submit_url: String,
}

impl PredictionClient {
    /// Create a client posting to the given endpoint URL.
    pub fn new(submit_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), submit_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, submit_url: impl Into<String>) -> Self {
        Self {
            client,
            submit_url: submit_url.into(),
        }
    }

    /// Create a client for the configured service.
    pub fn from_config(service: &ServiceConfig) -> Self {
        Self::new(service.submit_url())
    }

    /// Endpoint URL the client posts to.
    pub fn submit_url(&self) -> &str {
        &self.submit_url
    }

    /// Submit movie attributes and parse the predicted metrics.
    pub async fn submit(&self, input: &InputFields) -> Result<PredictedFields, SubmissionError> {
        info!(
            "submitting prediction (url={}, title_len={})",
            self.submit_url,
            input.title.len()
        );
        let response = self
            .client
            .post(&self.submit_url)
            .json(input)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(
            "prediction response (status={}, body_len={})",
            status.as_u16(),
            body.len()
        );
        if !status.is_success() {
            return Err(SubmissionError::Status {
                status: status.as_u16(),
                body: truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS),
            });
        }
        parse_prediction(&body)
    }
}

#[async_trait]
impl Predictor for PredictionClient {
    async fn predict(&self, input: &InputFields) -> Result<PredictedFields, SubmissionError> {
        self.submit(input).await
    }
}

/// Truncate a string to a maximum number of characters.
fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::{PredictionClient, truncate_chars};
    use boxoffice_rs_config::ServiceConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_config_uses_submit_url() {
        let client = PredictionClient::from_config(&ServiceConfig {
            base_url: "http://predict.example:8000".to_string(),
            submit_path: "/api/submit".to_string(),
        });
        assert_eq!(client.submit_url(), "http://predict.example:8000/api/submit");
    }

    #[test]
    fn truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
