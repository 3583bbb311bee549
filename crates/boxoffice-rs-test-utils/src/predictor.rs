use async_trait::async_trait;
use boxoffice_rs_client::{Predictor, SubmissionError};
use boxoffice_rs_model::{InputFields, PredictedFields};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct FixedPredictor {
    predicted: PredictedFields,
}

impl FixedPredictor {
    pub fn new(predicted: PredictedFields) -> Self {
        Self { predicted }
    }
}

#[async_trait]
impl Predictor for FixedPredictor {
    async fn predict(&self, _input: &InputFields) -> Result<PredictedFields, SubmissionError> {
        Ok(self.predicted)
    }
}

#[derive(Debug, Clone)]
pub struct FailingPredictor {
    error: SubmissionError,
}

impl FailingPredictor {
    pub fn new(error: SubmissionError) -> Self {
        Self { error }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(SubmissionError::Transport(message.into()))
    }
}

#[async_trait]
impl Predictor for FailingPredictor {
    async fn predict(&self, _input: &InputFields) -> Result<PredictedFields, SubmissionError> {
        Err(self.error.clone())
    }
}

/// Returns a fixed prediction and records every input it was asked about.
#[derive(Debug, Clone)]
pub struct RecordingPredictor {
    predicted: PredictedFields,
    seen_inputs: Arc<Mutex<Vec<InputFields>>>,
}

impl RecordingPredictor {
    pub fn new(predicted: PredictedFields) -> (Self, Arc<Mutex<Vec<InputFields>>>) {
        let seen_inputs = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                predicted,
                seen_inputs: seen_inputs.clone(),
            },
            seen_inputs,
        )
    }
}

#[async_trait]
impl Predictor for RecordingPredictor {
    async fn predict(&self, input: &InputFields) -> Result<PredictedFields, SubmissionError> {
        self.seen_inputs.lock().push(input.clone());
        Ok(self.predicted)
    }
}
