//! Form controller: draft ownership and the submission state machine.

use crate::draft::{Draft, DraftEdit};
use crate::error::FormError;
use boxoffice_rs_client::{Predictor, SubmissionError};
use boxoffice_rs_history::HistoryStore;
use boxoffice_rs_model::{InputFields, PredictedFields, PredictionRecord, RecordId};
use log::{debug, info, warn};
use std::sync::Arc;

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Draft can be edited and submitted.
    Editing,
    /// Waiting for the prediction service.
    Submitting,
    /// The record was predicted and saved.
    Succeeded { record_id: RecordId },
    /// The last submission failed; the draft is intact.
    Failed { message: String },
}

impl FormState {
    fn label(&self) -> &'static str {
        match self {
            FormState::Editing => "editing",
            FormState::Submitting => "submitting",
            FormState::Succeeded { .. } => "showing a saved prediction",
            FormState::Failed { .. } => "failed",
        }
    }
}

/// Owns the draft and drives submissions into the history store.
pub struct FormController {
    draft: Draft,
    state: FormState,
    pending: Option<InputFields>,
    history: Arc<dyn HistoryStore>,
}

impl FormController {
    /// Create a controller with a fresh draft.
    pub fn new(history: Arc<dyn HistoryStore>) -> Self {
        Self::with_draft(history, Draft::new())
    }

    /// Create a controller starting from an existing draft.
    pub fn with_draft(history: Arc<dyn HistoryStore>, draft: Draft) -> Self {
        Self {
            draft,
            state: FormState::Editing,
            pending: None,
            history,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Whether a submission is awaiting its result.
    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Stored history, most recent first.
    pub fn history(&self) -> Vec<PredictionRecord> {
        self.history.load()
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        match self.state {
            FormState::Editing | FormState::Failed { .. } => Ok(()),
            ref other => Err(FormError::NotEditable(other.label())),
        }
    }

    /// Apply an edit to the draft.
    ///
    /// Editing after a failure returns the form to `Editing`.
    pub fn apply(&mut self, edit: DraftEdit) -> Result<&Draft, FormError> {
        self.ensure_editable()?;
        self.draft = self.draft.apply(edit)?;
        self.state = FormState::Editing;
        Ok(&self.draft)
    }

    /// Restore the preset draft. History is untouched.
    pub fn reset(&mut self) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::NotEditable(self.state.label()));
        }
        debug!("form reset");
        self.draft = Draft::new();
        self.state = FormState::Editing;
        Ok(())
    }

    /// Leave a finished submission and start a fresh draft.
    pub fn start_new(&mut self) -> Result<(), FormError> {
        self.reset()
    }

    /// Validate the draft and enter `Submitting`.
    ///
    /// Returns the sanitized input to send to the prediction service.
    pub fn begin_submit(&mut self) -> Result<InputFields, FormError> {
        if self.is_submitting() {
            return Err(FormError::SubmissionInFlight);
        }
        self.ensure_editable()?;
        let input = self.draft.to_input()?;
        info!("submission started (title={})", input.title);
        self.state = FormState::Submitting;
        self.pending = Some(input.clone());
        Ok(input)
    }

    /// Finish the in-flight submission with the service result.
    ///
    /// On success the record is prepended to the history. Any failure leaves
    /// the draft untouched, stores nothing and moves to `Failed`.
    pub fn complete_submit(
        &mut self,
        result: Result<PredictedFields, SubmissionError>,
    ) -> Result<PredictionRecord, FormError> {
        if !self.is_submitting() {
            return Err(FormError::NotSubmitting);
        }
        let Some(input) = self.pending.take() else {
            return Err(FormError::NotSubmitting);
        };
        let outcome = result
            .map_err(FormError::from)
            .and_then(|predicted| {
                let record = PredictionRecord::new(input, predicted);
                self.history.append(record.clone())?;
                Ok(record)
            });
        match outcome {
            Ok(record) => {
                info!("prediction saved (id={})", record.id);
                self.state = FormState::Succeeded {
                    record_id: record.id,
                };
                Ok(record)
            }
            Err(err) => {
                warn!("submission failed: {err}");
                self.state = FormState::Failed {
                    message: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// Run a whole submission against a predictor.
    pub async fn submit(
        &mut self,
        predictor: &dyn Predictor,
    ) -> Result<PredictionRecord, FormError> {
        let input = self.begin_submit()?;
        let result = predictor.predict(&input).await;
        self.complete_submit(result)
    }
}
