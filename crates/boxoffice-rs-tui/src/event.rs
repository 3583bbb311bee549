//! TUI event types for input and prediction results.

use boxoffice_rs_client::SubmissionError;
use boxoffice_rs_model::PredictedFields;
use crossterm::event::KeyEvent;

/// Application event emitted by the input handler or a prediction task.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event.
    Input(KeyEvent),
    /// Result of the in-flight prediction request.
    Prediction(Result<PredictedFields, SubmissionError>),
}
