//! Test helpers shared across box-office crates.

pub mod fixtures;
pub mod history;
pub mod predictor;

pub use fixtures::{sample_input, scenario_prediction};
pub use history::FailingHistoryStore;
pub use predictor::{FailingPredictor, FixedPredictor, RecordingPredictor};
