use boxoffice_rs_history::{HistoryError, HistoryStore};
use boxoffice_rs_model::PredictionRecord;
use std::io;

/// Store whose writes always fail; reads are empty.
#[derive(Debug, Clone, Default)]
pub struct FailingHistoryStore;

impl FailingHistoryStore {
    pub fn new() -> Self {
        Self
    }
}

impl HistoryStore for FailingHistoryStore {
    fn load(&self) -> Vec<PredictionRecord> {
        Vec::new()
    }

    fn append(&self, _record: PredictionRecord) -> Result<(), HistoryError> {
        Err(HistoryError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "history is read-only",
        )))
    }

    fn clear(&self) -> Result<(), HistoryError> {
        Ok(())
    }
}
