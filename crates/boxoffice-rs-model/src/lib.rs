//! Record model and fixed vocabularies for box-office predictions.
//!
//! A [`PredictionRecord`] is the only persisted entity: the movie attributes
//! entered on the form plus the metrics returned by the prediction service.

pub mod error;
pub mod limits;
pub mod record;
pub mod vocabulary;

/// Vocabulary parse error.
pub use error::VocabularyError;
/// Input bounds enforced before submission.
pub use limits::{
    BUDGET_RANGE, DURATION_RANGE, MAX_PRODUCTION_COMPANIES, MAX_STARS, MAX_WRITERS,
};
/// Record types.
pub use record::{InputFields, PredictedFields, PredictionRecord, RecordId};
/// Fixed vocabularies for set-valued and categorical inputs.
pub use vocabulary::{ContentRating, Country, Genre, Language, Vocabulary};
