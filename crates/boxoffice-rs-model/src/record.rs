//! Prediction record persisted in the local history.

use crate::vocabulary::{ContentRating, Country, Genre, Language};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a prediction record.
pub type RecordId = Uuid;

/// Movie attributes sent to the prediction service.
///
/// Field names on the wire follow the service contract, which mixes
/// camelCase with `filming_location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputFields {
    /// Movie title.
    pub title: String,
    /// Free-form synopsis.
    #[serde(default)]
    pub description: String,
    /// Main filming location.
    #[serde(rename = "filming_location", default)]
    pub filming_location: String,
    /// Running time in minutes.
    pub duration: u32,
    /// Audience content rating.
    #[serde(rename = "mpaRating")]
    pub content_rating: ContentRating,
    /// Planned release date.
    pub release_date: NaiveDate,
    /// Selected genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Selected spoken languages.
    #[serde(default)]
    pub languages: Vec<Language>,
    /// Selected countries of origin.
    #[serde(default)]
    pub countries: Vec<Country>,
    /// Budget in whole USD.
    pub budget: u64,
    /// Principal cast names.
    #[serde(default)]
    pub stars: Vec<String>,
    /// Writer names.
    #[serde(default)]
    pub writers: Vec<String>,
    /// Director name.
    pub director: String,
    /// Production company names.
    #[serde(default)]
    pub production_companies: Vec<String>,
}

/// Metrics returned by the prediction service. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PredictedFields {
    /// Opening-weekend gross in USD.
    pub opening_weekend_gross: f64,
    /// Worldwide gross in USD.
    pub gross_worldwide: f64,
    /// Award wins.
    pub awards: u32,
    /// Award nominations.
    pub nominations: u32,
    /// Audience rating score.
    pub rating: f64,
    /// Critic score; older records predate this field.
    #[serde(default)]
    pub critic_score: f64,
}

/// One completed prediction: inputs, outputs and identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    /// Record identifier.
    pub id: RecordId,
    /// Creation timestamp.
    pub predicted_at: DateTime<Utc>,
    /// Submitted movie attributes.
    #[serde(flatten)]
    pub input: InputFields,
    /// Predicted metrics.
    #[serde(flatten)]
    pub predicted: PredictedFields,
}

impl PredictionRecord {
    /// Assemble a record with a fresh id and the current timestamp.
    pub fn new(input: InputFields, predicted: PredictedFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            predicted_at: Utc::now(),
            input,
            predicted,
        }
    }

    /// Submitted movie attributes.
    pub fn input(&self) -> &InputFields {
        &self.input
    }

    /// Predicted metrics.
    pub fn predicted(&self) -> &PredictedFields {
        &self.predicted
    }
}
