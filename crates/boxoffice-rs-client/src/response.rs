//! Parsing of the prediction service response body.
//!
//! A body that is not JSON, or has no `received` object, fails the whole
//! submission. Inside `received`, each metric that is missing, null or not a
//! number becomes 0 so one broken field never loses the others.

use crate::error::SubmissionError;
use boxoffice_rs_model::PredictedFields;
use log::{debug, warn};
use serde_json::{Map, Value};

const RECEIVED_KEY: &str = "received";
const GROSS_WORLDWIDE_KEY: &str = "predicted_grossWorldwide";
const OPENING_WEEKEND_KEY: &str = "predicted_openingWeekendGross";
const WINS_KEY: &str = "predicted_wins";
const NOMINATIONS_KEY: &str = "predicted_nominations";
const RATING_KEY: &str = "predicted_IMDB_Rating";
const CRITIC_SCORE_KEY: &str = "predicted_meta_score";

/// Parse a raw response body into predicted fields.
pub(crate) fn parse_prediction(body: &str) -> Result<PredictedFields, SubmissionError> {
    let value: Value = serde_json::from_str(body).map_err(|err| {
        SubmissionError::MalformedResponse(format!("body is not valid JSON: {err}"))
    })?;
    let received = value
        .get(RECEIVED_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            SubmissionError::MalformedResponse(format!("missing `{RECEIVED_KEY}` object"))
        })?;

    Ok(PredictedFields {
        opening_weekend_gross: amount(received, OPENING_WEEKEND_KEY),
        gross_worldwide: amount(received, GROSS_WORLDWIDE_KEY),
        awards: count(received, WINS_KEY),
        nominations: count(received, NOMINATIONS_KEY),
        rating: amount(received, RATING_KEY),
        critic_score: amount(received, CRITIC_SCORE_KEY),
    })
}

/// Read a non-negative metric, defaulting to 0.
fn amount(received: &Map<String, Value>, key: &str) -> f64 {
    match received.get(key).and_then(Value::as_f64) {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        Some(value) => {
            debug!("clamping negative prediction to 0 (field={key}, value={value})");
            0.0
        }
        None => {
            warn!("prediction field missing or not numeric, defaulting to 0 (field={key})");
            0.0
        }
    }
}

/// Read a non-negative count, rounding fractional model output.
fn count(received: &Map<String, Value>, key: &str) -> u32 {
    amount(received, key).round() as u32
}
