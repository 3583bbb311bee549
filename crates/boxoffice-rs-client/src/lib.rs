//! HTTP client for the external prediction service.
//!
//! Sends the sanitized movie attributes as one JSON `POST` and turns the
//! service's `received` object into [`PredictedFields`](boxoffice_rs_model::PredictedFields).

mod client;
mod error;
mod response;

pub use client::{PredictionClient, Predictor};
pub use error::SubmissionError;
