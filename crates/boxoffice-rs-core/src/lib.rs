//! Form controller, draft editing and dashboard summary for box-office predictions.

pub mod controller;
pub mod dashboard;
pub mod draft;
pub mod error;

pub use controller::{FormController, FormState};
pub use dashboard::{DashboardSummary, TopGrossing, format_usd};
pub use draft::{Draft, DraftEdit, ListField};
pub use error::{FieldViolation, FormError};
