//! Local persistence for prediction history.
//!
//! History is a single JSON array stored under one storage key, most recent
//! record first. Reads never fail: missing or unreadable data is an empty
//! history.

pub mod error;
pub mod store;

/// History error type.
pub use error::HistoryError;
/// History store interface and implementations.
pub use store::{DEFAULT_STORAGE_KEY, FileHistoryStore, HistoryStore, MemoryHistoryStore};
