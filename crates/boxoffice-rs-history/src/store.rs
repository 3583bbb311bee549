//! History store interface and implementations.

use crate::error::HistoryError;
use boxoffice_rs_model::PredictionRecord;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "predictions";

/// Ordered, prepend-only store of past predictions.
///
/// Storage access is synchronous; the store has a single writer (the form
/// controller) so implementations only need to be safe to share.
pub trait HistoryStore: Send + Sync {
    /// Read the full history, most recent first.
    ///
    /// Returns an empty list when nothing is stored or the stored value
    /// cannot be parsed.
    fn load(&self) -> Vec<PredictionRecord>;

    /// Prepend a record and write the full list back.
    fn append(&self, record: PredictionRecord) -> Result<(), HistoryError>;

    /// Remove every stored record.
    fn clear(&self) -> Result<(), HistoryError>;
}

/// Decode a stored history value, treating corruption as an empty history.
fn decode_history(raw: &str, storage_key: &str) -> Vec<PredictionRecord> {
    match serde_json::from_str::<Vec<PredictionRecord>>(raw) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                "discarding unreadable history (storage_key={}, error={})",
                storage_key, err
            );
            Vec::new()
        }
    }
}

/// Put a record in front of the existing list, rejecting duplicate ids.
fn prepend(
    mut records: Vec<PredictionRecord>,
    record: PredictionRecord,
) -> Result<Vec<PredictionRecord>, HistoryError> {
    if records.iter().any(|existing| existing.id == record.id) {
        return Err(HistoryError::DuplicateId(record.id));
    }
    records.insert(0, record);
    Ok(records)
}

/// File-backed store keeping the history as one JSON array file.
#[derive(Debug)]
pub struct FileHistoryStore {
    /// Root directory for the history file.
    root: PathBuf,
    /// Storage key, used as the file stem.
    storage_key: String,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileHistoryStore {
    /// Create a new file-backed store under the given root.
    pub fn new(root: impl AsRef<Path>, storage_key: impl Into<String>) -> Result<Self, HistoryError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        let storage_key = storage_key.into();
        info!(
            "initialized file history store (root={}, storage_key={})",
            root.display(),
            storage_key
        );
        Ok(Self {
            root,
            storage_key,
            write_lock: Mutex::new(()),
        })
    }

    /// Path to the history file.
    pub fn path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.storage_key))
    }

    /// Path to the temporary history file.
    fn temp_path(&self) -> PathBuf {
        self.root.join(format!("{}.json.tmp", self.storage_key))
    }

    /// Read the stored list. A missing file is empty and unparseable content
    /// reads as empty; only I/O failures are errors.
    fn read_records(&self) -> Result<Vec<PredictionRecord>, HistoryError> {
        let path = self.path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&path)?;
        Ok(decode_history(&raw, &self.storage_key))
    }

    /// Rewrite the history file atomically.
    fn write_records(&self, records: &[PredictionRecord]) -> Result<(), HistoryError> {
        let temp_path = self.temp_path();
        {
            let mut file = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&temp_path)?;
            let encoded = serde_json::to_string(records)?;
            file.write_all(encoded.as_bytes())?;
            file.flush()?;
        }
        std::fs::rename(temp_path, self.path())?;
        Ok(())
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Vec<PredictionRecord> {
        match self.read_records() {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "failed to read history (path={}, error={})",
                    self.path().display(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn append(&self, record: PredictionRecord) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock();
        let record_id = record.id;
        // An unreadable file is left alone rather than overwritten.
        let records = prepend(self.read_records()?, record)?;
        self.write_records(&records)?;
        debug!(
            "appended history record (id={}, total={})",
            record_id,
            records.len()
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock();
        let path = self.path();
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        info!("history cleared (path={})", path.display());
        Ok(())
    }
}

/// In-process store holding the raw stored value, like a browser storage slot.
#[derive(Debug)]
pub struct MemoryHistoryStore {
    storage_key: String,
    slot: Mutex<Option<String>>,
}

impl MemoryHistoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_key(DEFAULT_STORAGE_KEY)
    }

    /// Create an empty store under a specific storage key.
    pub fn with_key(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            slot: Mutex::new(None),
        }
    }

    /// Create a store seeded with a raw stored value.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::new();
        *store.slot.lock() = Some(raw.into());
        store
    }

    /// Current raw stored value, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().clone()
    }
}

impl Default for MemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Vec<PredictionRecord> {
        match self.slot.lock().as_deref() {
            Some(raw) => decode_history(raw, &self.storage_key),
            None => Vec::new(),
        }
    }

    fn append(&self, record: PredictionRecord) -> Result<(), HistoryError> {
        let mut slot = self.slot.lock();
        let current = match slot.as_deref() {
            Some(raw) => decode_history(raw, &self.storage_key),
            None => Vec::new(),
        };
        let records = prepend(current, record)?;
        *slot = Some(serde_json::to_string(&records)?);
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        *self.slot.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FileHistoryStore, HistoryStore, MemoryHistoryStore, decode_history, prepend};
    use crate::HistoryError;
    use boxoffice_rs_model::{
        ContentRating, InputFields, PredictedFields, PredictionRecord,
    };
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn record(title: &str) -> PredictionRecord {
        PredictionRecord::new(
            InputFields {
                title: title.to_string(),
                description: String::new(),
                filming_location: String::new(),
                duration: 90,
                content_rating: ContentRating::AllAudiences,
                release_date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("date"),
                genres: Vec::new(),
                languages: Vec::new(),
                countries: Vec::new(),
                budget: 1_000_000,
                stars: Vec::new(),
                writers: Vec::new(),
                director: "D".to_string(),
                production_companies: Vec::new(),
            },
            PredictedFields::default(),
        )
    }

    fn titles(records: &[PredictionRecord]) -> Vec<String> {
        records.iter().map(|r| r.input.title.clone()).collect()
    }

    #[test]
    fn decode_treats_garbage_as_empty() {
        assert!(decode_history("not-json", "predictions").is_empty());
        assert!(decode_history("{\"a\":1}", "predictions").is_empty());
        assert!(decode_history("[]", "predictions").is_empty());
    }

    #[test]
    fn prepend_rejects_duplicate_ids() {
        let first = record("a");
        let records = prepend(Vec::new(), first.clone()).expect("prepend");
        let err = prepend(records, first.clone()).unwrap_err();
        assert!(matches!(err, HistoryError::DuplicateId(id) if id == first.id));
    }

    #[test]
    fn memory_store_reads_corrupted_value_as_empty() {
        let store = MemoryHistoryStore::with_raw("not-json");
        assert_eq!(store.load(), Vec::new());
    }

    #[test]
    fn memory_store_append_overwrites_corrupted_value() {
        let store = MemoryHistoryStore::with_raw("not-json");
        store.append(record("fresh")).expect("append");
        assert_eq!(titles(&store.load()), vec!["fresh".to_string()]);
    }

    #[test]
    fn file_store_prepends_and_persists() {
        let temp = tempdir().expect("tempdir");
        let store = FileHistoryStore::new(temp.path(), "predictions").expect("store");
        assert!(store.load().is_empty());

        store.append(record("first")).expect("first");
        store.append(record("second")).expect("second");

        let reopened = FileHistoryStore::new(temp.path(), "predictions").expect("reopen");
        assert_eq!(
            titles(&reopened.load()),
            vec!["second".to_string(), "first".to_string()]
        );
        assert!(temp.path().join("predictions.json").exists());
        assert!(!temp.path().join("predictions.json.tmp").exists());
    }

    #[test]
    fn file_store_append_keeps_unreadable_file() {
        let temp = tempdir().expect("tempdir");
        let store = FileHistoryStore::new(temp.path(), "predictions").expect("store");
        let bytes = vec![0xff, 0xfe, 0x00, 0x5b];
        std::fs::write(store.path(), &bytes).expect("seed");

        assert!(store.load().is_empty());
        let err = store.append(record("lost")).unwrap_err();
        assert!(matches!(err, HistoryError::Io(_)));
        assert_eq!(std::fs::read(store.path()).expect("read back"), bytes);
    }

    #[test]
    fn file_store_append_replaces_unparseable_history() {
        let temp = tempdir().expect("tempdir");
        let store = FileHistoryStore::new(temp.path(), "predictions").expect("store");
        std::fs::write(store.path(), "not-json").expect("seed");
        store.append(record("fresh")).expect("append");
        assert_eq!(titles(&store.load()), vec!["fresh".to_string()]);
    }

    #[test]
    fn file_store_clear_removes_history() {
        let temp = tempdir().expect("tempdir");
        let store = FileHistoryStore::new(temp.path(), "predictions").expect("store");
        store.append(record("gone")).expect("append");
        store.clear().expect("clear");
        assert!(store.load().is_empty());
        store.clear().expect("clear twice");
    }

    #[test]
    fn storage_keys_are_isolated() {
        let temp = tempdir().expect("tempdir");
        let a = FileHistoryStore::new(temp.path(), "a").expect("a");
        let b = FileHistoryStore::new(temp.path(), "b").expect("b");
        a.append(record("only-a")).expect("append");
        assert_eq!(a.load().len(), 1);
        assert!(b.load().is_empty());
    }
}
