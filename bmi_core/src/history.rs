//! Durable, newest-first log of BMI results.
//!
//! The whole history lives under a single backend key as a JSON array.
//! Storage failures never reach the caller: a blob that cannot be read or
//! is not a JSON array loads as an empty history, a single malformed entry
//! is skipped with a warning, and a failed write is logged while the
//! in-memory history stays authoritative for the rest of the session.

use crate::storage::KvBackend;
use crate::{ResultRecord, Result};

/// Default backend key for the serialized history
pub const DEFAULT_HISTORY_KEY: &str = "bmiHistory";

/// Ordered collection of result records backed by a key-value store
pub struct HistoryStore<B: KvBackend> {
    backend: B,
    key: String,
    records: Vec<ResultRecord>,
}

impl<B: KvBackend> HistoryStore<B> {
    /// Open the history stored under `key` and load it into memory
    pub fn open(backend: B, key: impl Into<String>) -> Self {
        let mut store = Self {
            backend,
            key: key.into(),
            records: Vec::new(),
        };
        store.load();
        store
    }

    /// Re-read the history from the backend, replacing the in-memory copy
    ///
    /// Returns an empty history if nothing is stored or the blob is corrupt.
    pub fn load(&mut self) -> &[ResultRecord] {
        self.records = match self.read_records() {
            Ok(records) => {
                tracing::debug!(
                    "Loaded {} history records from key {:?}",
                    records.len(),
                    self.key
                );
                records
            }
            Err(e) => {
                tracing::error!(
                    "Failed to load history from key {:?}: {}. Starting with empty history.",
                    self.key,
                    e
                );
                Vec::new()
            }
        };
        &self.records
    }

    fn read_records(&self) -> Result<Vec<ResultRecord>> {
        let blob = match self.backend.read(&self.key)? {
            Some(blob) => blob,
            None => return Ok(Vec::new()),
        };

        let entries: Vec<serde_json::Value> = serde_json::from_str(&blob)?;
        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<ResultRecord>(entry) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(
                        "Skipping malformed history entry {} under key {:?}: {}",
                        index,
                        self.key,
                        e
                    );
                }
            }
        }
        Ok(records)
    }

    /// Add a record as the newest entry and persist the full history
    pub fn append(&mut self, record: ResultRecord) {
        tracing::debug!("Appending history record {}", record.id);
        self.records.insert(0, record);
        self.persist();
    }

    /// Remove the record with the given id, keeping the order of the rest
    ///
    /// Removing an id that is not present is a no-op.
    pub fn remove(&mut self, id: &str) {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);

        if self.records.len() == before {
            tracing::debug!("No history record with id {}, nothing removed", id);
        } else {
            tracing::debug!("Removed history record {}", id);
        }
        self.persist();
    }

    /// Records, newest first
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ResultRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Most recently created record
    pub fn newest(&self) -> Option<&ResultRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Give the backend back, dropping the in-memory history
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Best-effort write of the whole history
    fn persist(&mut self) {
        let result = serde_json::to_string(&self.records)
            .map_err(crate::Error::from)
            .and_then(|blob| self.backend.write(&self.key, &blob));

        if let Err(e) = result {
            tracing::error!(
                "Failed to persist history under key {:?}: {}. Keeping in-memory state.",
                self.key,
                e
            );
        }
    }
}
