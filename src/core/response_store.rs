//! Survey response storage
//!
//! This module provides the ResponseStore component that persists the whole
//! dataset as one CSV document under a fixed key of an injected
//! [`KeyValueStore`].
//!
//! # Operations
//!
//! - `read_all`: decode the stored document; never fails
//! - `append`: read, push, re-encode, overwrite
//! - `extend`: same as `append` for a batch, in one write
//! - `export`: password-gated, BOM-prefixed copy of the document on disk
//!
//! # Concurrency
//!
//! `append` is a read-modify-write cycle without locking. Two writers sharing
//! one slot can lose updates; route concurrent appends through
//! [`AppendQueue`](crate::core::r#async::AppendQueue) instead.

use crate::core::auth::AdminGate;
use crate::core::statistics::Statistics;
use crate::core::traits::KeyValueStore;
use crate::io::csv_format::{decode, encode};
use crate::io::export::write_export;
use crate::types::{Record, SurveyError};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Key the document is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "survey_responses_csv";

/// Persists survey records as a CSV document in a key-value store
#[derive(Debug)]
pub struct ResponseStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ResponseStore<S> {
    /// Create a response store using [`DEFAULT_STORAGE_KEY`]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Create a response store using a custom key
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        ResponseStore {
            store,
            key: key.into(),
        }
    }

    /// Storage key of the document
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying key-value store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying key-value store
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Read every stored record, oldest first
    ///
    /// An absent document is an empty dataset. A failed read is logged and
    /// also treated as empty.
    pub fn read_all(&self) -> Vec<Record> {
        match self.load() {
            Ok(records) => records,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read responses, treating as empty");
                Vec::new()
            }
        }
    }

    /// Read every stored record, reporting storage failures
    ///
    /// Used by the write path so that a failed read is never mistaken for an
    /// empty dataset and written back over existing data.
    pub fn load(&self) -> Result<Vec<Record>, SurveyError> {
        let text = self.store.get(&self.key)?.unwrap_or_default();
        let records = decode(&text);
        debug!(key = %self.key, count = records.len(), "responses loaded");
        Ok(records)
    }

    /// Append one record after all existing ones
    ///
    /// # Errors
    ///
    /// Returns a storage error if the document cannot be read or written.
    /// On failure the stored document is unchanged.
    ///
    /// A failed read is an error here, unlike in [`read_all`](Self::read_all):
    /// treating it as an empty dataset would overwrite the stored document
    /// with the new record alone.
    pub fn append(&self, record: Record) -> Result<(), SurveyError> {
        self.extend(std::iter::once(record)).map(|_| ())
    }

    /// Append a batch of records, in order, with a single write
    ///
    /// Returns the number of records appended. An empty batch does not touch
    /// the store.
    pub fn extend<I>(&self, records: I) -> Result<usize, SurveyError>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut all = self.load()?;
        let before = all.len();
        all.extend(records);

        let added = all.len() - before;
        if added == 0 {
            return Ok(0);
        }

        self.store.set(&self.key, &encode(&all))?;
        info!(key = %self.key, added, total = all.len(), "responses appended");
        Ok(added)
    }

    /// The stored dataset re-encoded as a CSV document
    pub fn export_text(&self) -> String {
        encode(&self.read_all())
    }

    /// Tally the stored dataset
    pub fn statistics(&self) -> Statistics {
        Statistics::from_records(&self.read_all())
    }

    /// Write a password-gated export file into `dir`
    ///
    /// The file is named after `now` and starts with a UTF-8 byte-order mark.
    /// Returns the path of the written file.
    pub fn export(
        &self,
        gate: &AdminGate,
        password: &str,
        dir: &Path,
        now: DateTime<Utc>,
    ) -> Result<PathBuf, SurveyError> {
        gate.authorize(password)?;

        let path = write_export(dir, &self.export_text(), now)?;
        info!(path = %path.display(), "responses exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory_store::MemoryStore;
    use crate::io::export::BOM;
    use chrono::TimeZone;
    use std::fs;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn record(name: &str) -> Record {
        Record::new(name, "0912345678", "台北市", "藥師", "2024-01-01T00:00:00.000Z")
    }

    /// Store whose reads always fail
    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, key: &str) -> Result<Option<String>, SurveyError> {
            Err(SurveyError::storage(key, "read failed"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), SurveyError> {
            panic!("set must not be called after a failed read");
        }
    }

    #[test]
    fn test_read_all_empty_store() {
        let responses = ResponseStore::new(MemoryStore::new());
        assert!(responses.read_all().is_empty());
    }

    #[test]
    fn test_append_and_read_single() {
        let responses = ResponseStore::new(MemoryStore::new());
        responses.append(record("王小明")).unwrap();

        assert_eq!(responses.read_all(), vec![record("王小明")]);
    }

    #[test]
    fn test_append_preserves_order() {
        let responses = ResponseStore::new(MemoryStore::new());
        responses.append(record("A")).unwrap();
        responses.append(record("B")).unwrap();

        assert_eq!(responses.read_all(), vec![record("A"), record("B")]);
    }

    #[test]
    fn test_append_grows_by_exactly_one() {
        let responses = ResponseStore::new(MemoryStore::new());
        for i in 0..5 {
            let before = responses.read_all().len();
            let new = record(&format!("name{}", i));
            responses.append(new.clone()).unwrap();

            let after = responses.read_all();
            assert_eq!(after.len(), before + 1);
            assert_eq!(after.last(), Some(&new));
        }
    }

    #[test]
    fn test_append_writes_document_under_key() {
        let store = Arc::new(MemoryStore::new());
        let responses = ResponseStore::with_key(Arc::clone(&store), "custom");
        responses.append(record("王小明")).unwrap();

        assert_eq!(responses.key(), "custom");
        assert_eq!(
            store.get("custom").unwrap().unwrap(),
            "姓名,電話,地區,工作性質,提交時間\n王小明,0912345678,台北市,藥師,2024-01-01T00:00:00.000Z"
        );
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_append_write_failure_is_reported_and_keeps_data() {
        let store = Arc::new(MemoryStore::new());
        let responses = ResponseStore::new(Arc::clone(&store));
        responses.append(record("A")).unwrap();

        store.set_reject_writes(true);
        let result = responses.append(record("B"));
        assert!(matches!(result, Err(SurveyError::Storage { .. })));
        assert_eq!(responses.read_all(), vec![record("A")]);
    }

    #[test]
    fn test_read_failure_is_empty_for_readers_but_fatal_for_writers() {
        let responses = ResponseStore::new(UnreadableStore);

        assert!(responses.read_all().is_empty());
        assert!(matches!(
            responses.append(record("A")),
            Err(SurveyError::Storage { .. })
        ));
    }

    #[test]
    fn test_read_all_tolerates_foreign_text() {
        let store = MemoryStore::new();
        store.set(DEFAULT_STORAGE_KEY, "not,a\nreal,csv,file").unwrap();
        let responses = ResponseStore::new(store);

        assert_eq!(
            responses.read_all(),
            vec![Record::new("real", "csv", "file", "", "")]
        );
    }

    #[test]
    fn test_extend_batch() {
        let responses = ResponseStore::new(MemoryStore::new());
        responses.append(record("A")).unwrap();

        let added = responses.extend(vec![record("B"), record("C")]).unwrap();
        assert_eq!(added, 2);
        assert_eq!(
            responses.read_all(),
            vec![record("A"), record("B"), record("C")]
        );
    }

    #[test]
    fn test_extend_empty_batch_skips_write() {
        let store = Arc::new(MemoryStore::new());
        let responses = ResponseStore::new(Arc::clone(&store));

        assert_eq!(responses.extend(Vec::new()).unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_statistics() {
        let responses = ResponseStore::new(MemoryStore::new());
        responses.append(record("A")).unwrap();
        responses.append(record("B")).unwrap();

        let stats = responses.statistics();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.region_count("台北市"), 2);
    }

    #[test]
    fn test_export_requires_password() {
        let dir = tempdir().unwrap();
        let responses = ResponseStore::new(MemoryStore::new());
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let result = responses.export(&AdminGate::default(), "wrong", dir.path(), now);
        assert_eq!(result, Err(SurveyError::AuthenticationFailed));

        let result = responses.export(&AdminGate::default(), "", dir.path(), now);
        assert_eq!(result, Err(SurveyError::MissingPassword));

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_writes_bom_prefixed_document() {
        let dir = tempdir().unwrap();
        let responses = ResponseStore::new(MemoryStore::new());
        responses.append(record("王小明")).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let path = responses
            .export(&AdminGate::default(), "3939889", dir.path(), now)
            .unwrap();

        assert_eq!(
            path.file_name().unwrap(),
            "survey_responses_20240102_030405.csv"
        );
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(BOM));
        assert_eq!(&content[BOM.len_utf8()..], responses.export_text());
    }
}
