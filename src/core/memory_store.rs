//! In-memory key-value store
//!
//! `MemoryStore` keeps every slot in a `DashMap`, so one instance can be shared
//! (typically behind an `Arc`) between a writer and any number of readers.
//! It is the default backend for tests and for embedding the store in a host
//! that owns persistence itself.

use crate::core::traits::KeyValueStore;
use crate::types::SurveyError;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Thread-safe in-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Stored text by key
    slots: DashMap<String, String>,

    /// When set, every `set` call fails without touching `slots`
    reject_writes: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail (or succeed again)
    ///
    /// Used to exercise the write-failure path of callers.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SurveyError> {
        Ok(self.slots.get(key).map(|slot| slot.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SurveyError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(SurveyError::storage(key, "write rejected"));
        }

        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
