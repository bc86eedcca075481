//! Core traits for the storage backends
//!
//! The response store never reaches for ambient global state: it is handed a
//! [`KeyValueStore`] and talks to it only through `get`/`set`. This lets tests
//! run against an in-memory fake and lets the CLI persist to files without the
//! codec knowing the difference.

use crate::types::SurveyError;
use std::sync::Arc;

/// Trait for a key-value store holding text values
///
/// Implementations use interior mutability so a single handle can be shared.
/// A write must be atomic at the storage layer: when `set` fails, the value
/// previously stored under the key must be left unchanged.
pub trait KeyValueStore {
    /// Get the text stored under `key`, or `None` if nothing is stored
    fn get(&self, key: &str) -> Result<Option<String>, SurveyError>;

    /// Replace the text stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), SurveyError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, SurveyError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SurveyError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, SurveyError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SurveyError> {
        (**self).set(key, value)
    }
}
