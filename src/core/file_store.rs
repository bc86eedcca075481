//! File-backed key-value store
//!
//! Each key maps to one file, `<dir>/<key>.csv`. A missing file reads as an
//! absent value. Writes go to a temporary file in the same directory which is
//! then renamed over the target, so a failed write never leaves a truncated
//! document behind.

use crate::core::traits::KeyValueStore;
use crate::types::SurveyError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Extension of every slot file
const SLOT_EXTENSION: &str = "csv";

/// Key-value store persisting each slot as a file in one directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SurveyError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the slot files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    ///
    /// Keys must be plain file stems: empty keys, path separators and `..`
    /// are rejected.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, SurveyError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
            return Err(SurveyError::storage(key, "invalid storage key"));
        }

        Ok(self.dir.join(format!("{}.{}", key, SLOT_EXTENSION)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SurveyError> {
        let path = self.slot_path(key)?;

        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SurveyError::storage(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SurveyError> {
        let path = self.slot_path(key)?;

        let mut temp =
            NamedTempFile::new_in(&self.dir).map_err(|e| SurveyError::storage(key, e))?;
        temp.write_all(value.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| SurveyError::storage(key, e))?;
        temp.persist(&path)
            .map_err(|e| SurveyError::storage(key, e.error))?;

        debug!(key, path = %path.display(), bytes = value.len(), "slot written");
        Ok(())
    }
}
