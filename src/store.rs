//! Best-score persistence.
//!
//! The engine only needs get-or-default and set. Loading never fails: a
//! missing or unreadable record counts as a best score of zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error writing a best-score record.
#[derive(Debug)]
pub enum StoreError {
    /// File system failure.
    Io(io::Error),
    /// Encoding failure.
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "best score I/O error: {e}"),
            StoreError::Json(e) => write!(f, "best score encoding error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Where the best score lives between games.
pub trait BestScoreStore {
    /// Stored best score, or 0 if none.
    fn load(&self) -> u64;

    /// Record a new best score.
    ///
    /// # Errors
    ///
    /// Returns an error if the score could not be persisted.
    fn save(&mut self, best: u64) -> Result<(), StoreError>;
}

/// In-process store; forgets everything on drop.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore {
    best: u64,
}

impl MemoryStore {
    /// Store starting at `best`.
    #[must_use]
    pub const fn new(best: u64) -> Self {
        Self { best }
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.best
    }

    fn save(&mut self, best: u64) -> Result<(), StoreError> {
        self.best = best;
        Ok(())
    }
}

/// On-disk record format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u64,
}

/// Best score kept in a small JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for JsonFileStore {
    fn load(&self) -> u64 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return 0,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read best score");
                return 0;
            }
        };
        match serde_json::from_str::<BestScoreRecord>(&text) {
            Ok(record) => record.best_score,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring malformed best score"
                );
                0
            }
        }
    }

    fn save(&mut self, best: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&BestScoreRecord { best_score: best })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load(), 0);
        store.save(128).unwrap();
        assert_eq!(store.load(), 128);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("best.json"));
        assert_eq!(store.load(), 0);
        store.save(2048).unwrap();
        assert_eq!(store.load(), 2048);
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, r#"{"best_score":2048}"#);
    }

    #[test]
    fn test_file_store_malformed_defaults_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(JsonFileStore::new(path).load(), 0);
    }

    #[test]
    fn test_file_store_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("missing").join("best.json"));
        assert!(matches!(store.save(4), Err(StoreError::Io(_))));
    }
}
