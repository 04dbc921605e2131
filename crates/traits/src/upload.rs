//! UploadStore trait for reading raw logo uploads.
//!
//! The composition engine never touches the filesystem directly; uploaded
//! files are read through this seam so the engine can run against local
//! storage, an in-memory map, or anything else that hands back bytes.

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for upload reads.
#[derive(Error, Debug, Clone)]
pub enum UploadError {
    #[error("Upload not found: {0}")]
    NotFound(String),

    #[error("Failed to read upload '{key}': {message}")]
    ReadFailed { key: String, message: String },

    #[error("Upload '{0}' is empty")]
    Empty(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        UploadError::Io(err.to_string())
    }
}

/// Shared upload bytes (reference-counted).
pub type SharedUploadData = Arc<Vec<u8>>;

/// A source of raw uploaded files, addressed by key.
///
/// Reads are blocking; callers that run on an async runtime are expected to
/// move them onto a blocking thread.
pub trait UploadStore: Send + Sync + Debug {
    /// Read the complete upload stored under `key`.
    fn read(&self, key: &Path) -> Result<SharedUploadData, UploadError>;

    /// Check whether an upload exists.
    fn contains(&self, key: &Path) -> bool;

    /// Returns a human-readable name for this store (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory upload store.
///
/// Uploads must be inserted before they are read. Works anywhere, which makes
/// it the default store and the one tests use.
#[derive(Debug, Default)]
pub struct InMemoryUploadStore {
    uploads: RwLock<HashMap<PathBuf, SharedUploadData>>,
}

impl InMemoryUploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an upload under `key`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::ReadFailed` if the internal lock is poisoned.
    pub fn insert(&self, key: impl Into<PathBuf>, data: Vec<u8>) -> Result<(), UploadError> {
        let key = key.into();
        let mut uploads = self.uploads.write().map_err(|_| UploadError::ReadFailed {
            key: key.display().to_string(),
            message: "upload store lock poisoned".to_string(),
        })?;
        uploads.insert(key, Arc::new(data));
        Ok(())
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.uploads.read().map(|u| u.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UploadStore for InMemoryUploadStore {
    fn read(&self, key: &Path) -> Result<SharedUploadData, UploadError> {
        let display = key.display().to_string();
        let uploads = self.uploads.read().map_err(|_| UploadError::ReadFailed {
            key: display.clone(),
            message: "upload store lock poisoned".to_string(),
        })?;
        let data = uploads
            .get(key)
            .cloned()
            .ok_or_else(|| UploadError::NotFound(display.clone()))?;
        if data.is_empty() {
            return Err(UploadError::Empty(display));
        }
        Ok(data)
    }

    fn contains(&self, key: &Path) -> bool {
        self.uploads
            .read()
            .map(|u| u.contains_key(key))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryUploadStore"
    }
}
