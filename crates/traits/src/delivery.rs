//! DeliverySink trait for the save/export side effect.
//!
//! A finished document leaves the engine through exactly one call to
//! [`DeliverySink::deliver`]. Swapping the sink (directory on disk, in-memory
//! map, browser download bridge) never touches document composition.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for delivery operations.
#[derive(Error, Debug, Clone)]
pub enum DeliveryError {
    #[error("Invalid artifact name '{0}'")]
    InvalidName(String),

    #[error("Failed to deliver '{name}': {message}")]
    WriteFailed { name: String, message: String },

    #[error("Refusing to deliver an empty document as '{0}'")]
    EmptyDocument(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DeliveryError {
    fn from(err: std::io::Error) -> Self {
        DeliveryError::Io(err.to_string())
    }
}

/// Shared document bytes (reference-counted).
pub type SharedArtifact = Arc<Vec<u8>>;

/// Exports a finished document under a suggested file name.
///
/// Implementations must either store the complete byte stream or fail; a
/// partially written artifact must never become visible.
pub trait DeliverySink: Send + Sync + Debug {
    fn deliver(&self, bytes: &[u8], suggested_name: &str) -> Result<(), DeliveryError>;

    /// Returns a human-readable name for this sink (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Rejects names that are empty or would escape a flat namespace.
pub fn validate_artifact_name(name: &str) -> Result<(), DeliveryError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains('/')
        || trimmed.contains('\\')
    {
        return Err(DeliveryError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// A sink that keeps delivered artifacts in memory, keyed by name.
#[derive(Debug, Default)]
pub struct InMemoryDeliverySink {
    artifacts: RwLock<BTreeMap<String, SharedArtifact>>,
}

impl InMemoryDeliverySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` if the lock is poisoned or nothing was delivered under `name`.
    pub fn get(&self, name: &str) -> Option<SharedArtifact> {
        self.artifacts.read().ok()?.get(name).cloned()
    }

    /// Names of all delivered artifacts, in lexical order.
    pub fn names(&self) -> Vec<String> {
        self.artifacts
            .read()
            .map(|a| a.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.artifacts.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DeliverySink for InMemoryDeliverySink {
    fn deliver(&self, bytes: &[u8], suggested_name: &str) -> Result<(), DeliveryError> {
        validate_artifact_name(suggested_name)?;
        if bytes.is_empty() {
            return Err(DeliveryError::EmptyDocument(suggested_name.to_string()));
        }
        let mut artifacts = self
            .artifacts
            .write()
            .map_err(|_| DeliveryError::WriteFailed {
                name: suggested_name.to_string(),
                message: "artifact store lock poisoned".to_string(),
            })?;
        artifacts.insert(suggested_name.to_string(), Arc::new(bytes.to_vec()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "InMemoryDeliverySink"
    }
}
