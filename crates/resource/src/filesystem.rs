//! Filesystem-based upload store.
//!
//! Uploads are resolved relative to a base directory. Keys that would leave
//! that directory (absolute paths, `..` components, symlinks pointing outside)
//! are reported as not found.

use cardpress_traits::{SharedUploadData, UploadError, UploadStore};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Reads uploaded files from a directory on the local filesystem.
#[derive(Debug)]
pub struct FilesystemUploadStore {
    base_path: PathBuf,
    /// Canonicalized base path for containment checks.
    canonical_base: Option<PathBuf>,
}

impl FilesystemUploadStore {
    /// The base directory may not exist yet; containment is then checked by
    /// path components only.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Returns `None` when the key would escape the base directory.
    fn resolve_key(&self, key: &Path) -> Option<PathBuf> {
        if key.is_absolute() {
            return None;
        }
        if key
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return None;
        }

        let full_path = self.base_path.join(key);
        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }
        Some(full_path)
    }
}

impl UploadStore for FilesystemUploadStore {
    fn read(&self, key: &Path) -> Result<SharedUploadData, UploadError> {
        let display = key.display().to_string();
        let full_path = self
            .resolve_key(key)
            .ok_or_else(|| UploadError::NotFound(format!("{} (outside upload directory)", display)))?;

        let data = std::fs::read(&full_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                UploadError::NotFound(display.clone())
            } else {
                UploadError::ReadFailed {
                    key: display.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        if data.is_empty() {
            return Err(UploadError::Empty(display));
        }
        log::debug!("Read upload '{}' ({} bytes)", display, data.len());
        Ok(Arc::new(data))
    }

    fn contains(&self, key: &Path) -> bool {
        self.resolve_key(key).is_some_and(|p| p.is_file())
    }

    fn name(&self) -> &'static str {
        "FilesystemUploadStore"
    }
}
