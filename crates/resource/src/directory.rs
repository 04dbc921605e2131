//! Delivery sink that saves documents into a directory.

use cardpress_traits::{DeliveryError, DeliverySink, validate_artifact_name};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Saves each delivered document as a file inside `output_dir`.
///
/// Bytes are first written to a temporary file in the same directory and then
/// renamed into place, so readers only ever see complete documents.
#[derive(Debug, Clone)]
pub struct DirectoryDeliverySink {
    output_dir: PathBuf,
}

impl DirectoryDeliverySink {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_atomically(&self, bytes: &[u8], target: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.output_dir)?;
        let mut staged = tempfile::Builder::new()
            .prefix(".cardpress-")
            .suffix(".part")
            .tempfile_in(&self.output_dir)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(target).map_err(|e| e.error)?;
        Ok(())
    }
}

impl DeliverySink for DirectoryDeliverySink {
    fn deliver(&self, bytes: &[u8], suggested_name: &str) -> Result<(), DeliveryError> {
        validate_artifact_name(suggested_name)?;
        if bytes.is_empty() {
            return Err(DeliveryError::EmptyDocument(suggested_name.to_string()));
        }

        let target = self.output_dir.join(suggested_name);
        self.write_atomically(bytes, &target)
            .map_err(|e| DeliveryError::WriteFailed {
                name: suggested_name.to_string(),
                message: e.to_string(),
            })?;
        log::info!("Saved {} ({} bytes)", target.display(), bytes.len());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "DirectoryDeliverySink"
    }
}
