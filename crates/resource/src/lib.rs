//! Filesystem implementations of the cardpress platform seams.
//!
//! - [`FilesystemUploadStore`]: reads raw logo uploads from a directory
//! - [`DirectoryDeliverySink`]: saves finished documents into a directory
//!
//! The in-memory counterparts are re-exported from `cardpress-traits`.

mod directory;
mod filesystem;

pub use directory::DirectoryDeliverySink;
pub use filesystem::FilesystemUploadStore;

pub use cardpress_traits::{InMemoryDeliverySink, InMemoryUploadStore};
