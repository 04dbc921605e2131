pub mod delivery;
pub mod upload;

pub use delivery::{
    DeliveryError, DeliverySink, InMemoryDeliverySink, SharedArtifact, validate_artifact_name,
};
pub use upload::{InMemoryUploadStore, SharedUploadData, UploadError, UploadStore};
