// src/error.rs
use cardpress_render_lopdf::RenderError;
use cardpress_traits::{DeliveryError, UploadError};
use std::time::Duration;
use thiserror::Error;

/// Failure to turn a logo input into decodable image bytes.
///
/// Always recoverable: the page composer skips the logo slot and carries on.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Unsupported logo input: {0}")]
    UnsupportedType(String),

    #[error("Failed to decode logo: {0}")]
    DecodeFailed(String),

    #[error("Timed out after {0:?} waiting for the logo upload")]
    Timeout(Duration),

    #[error("Failed to read logo upload: {0}")]
    Unreadable(#[from] UploadError),
}

/// Document-level failure. No bytes are produced when one of these is returned.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    #[error("Failed to serialize document: {0}")]
    SerializationFailed(String),
}

impl From<RenderError> for BuildError {
    fn from(err: RenderError) -> Self {
        BuildError::SerializationFailed(err.to_string())
    }
}

/// Everything that can go wrong between a card request and a delivered file.
#[derive(Error, Debug)]
pub enum CardError {
    #[error("Generation failed: {0}")]
    Build(#[from] BuildError),

    /// The card was built but the sink refused it. The bytes are handed back
    /// so the caller can retry against another sink without regenerating.
    #[error("Delivery of {name} failed: {source}")]
    Delivery {
        source: DeliveryError,
        name: String,
        bytes: Vec<u8>,
    },
}

impl CardError {
    /// The finished document, when the failure happened after it was built.
    pub fn undelivered(&self) -> Option<(&str, &[u8])> {
        match self {
            CardError::Delivery { name, bytes, .. } => Some((name.as_str(), bytes.as_slice())),
            CardError::Build(_) => None,
        }
    }
}
