//! Logo asset resolution.
//!
//! Normalizes every [`LogoAsset`] variant into one byte buffer plus the codec
//! sniffed from its magic bytes. Inline data URLs and in-memory bytes resolve
//! without waiting; uploaded files are read through the [`UploadStore`] on the
//! blocking pool, bounded by an optional timeout.

use crate::error::AssetError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cardpress_traits::{InMemoryUploadStore, UploadError, UploadStore};
use cardpress_types::{ImageCodec, LogoAsset};
use image::ImageFormat;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// How long an upload read may take before the logo is given up on.
pub const DEFAULT_ASSET_TIMEOUT: Duration = Duration::from_secs(10);

/// A logo ready for the image embedder.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub bytes: Vec<u8>,
    pub codec: ImageCodec,
}

impl std::fmt::Debug for ResolvedAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedAsset")
            .field("len", &self.bytes.len())
            .field("codec", &self.codec)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AssetResolver {
    uploads: Arc<dyn UploadStore>,
    timeout: Option<Duration>,
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryUploadStore::new()))
    }
}

impl AssetResolver {
    pub fn new(uploads: Arc<dyn UploadStore>) -> Self {
        Self {
            uploads,
            timeout: Some(DEFAULT_ASSET_TIMEOUT),
        }
    }

    /// `None` waits for uploads indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Resolves a logo. `Ok(None)` means there is no logo to draw.
    pub async fn resolve(&self, asset: &LogoAsset) -> Result<Option<ResolvedAsset>, AssetError> {
        match asset {
            LogoAsset::Absent => Ok(None),
            LogoAsset::InlineDataUrl(url) => decode_data_url(url).map(Some),
            LogoAsset::RawBytesWithMimeHint { bytes, mime_hint } => {
                classify(bytes.clone(), mime_hint.as_deref()).map(Some)
            }
            LogoAsset::UploadedFile { key, mime_hint } => {
                let bytes = self.read_upload(key).await?;
                classify(bytes, mime_hint.as_deref()).map(Some)
            }
        }
    }

    async fn read_upload(&self, key: &Path) -> Result<Vec<u8>, AssetError> {
        let store = Arc::clone(&self.uploads);
        let owned_key = key.to_path_buf();
        log::debug!("Reading logo upload '{}' from {}", key.display(), store.name());
        let read = tokio::task::spawn_blocking(move || store.read(&owned_key));

        let joined = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, read)
                .await
                .map_err(|_| AssetError::Timeout(limit))?,
            None => read.await,
        };
        let data = joined.map_err(|e| UploadError::ReadFailed {
            key: key.display().to_string(),
            message: e.to_string(),
        })??;

        Ok(Arc::try_unwrap(data).unwrap_or_else(|shared| shared.as_ref().clone()))
    }
}

/// Decodes a `data:` URL. Base64 payloads are decoded, anything else is taken
/// verbatim.
pub fn decode_data_url(url: &str) -> Result<ResolvedAsset, AssetError> {
    let rest = url
        .trim_start()
        .strip_prefix("data:")
        .ok_or_else(|| AssetError::UnsupportedType("inline logo is not a data URL".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AssetError::DecodeFailed("data URL has no payload separator".to_string()))?;

    let mut params = header.split(';');
    let declared = params.next().map(str::trim).filter(|m| !m.is_empty());
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        STANDARD
            .decode(payload.trim())
            .map_err(|e| AssetError::DecodeFailed(format!("invalid base64 payload: {}", e)))?
    } else {
        payload.as_bytes().to_vec()
    };
    classify(bytes, declared)
}

/// Picks the codec from the payload itself. A disagreeing hint is ignored.
pub fn classify(bytes: Vec<u8>, mime_hint: Option<&str>) -> Result<ResolvedAsset, AssetError> {
    if bytes.is_empty() {
        return Err(AssetError::DecodeFailed("logo payload is empty".to_string()));
    }
    let codec = sniff_codec(&bytes)?;

    if let Some(hint) = mime_hint
        && ImageCodec::from_mime(hint) != Some(codec)
    {
        log::warn!(
            "Logo declared as '{}' but its content is {}; using the detected format",
            hint,
            codec
        );
    }
    Ok(ResolvedAsset { bytes, codec })
}

pub fn sniff_codec(bytes: &[u8]) -> Result<ImageCodec, AssetError> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => Ok(ImageCodec::Png),
        Ok(ImageFormat::Jpeg) => Ok(ImageCodec::Jpeg),
        Ok(other) => Err(AssetError::DecodeFailed(format!(
            "{:?} images are not supported, use PNG or JPEG",
            other
        ))),
        Err(_) => Err(AssetError::DecodeFailed(
            "logo is neither PNG nor JPEG".to_string(),
        )),
    }
}
