use crate::asset::DEFAULT_ASSET_TIMEOUT;
use std::time::Duration;

/// Settings shared by every generation request of one [`CardGenerator`].
///
/// [`CardGenerator`]: super::CardGenerator
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Upper bound for reading an uploaded logo; `None` waits forever.
    pub asset_timeout: Option<Duration>,
    pub compress_streams: bool,
    /// Extension of delivered files, without the dot.
    pub artifact_extension: String,
    /// Written to the document's `/Info` dictionary.
    pub document_title: String,
    pub producer: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            asset_timeout: Some(DEFAULT_ASSET_TIMEOUT),
            compress_streams: true,
            artifact_extension: "pdf".to_string(),
            document_title: "Carte de visite".to_string(),
            producer: concat!("cardpress ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
