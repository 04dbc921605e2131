// src/pipeline/builder.rs
use super::config::GeneratorConfig;
use super::generator::CardGenerator;
use crate::asset::AssetResolver;
use crate::catalog::TemplateCatalog;
use crate::compose::PageComposer;
use cardpress_traits::{InMemoryUploadStore, UploadStore};
use std::sync::Arc;
use std::time::Duration;

/// A builder for creating a [`CardGenerator`].
#[derive(Debug, Default)]
pub struct CardGeneratorBuilder {
    config: GeneratorConfig,
    uploads: Option<Arc<dyn UploadStore>>,
    catalog: Option<Arc<TemplateCatalog>>,
}

impl CardGeneratorBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Bounds how long an uploaded logo may take to read. `None` disables the bound.
    pub fn with_asset_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.asset_timeout = timeout;
        self
    }

    /// Enables or disables Flate compression of page content streams.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.config.compress_streams = compress;
        self
    }

    /// Selects where `LogoAsset::UploadedFile` keys are read from.
    /// Defaults to an empty in-memory store.
    pub fn with_upload_store(mut self, uploads: Arc<dyn UploadStore>) -> Self {
        self.uploads = Some(uploads);
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<TemplateCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Sets the extension of delivered file names (`pdf` by default).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.config.artifact_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_document_title(mut self, title: impl Into<String>) -> Self {
        self.config.document_title = title.into();
        self
    }

    pub fn build(self) -> CardGenerator {
        let uploads = self
            .uploads
            .unwrap_or_else(|| Arc::new(InMemoryUploadStore::new()));
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(TemplateCatalog::builtin()));

        log::debug!(
            "Building card generator: uploads={}, asset timeout={:?}, compression={}",
            uploads.name(),
            self.config.asset_timeout,
            self.config.compress_streams
        );
        let resolver = AssetResolver::new(uploads).with_timeout(self.config.asset_timeout);
        CardGenerator::new(self.config, catalog, PageComposer::new(resolver))
    }
}
