//! Two-sided business cards rendered to PDF.
//!
//! A [`CardRequest`] (field values plus a template id) goes through the
//! [`CardGenerator`], which resolves the optional logo, composes a front and a
//! back page of 85 × 55 mm and serializes them with lopdf. The resulting bytes
//! leave through a [`DeliverySink`].

pub mod asset;
pub mod catalog;
pub mod compose;
pub mod error;
pub mod pipeline;

pub use asset::{AssetResolver, DEFAULT_ASSET_TIMEOUT, ResolvedAsset};
pub use catalog::{TemplateCatalog, TemplateEntry};
pub use compose::{LogoStatus, PageComposer};
pub use error::{AssetError, BuildError, CardError};
pub use pipeline::{
    CardGenerator, CardGeneratorBuilder, CompositionReport, GeneratedCard, GeneratorConfig,
    suggested_file_name,
};

pub use cardpress_render_lopdf::{CardDocument, EmbedError, ImageEmbedder, RenderError};
pub use cardpress_resource::{DirectoryDeliverySink, FilesystemUploadStore};
pub use cardpress_traits::{
    DeliveryError, DeliverySink, InMemoryDeliverySink, InMemoryUploadStore, UploadError,
    UploadStore,
};
pub use cardpress_types::{
    CardFieldValues, CardRequest, Color, ImageCodec, LogoAsset, MM_TO_PT, PageSpec, TemplateId,
};
