use super::layout::{BACK_EMAIL, BACK_PHONE, FRONT_NAME, FRONT_TITLE, LOGO_RECT};
use crate::asset::AssetResolver;
use cardpress_render_lopdf::{CardDocument, ImageEmbedder, PageHandle, RenderError};
use cardpress_types::{CardFieldValues, ImageCodec};
use log::{debug, warn};

/// What happened to the logo slot of a front page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoStatus {
    /// No logo was supplied.
    Absent,
    Embedded(ImageCodec),
    /// A logo was supplied but could not be resolved or embedded.
    Skipped(String),
}

/// Places text runs and the logo on the two card pages.
///
/// Logo problems never fail composition; they are logged and reported through
/// [`LogoStatus`]. Only drawing on a page that is not in the document is an
/// error.
#[derive(Debug, Clone, Default)]
pub struct PageComposer {
    resolver: AssetResolver,
    embedder: ImageEmbedder,
}

impl PageComposer {
    pub fn new(resolver: AssetResolver) -> Self {
        Self {
            resolver,
            embedder: ImageEmbedder::new(),
        }
    }

    pub fn resolver(&self) -> &AssetResolver {
        &self.resolver
    }

    pub async fn compose_front(
        &self,
        doc: &mut CardDocument,
        page: PageHandle,
        fields: &CardFieldValues,
    ) -> Result<LogoStatus, RenderError> {
        doc.draw_text(page, FRONT_NAME.run(fields.name.as_deref()))?;
        doc.draw_text(page, FRONT_TITLE.run(fields.title.as_deref()))?;
        Ok(self.place_logo(doc, page, fields).await)
    }

    pub fn compose_back(
        &self,
        doc: &mut CardDocument,
        page: PageHandle,
        fields: &CardFieldValues,
    ) -> Result<(), RenderError> {
        doc.draw_text(page, BACK_PHONE.run(fields.phone.as_deref()))?;
        doc.draw_text(page, BACK_EMAIL.run(fields.email.as_deref()))?;
        Ok(())
    }

    async fn place_logo(
        &self,
        doc: &mut CardDocument,
        page: PageHandle,
        fields: &CardFieldValues,
    ) -> LogoStatus {
        let asset = match self.resolver.resolve(&fields.logo).await {
            Ok(Some(asset)) => asset,
            Ok(None) => return LogoStatus::Absent,
            Err(e) => {
                warn!("Skipping logo: {}", e);
                return LogoStatus::Skipped(e.to_string());
            }
        };

        match self
            .embedder
            .embed(doc, page, asset.codec, &asset.bytes, LOGO_RECT)
        {
            Ok(_) => {
                debug!("Embedded {} logo ({} bytes)", asset.codec, asset.bytes.len());
                LogoStatus::Embedded(asset.codec)
            }
            Err(e) => {
                warn!("Skipping logo: {}", e);
                LogoStatus::Skipped(e.to_string())
            }
        }
    }
}
