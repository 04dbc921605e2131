use super::builder::CardGeneratorBuilder;
use super::config::GeneratorConfig;
use crate::asset::AssetResolver;
use crate::catalog::TemplateCatalog;
use crate::compose::layout::card_page_spec;
use crate::compose::{LogoStatus, PageComposer};
use crate::error::BuildError;
use cardpress_render_lopdf::{CardDocument, DocumentOptions};
use cardpress_types::{CardFieldValues, CardRequest, TemplateId};
use log::{debug, info, warn};
use std::sync::Arc;

/// Number of pages every card document holds: front, then back.
pub const CARD_PAGE_COUNT: usize = 2;

/// How the optional parts of a card turned out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionReport {
    pub template_id: TemplateId,
    pub logo: LogoStatus,
}

#[derive(Debug, Clone)]
pub struct GeneratedCard {
    pub bytes: Vec<u8>,
    pub report: CompositionReport,
}

/// Builds two-page business-card documents.
///
/// Each call owns a fresh [`CardDocument`]; nothing is cached between requests,
/// so one generator can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct CardGenerator {
    config: Arc<GeneratorConfig>,
    catalog: Arc<TemplateCatalog>,
    composer: PageComposer,
}

impl Default for CardGenerator {
    fn default() -> Self {
        CardGeneratorBuilder::new().build()
    }
}

impl CardGenerator {
    pub(crate) fn new(
        config: GeneratorConfig,
        catalog: Arc<TemplateCatalog>,
        composer: PageComposer,
    ) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            composer,
        }
    }

    pub fn builder() -> CardGeneratorBuilder {
        CardGeneratorBuilder::new()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn resolver(&self) -> &AssetResolver {
        self.composer.resolver()
    }

    /// Renders the card and returns the serialized document.
    pub async fn generate(&self, request: CardRequest) -> Result<Vec<u8>, BuildError> {
        Ok(self.generate_with_report(request).await?.bytes)
    }

    /// Like [`generate`](Self::generate), but also reports whether the logo
    /// made it onto the card.
    pub async fn generate_with_report(&self, request: CardRequest) -> Result<GeneratedCard, BuildError> {
        let (fields, template_id) = required_inputs(request)?;

        match self.catalog.get(&template_id) {
            Some(entry) => info!("Generating card with template {} ({})", template_id, entry.title),
            None => warn!(
                "Template {} is not in the catalog, using the standard layout",
                template_id
            ),
        }

        let spec = card_page_spec();
        let mut doc = CardDocument::new(self.document_options());

        let front = doc.add_page(spec);
        let logo = self.composer.compose_front(&mut doc, front, &fields).await?;
        let back = doc.add_page(spec);
        self.composer.compose_back(&mut doc, back, &fields)?;

        if doc.page_count() != CARD_PAGE_COUNT {
            return Err(BuildError::SerializationFailed(format!(
                "card document has {} pages, expected {}",
                doc.page_count(),
                CARD_PAGE_COUNT
            )));
        }

        let bytes = doc.save_to_bytes()?;
        debug!("Card for template {} serialized to {} bytes", template_id, bytes.len());
        Ok(GeneratedCard {
            bytes,
            report: CompositionReport { template_id, logo },
        })
    }

    fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            compress_streams: self.config.compress_streams,
            title: Some(self.config.document_title.clone()),
            producer: self.config.producer.clone(),
        }
    }
}

fn required_inputs(request: CardRequest) -> Result<(CardFieldValues, TemplateId), BuildError> {
    let fields = request
        .fields
        .ok_or(BuildError::MissingInput("card field values"))?;
    let template_id = request
        .template_id
        .filter(|id| !id.is_blank())
        .ok_or(BuildError::MissingInput("template id"))?;
    Ok((fields, template_id))
}
