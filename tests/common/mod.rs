pub mod fixtures;
pub mod pdf_assertions;

use cardpress::{BuildError, CardGenerator, CardRequest, CompositionReport};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Generate a card with the default generator
pub fn generate_card(request: CardRequest) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let (pdf, _) = generate_card_with(&CardGenerator::default(), request)?;
    Ok(pdf)
}

/// Generate a card with a configured generator and keep the composition report
pub fn generate_card_with(
    generator: &CardGenerator,
    request: CardRequest,
) -> Result<(GeneratedPdf, CompositionReport), Box<dyn std::error::Error>> {
    let card = tokio::runtime::Runtime::new()?
        .block_on(async { generator.generate_with_report(request).await })?;
    Ok((GeneratedPdf::from_bytes(card.bytes)?, card.report))
}

/// Run `generate` and return the raw result, for error-path tests
#[allow(dead_code)]
pub fn try_generate(generator: &CardGenerator, request: CardRequest) -> Result<Vec<u8>, BuildError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| BuildError::SerializationFailed(e.to_string()))?
        .block_on(async { generator.generate(request).await })
}
