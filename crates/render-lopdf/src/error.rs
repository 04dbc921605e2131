use cardpress_types::ImageCodec;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Page {0} does not exist in this document")]
    UnknownPage(usize),
    #[error("Image {0} is not registered in this document")]
    UnknownImage(usize),
    #[error("Document invariant violated: {0}")]
    Invariant(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

/// Failure to place one image. Never fatal for the document as a whole.
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("{0} image payload is empty")]
    EmptyPayload(ImageCodec),
    #[error("Failed to decode {codec} image: {message}")]
    Decode { codec: ImageCodec, message: String },
    #[error("Image rectangle {width}x{height} has no area")]
    EmptyRect { width: f64, height: f64 },
    #[error(transparent)]
    Render(#[from] RenderError),
}
