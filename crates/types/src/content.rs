use crate::color::Color;
use serde::Serialize;
use std::fmt;

/// A single line of text placed at a fixed baseline position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub size_pt: f64,
    pub color: Color,
}

/// Raster encodings accepted for embedded images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ImageCodec {
    Png,
    Jpeg,
}

impl ImageCodec {
    /// Maps a declared mime type onto a codec. Only used as a hint.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.contains("png") {
            Some(ImageCodec::Png)
        } else if mime.contains("jpeg") || mime.contains("jpg") {
            Some(ImageCodec::Jpeg)
        } else {
            None
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageCodec::Png => "image/png",
            ImageCodec::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for ImageCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageCodec::Png => f.write_str("PNG"),
            ImageCodec::Jpeg => f.write_str("JPEG"),
        }
    }
}
