//! Two-page card documents rendered with lopdf.
//!
//! [`CardDocument`] collects text and images per page and serializes them with
//! the standard Helvetica font; [`ImageEmbedder`] turns PNG or JPEG bytes into
//! image XObjects placed on a page.

mod content;
mod document;
mod error;
mod image;

pub use content::{FONT_RESOURCE, ImagePlacement, PageCanvas, to_win_ansi};
pub use document::{CardDocument, DocumentOptions, ImageId, PageHandle};
pub use error::{EmbedError, RenderError};
pub use image::{EncodedImage, ImageEmbedder};
