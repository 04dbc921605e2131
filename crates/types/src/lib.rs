pub mod card;
pub mod color;
pub mod content;
pub mod geometry;

pub use card::{CardFieldValues, CardRequest, LogoAsset, TemplateId};
pub use color::Color;
pub use content::{ImageCodec, TextRun};
pub use geometry::{MM_TO_PT, PageSpec, Rect, mm_to_pt, pt_to_mm};
