//! The fixed business-card layout.
//!
//! Coordinates are PDF points measured from the bottom-left corner of the
//! page. Every template id uses this layout.

use cardpress_types::{Color, PageSpec, Rect, TextRun};

pub const CARD_WIDTH_MM: f64 = 85.0;
pub const CARD_HEIGHT_MM: f64 = 55.0;

/// Gray used for the title line (0.2 per channel).
pub const TITLE_GRAY: Color = Color::gray(51);

/// A text slot with its position, style and the literal drawn when the field
/// is missing or empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSlot {
    pub fallback: &'static str,
    pub x: f64,
    pub y: f64,
    pub size_pt: f64,
    pub color: Color,
}

impl TextSlot {
    pub fn run(&self, value: Option<&str>) -> TextRun {
        let content = match value {
            Some(text) if !text.is_empty() => text,
            _ => self.fallback,
        };
        TextRun {
            content: content.to_string(),
            x: self.x,
            y: self.y,
            size_pt: self.size_pt,
            color: self.color,
        }
    }
}

pub const FRONT_NAME: TextSlot = TextSlot {
    fallback: "Nom",
    x: 20.0,
    y: 120.0,
    size_pt: 12.0,
    color: Color::BLACK,
};

pub const FRONT_TITLE: TextSlot = TextSlot {
    fallback: "Titre",
    x: 20.0,
    y: 100.0,
    size_pt: 10.0,
    color: TITLE_GRAY,
};

pub const BACK_PHONE: TextSlot = TextSlot {
    fallback: "Téléphone",
    x: 20.0,
    y: 120.0,
    size_pt: 10.0,
    color: Color::BLACK,
};

pub const BACK_EMAIL: TextSlot = TextSlot {
    fallback: "Email",
    x: 20.0,
    y: 100.0,
    size_pt: 10.0,
    color: Color::BLACK,
};

pub const LOGO_RECT: Rect = Rect::new(140.0, 90.0, 40.0, 40.0);

/// Both pages of a card share this size.
pub fn card_page_spec() -> PageSpec {
    PageSpec::from_mm(CARD_WIDTH_MM, CARD_HEIGHT_MM)
}
