/// Points per millimeter.
pub const MM_TO_PT: f64 = 2.83465;

pub fn mm_to_pt(mm: f64) -> f64 {
    mm * MM_TO_PT
}

pub fn pt_to_mm(pt: f64) -> f64 {
    pt / MM_TO_PT
}

/// A rectangle in PDF user space (origin at the bottom-left corner of the page).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Page dimensions in points.
///
/// Every page of a card document shares one `PageSpec`, computed once from the
/// physical card size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    pub width_pt: f64,
    pub height_pt: f64,
}

impl PageSpec {
    pub fn from_mm(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_pt: mm_to_pt(width_mm),
            height_pt: mm_to_pt(height_mm),
        }
    }

    pub fn width_mm(&self) -> f64 {
        pt_to_mm(self.width_pt)
    }

    pub fn height_mm(&self) -> f64 {
        pt_to_mm(self.height_pt)
    }
}
