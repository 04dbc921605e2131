#![allow(dead_code)]

use lopdf::Document as LopdfDocument;
use lopdf::content::Content;

/// Decoded (decompressed) content stream operations of a page, 1-based
pub fn page_operations(doc: &LopdfDocument, page_num: u32) -> Vec<lopdf::content::Operation> {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page_num) else {
        return Vec::new();
    };
    doc.get_page_content(*page_id)
        .ok()
        .and_then(|bytes| Content::decode(&bytes).ok())
        .map(|content| content.operations)
        .unwrap_or_default()
}

/// Raw string operands of every `Tj` on a page, in drawing order
pub fn page_text_runs(doc: &LopdfDocument, page_num: u32) -> Vec<Vec<u8>> {
    page_operations(doc, page_num)
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(|bytes| bytes.to_vec())
        .collect()
}

/// Number of images drawn on a page (`Do` operators)
pub fn page_image_draws(doc: &LopdfDocument, page_num: u32) -> usize {
    page_operations(doc, page_num)
        .iter()
        .filter(|op| op.operator == "Do")
        .count()
}

/// Number of XObjects a page lists in its resources
pub fn page_xobject_count(doc: &LopdfDocument, page_num: u32) -> usize {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page_num) else {
        return 0;
    };
    doc.get_dictionary(*page_id)
        .ok()
        .and_then(|page| page.get(b"Resources").ok())
        .and_then(|resources| resources.as_dict().ok())
        .and_then(|resources| resources.get(b"XObject").ok())
        .and_then(|xobjects| xobjects.as_dict().ok())
        .map(|xobjects| xobjects.len())
        .unwrap_or(0)
}

/// The image XObject dictionary drawn first on a page
pub fn first_page_image(doc: &LopdfDocument, page_num: u32) -> Option<lopdf::Dictionary> {
    let pages = doc.get_pages();
    let page = doc.get_dictionary(*pages.get(&page_num)?).ok()?;
    let xobjects = page
        .get(b"Resources")
        .ok()?
        .as_dict()
        .ok()?
        .get(b"XObject")
        .ok()?
        .as_dict()
        .ok()?;
    let (_, reference) = xobjects.iter().next()?;
    let stream = doc.get_object(reference.as_reference().ok()?).ok()?.as_stream().ok()?;
    Some(stream.dict.clone())
}

pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let pages = doc.get_pages();
    let page_id = pages.get(&page_num)?;
    let page_dict = doc.get_dictionary(*page_id).ok()?;
    let arr = page_dict.get(b"MediaBox").ok()?.as_array().ok()?;
    if arr.len() < 4 {
        return None;
    }
    let width = arr[2].as_float().ok()? - arr[0].as_float().ok()?;
    let height = arr[3].as_float().ok()? - arr[1].as_float().ok()?;
    Some((width, height))
}

/// Base font names referenced by the document's font objects
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = Vec::new();
    for object in doc.objects.values() {
        let Ok(dict) = object.as_dict() else { continue };
        let is_font = dict
            .get(b"Type")
            .and_then(|t| t.as_name())
            .is_ok_and(|name| name == b"Font");
        if is_font && let Ok(base_font) = dict.get(b"BaseFont").and_then(|b| b.as_name()) {
            fonts.push(String::from_utf8_lossy(base_font).to_string());
        }
    }
    fonts
}

// ============================================================================
// Fluent Assertion Macros
// ============================================================================

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert the text runs of a page, in drawing order
#[macro_export]
macro_rules! assert_page_text {
    ($pdf:expr, $page:expr, [$($text:expr),* $(,)?]) => {
        let runs = $crate::common::pdf_assertions::page_text_runs(&$pdf.doc, $page);
        let expected: Vec<Vec<u8>> = vec![$(cardpress_render_lopdf::to_win_ansi($text)),*];
        assert_eq!(
            runs,
            expected,
            "Page {} text runs differ",
            $page
        );
    };
}

/// Assert how many images a page draws and lists in its resources
#[macro_export]
macro_rules! assert_page_images {
    ($pdf:expr, $page:expr, $count:expr) => {
        let draws = $crate::common::pdf_assertions::page_image_draws(&$pdf.doc, $page);
        let listed = $crate::common::pdf_assertions::page_xobject_count(&$pdf.doc, $page);
        assert_eq!(draws, $count, "Page {} should draw {} image(s), drew {}", $page, $count, draws);
        assert_eq!(listed, $count, "Page {} should list {} image(s), listed {}", $page, $count, listed);
    };
}

/// Assert page dimensions in millimeters within 1e-3 mm
#[macro_export]
macro_rules! assert_page_size_mm {
    ($pdf:expr, $page:expr, $width_mm:expr, $height_mm:expr) => {
        let dims = $crate::common::pdf_assertions::get_page_dimensions(&$pdf.doc, $page);
        assert!(dims.is_some(), "Could not get dimensions for page {}", $page);
        let (w, h) = dims.unwrap();
        let w_mm = cardpress_types::pt_to_mm(w as f64);
        let h_mm = cardpress_types::pt_to_mm(h as f64);
        assert!(
            (w_mm - $width_mm).abs() < 1e-3,
            "Page {} width expected {} mm, got {}",
            $page,
            $width_mm,
            w_mm
        );
        assert!(
            (h_mm - $height_mm).abs() < 1e-3,
            "Page {} height expected {} mm, got {}",
            $page,
            $height_mm,
            h_mm
        );
    };
}
