// Page-level drawing state and content-stream helpers.

use crate::error::RenderError;
use cardpress_types::{Color, PageSpec, Rect, TextRun};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use std::io::Write;

/// Resource name of the single standard font every page uses.
pub const FONT_RESOURCE: &str = "F1";

/// An image drawn on a page, referencing the document's image table.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlacement {
    pub resource_name: String,
    pub rect: Rect,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct PageRenderState {
    font_size: Option<f32>,
    fill_color: Option<Color>,
}

/// Everything drawn on one page so far.
#[derive(Debug, Clone)]
pub struct PageCanvas {
    spec: PageSpec,
    content: Content,
    state: PageRenderState,
    text_runs: Vec<TextRun>,
    images: Vec<ImagePlacement>,
}

impl PageCanvas {
    pub(crate) fn new(spec: PageSpec) -> Self {
        Self {
            spec,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
            text_runs: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn spec(&self) -> PageSpec {
        self.spec
    }

    pub fn text_runs(&self) -> &[TextRun] {
        &self.text_runs
    }

    pub fn images(&self) -> &[ImagePlacement] {
        &self.images
    }

    pub fn operations(&self) -> &[Operation] {
        &self.content.operations
    }

    pub(crate) fn draw_text(&mut self, run: TextRun) {
        let ops = &mut self.content.operations;
        ops.push(Operation::new("BT", vec![]));

        let size = run.size_pt as f32;
        if self.state.font_size != Some(size) {
            ops.push(Operation::new("Tf", vec![Object::Name(FONT_RESOURCE.as_bytes().to_vec()), size.into()]));
            self.state.font_size = Some(size);
        }
        if self.state.fill_color != Some(run.color) {
            let [r, g, b] = run.color.to_unit();
            ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
            self.state.fill_color = Some(run.color);
        }

        ops.push(Operation::new(
            "Td",
            vec![(run.x as f32).into(), (run.y as f32).into()],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(&run.content), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
        self.text_runs.push(run);
    }

    pub(crate) fn draw_image(&mut self, resource_name: &str, rect: Rect) {
        let ops = &mut self.content.operations;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                (rect.width as f32).into(),
                0i64.into(),
                0i64.into(),
                (rect.height as f32).into(),
                (rect.x as f32).into(),
                (rect.y as f32).into(),
            ],
        ));
        ops.push(Operation::new(
            "Do",
            vec![Object::Name(resource_name.as_bytes().to_vec())],
        ));
        ops.push(Operation::new("Q", vec![]));
        self.images.push(ImagePlacement {
            resource_name: resource_name.to_string(),
            rect,
        });
    }

    /// The encoded (uncompressed) content stream of this page.
    pub fn encode(&self) -> Result<Vec<u8>, RenderError> {
        Ok(self.content.encode()?)
    }
}

/// Encodes text for the WinAnsi-encoded standard fonts. Characters outside the
/// encoding become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{0000}'..='\u{007F}' | '\u{00A0}'..='\u{00FF}' => c as u8,
        // cp1252 additions in 0x80..=0x9F
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => b'?',
    }
}

pub(crate) fn flate_compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
