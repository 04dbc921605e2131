//! An in-memory PDF document built page by page.
//!
//! Pages keep their drawing operations until [`CardDocument::save_to_bytes`],
//! which writes one content stream per page plus the shared font, the image
//! table and the document catalog. Image XObjects are added to the underlying
//! `lopdf::Document` as soon as they are registered.

use crate::content::{FONT_RESOURCE, PageCanvas, flate_compress, to_win_ansi};
use crate::error::RenderError;
use crate::image::EncodedImage;
use cardpress_types::{PageSpec, Rect, TextRun};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

const PDF_VERSION: &str = "1.7";
const BASE_FONT: &str = "Helvetica";

#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Flate-compress page content streams.
    pub compress_streams: bool,
    pub title: Option<String>,
    pub producer: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            compress_streams: true,
            title: None,
            producer: "cardpress".to_string(),
        }
    }
}

/// Zero-based position of a page in its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageHandle(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(usize);

#[derive(Debug, Clone)]
struct RegisteredImage {
    resource_name: String,
    object_id: ObjectId,
}

pub struct CardDocument {
    doc: Document,
    options: DocumentOptions,
    pages: Vec<PageCanvas>,
    images: Vec<RegisteredImage>,
}

impl std::fmt::Debug for CardDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDocument")
            .field("pages", &self.pages.len())
            .field("images", &self.images.len())
            .field("options", &self.options)
            .finish()
    }
}

impl CardDocument {
    pub fn new(options: DocumentOptions) -> Self {
        Self {
            doc: Document::with_version(PDF_VERSION),
            options,
            pages: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn add_page(&mut self, spec: PageSpec) -> PageHandle {
        self.pages.push(PageCanvas::new(spec));
        PageHandle(self.pages.len() - 1)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, handle: PageHandle) -> Result<&PageCanvas, RenderError> {
        self.pages
            .get(handle.0)
            .ok_or(RenderError::UnknownPage(handle.0))
    }

    fn page_mut(&mut self, handle: PageHandle) -> Result<&mut PageCanvas, RenderError> {
        self.pages
            .get_mut(handle.0)
            .ok_or(RenderError::UnknownPage(handle.0))
    }

    pub fn draw_text(&mut self, page: PageHandle, run: TextRun) -> Result<(), RenderError> {
        self.page_mut(page)?.draw_text(run);
        Ok(())
    }

    /// Adds the image (and its soft mask, if any) to the document and returns
    /// the id used to draw it. The image is named `Im<n>` in page resources.
    pub fn register_image(&mut self, image: EncodedImage) -> ImageId {
        let components = image.components();
        let smask_id = image.alpha.map(|alpha| {
            let mask = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8_i64,
                "Filter" => "FlateDecode",
            };
            self.doc.add_object(Stream::new(mask, alpha))
        });

        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width as i64,
            "Height" => image.height as i64,
            "ColorSpace" => image.color_space,
            "BitsPerComponent" => image.bits_per_component as i64,
            "Filter" => image.filter,
        };
        if let Some(mask_id) = smask_id {
            dict.set("SMask", mask_id);
        }
        if image.inverted {
            let decode: Vec<Object> = (0..components)
                .flat_map(|_| [Object::Integer(1), Object::Integer(0)])
                .collect();
            dict.set("Decode", Object::Array(decode));
        }
        let object_id = self.doc.add_object(Stream::new(dict, image.data));

        let id = ImageId(self.images.len());
        self.images.push(RegisteredImage {
            resource_name: format!("Im{}", self.images.len() + 1),
            object_id,
        });
        id
    }

    pub fn draw_image(&mut self, page: PageHandle, image: ImageId, rect: Rect) -> Result<(), RenderError> {
        let name = self
            .images
            .get(image.0)
            .map(|registered| registered.resource_name.clone())
            .ok_or(RenderError::UnknownImage(image.0))?;
        self.page_mut(page)?.draw_image(&name, rect);
        Ok(())
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    fn page_resources(&self, page: &PageCanvas, font_id: ObjectId) -> Dictionary {
        let mut resources = dictionary! {
            "Font" => dictionary! { FONT_RESOURCE => font_id },
        };

        let mut xobjects = Dictionary::new();
        for placement in page.images() {
            if let Some(registered) = self
                .images
                .iter()
                .find(|img| img.resource_name == placement.resource_name)
            {
                xobjects.set(registered.resource_name.as_bytes(), registered.object_id);
            }
        }
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }
        resources
    }

    fn content_stream(&self, page: &PageCanvas) -> Result<Stream, RenderError> {
        let raw = page.encode()?;
        if self.options.compress_streams {
            let compressed = flate_compress(&raw)?;
            Ok(Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed))
        } else {
            Ok(Stream::new(Dictionary::new(), raw))
        }
    }

    /// Serializes the document. Output is byte-for-byte deterministic for the
    /// same drawing calls: no timestamps or random ids are written.
    pub fn save_to_bytes(mut self) -> Result<Vec<u8>, RenderError> {
        if self.pages.is_empty() {
            return Err(RenderError::Invariant("document has no pages".to_string()));
        }

        let font_id = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => BASE_FONT,
            "Encoding" => "WinAnsiEncoding",
        });
        let pages_id = self.doc.new_object_id();

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let stream = self.content_stream(page)?;
            let resources = self.page_resources(page, font_id);
            let spec = page.spec();
            let content_id = self.doc.add_object(stream);
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    0.0f32.into(),
                    0.0f32.into(),
                    (spec.width_pt as f32).into(),
                    (spec.height_pt as f32).into(),
                ],
                "Contents" => content_id,
                "Resources" => resources,
            });
            kids.push(Object::Reference(page_id));
        }

        let page_count = kids.len() as i64;
        self.doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::String(to_win_ansi(&self.options.producer), StringFormat::Literal),
        };
        if let Some(title) = &self.options.title {
            info.set(
                "Title",
                Object::String(to_win_ansi(title), StringFormat::Literal),
            );
        }
        let info_id = self.doc.add_object(info);
        self.doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        log::debug!(
            "Serialized {} page(s) with {} image(s) into {} bytes",
            self.pages.len(),
            self.images.len(),
            buffer.len()
        );
        Ok(buffer)
    }
}
