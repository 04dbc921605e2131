//! Raster image embedding.
//!
//! PNG and JPEG take separate decode paths: PNG pixels are re-encoded as a
//! Flate-compressed image (plus an `SMask` when the alpha channel is not fully
//! opaque), while JPEG bytes are validated and embedded as-is under
//! `DCTDecode`. The caller chooses the path through [`ImageCodec`]; nothing in
//! here sniffs the payload format again.

use crate::content::flate_compress;
use crate::document::{CardDocument, ImageId, PageHandle};
use crate::error::EmbedError;
use cardpress_types::{ImageCodec, Rect};
use image::{ColorType, DynamicImage, ImageFormat};

/// An image ready to be written as a PDF image XObject.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub codec: ImageCodec,
    pub width: u32,
    pub height: u32,
    pub color_space: &'static str,
    pub bits_per_component: u8,
    pub filter: &'static str,
    pub data: Vec<u8>,
    /// Flate-compressed 8-bit alpha samples, present only for non-opaque PNGs.
    pub alpha: Option<Vec<u8>>,
    /// Samples are stored inverted (Adobe CMYK JPEGs) and need a `Decode`
    /// array that flips every component.
    pub inverted: bool,
}

impl EncodedImage {
    pub fn decode(codec: ImageCodec, bytes: &[u8]) -> Result<Self, EmbedError> {
        if bytes.is_empty() {
            return Err(EmbedError::EmptyPayload(codec));
        }
        match codec {
            ImageCodec::Png => decode_png(bytes),
            ImageCodec::Jpeg => decode_jpeg(bytes),
        }
    }

    /// Number of color components per sample.
    pub fn components(&self) -> usize {
        match self.color_space {
            "DeviceGray" => 1,
            "DeviceCMYK" => 4,
            _ => 3,
        }
    }
}

fn load(codec: ImageCodec, bytes: &[u8], format: ImageFormat) -> Result<DynamicImage, EmbedError> {
    let decoded = image::load_from_memory_with_format(bytes, format).map_err(|e| {
        EmbedError::Decode {
            codec,
            message: e.to_string(),
        }
    })?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(EmbedError::Decode {
            codec,
            message: "image has zero width or height".to_string(),
        });
    }
    Ok(decoded)
}

fn is_grayscale(color: ColorType) -> bool {
    matches!(
        color,
        ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16
    )
}

fn compress(codec: ImageCodec, data: &[u8]) -> Result<Vec<u8>, EmbedError> {
    flate_compress(data).map_err(|e| EmbedError::Decode {
        codec,
        message: format!("failed to compress samples: {}", e),
    })
}

fn decode_png(bytes: &[u8]) -> Result<EncodedImage, EmbedError> {
    let codec = ImageCodec::Png;
    let decoded = load(codec, bytes, ImageFormat::Png)?;
    let (width, height) = (decoded.width(), decoded.height());
    let pixel_count = (width as usize) * (height as usize);

    let mut alpha = Vec::with_capacity(pixel_count);
    let (color_space, samples) = if is_grayscale(decoded.color()) {
        let luma = decoded.to_luma_alpha8();
        let mut gray = Vec::with_capacity(pixel_count);
        for pixel in luma.pixels() {
            let [l, a] = pixel.0;
            gray.push(l);
            alpha.push(a);
        }
        ("DeviceGray", gray)
    } else {
        let rgba = decoded.to_rgba8();
        let mut rgb = Vec::with_capacity(pixel_count * 3);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }
        ("DeviceRGB", rgb)
    };

    let alpha = if alpha.iter().any(|&a| a != u8::MAX) {
        Some(compress(codec, &alpha)?)
    } else {
        None
    };

    Ok(EncodedImage {
        codec,
        width,
        height,
        color_space,
        bits_per_component: 8,
        filter: "FlateDecode",
        data: compress(codec, &samples)?,
        alpha,
        inverted: false,
    })
}

/// Frame facts read from the JPEG markers. The decoder converts CMYK to RGB,
/// so the embedded color space has to come from the frame header itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct JpegFrame {
    components: u8,
    adobe: bool,
}

fn scan_jpeg_frame(bytes: &[u8]) -> Option<JpegFrame> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut adobe = false;
    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        let marker = bytes[pos + 1];
        if marker == 0xFF {
            pos += 1;
            continue;
        }
        let length = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
        let payload = bytes.get(pos + 4..pos + 2 + length)?;
        match marker {
            0xEE if payload.starts_with(b"Adobe") => adobe = true,
            // SOF0..SOF15, minus DHT, JPG and DAC
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                let components = *payload.get(5)?;
                return Some(JpegFrame { components, adobe });
            }
            0xDA => return None,
            _ => {}
        }
        pos += 2 + length;
    }
    None
}

fn decode_jpeg(bytes: &[u8]) -> Result<EncodedImage, EmbedError> {
    let codec = ImageCodec::Jpeg;
    let decoded = load(codec, bytes, ImageFormat::Jpeg)?;
    let frame = scan_jpeg_frame(bytes).ok_or_else(|| EmbedError::Decode {
        codec,
        message: "missing JPEG frame header".to_string(),
    })?;
    let (color_space, inverted) = match frame.components {
        1 => ("DeviceGray", false),
        3 => ("DeviceRGB", false),
        4 => ("DeviceCMYK", frame.adobe),
        n => {
            return Err(EmbedError::Decode {
                codec,
                message: format!("unsupported JPEG component count {}", n),
            });
        }
    };

    Ok(EncodedImage {
        codec,
        width: decoded.width(),
        height: decoded.height(),
        color_space,
        bits_per_component: 8,
        filter: "DCTDecode",
        data: bytes.to_vec(),
        alpha: None,
        inverted,
    })
}

/// Decodes an image, registers it in the document's image table and draws it
/// on a page.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageEmbedder;

impl ImageEmbedder {
    pub fn new() -> Self {
        Self
    }

    /// The page and rectangle are checked before anything is decoded, so a
    /// failed call leaves the document untouched.
    pub fn embed(
        &self,
        doc: &mut CardDocument,
        page: PageHandle,
        codec: ImageCodec,
        bytes: &[u8],
        rect: Rect,
    ) -> Result<ImageId, EmbedError> {
        doc.page(page)?;
        if rect.is_empty() {
            return Err(EmbedError::EmptyRect {
                width: rect.width,
                height: rect.height,
            });
        }

        let encoded = EncodedImage::decode(codec, bytes)?;
        log::debug!(
            "Decoded {} logo: {}x{} {}",
            codec,
            encoded.width,
            encoded.height,
            encoded.color_space
        );
        let image_id = doc.register_image(encoded);
        doc.draw_image(page, image_id, rect)?;
        Ok(image_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentOptions;
    use cardpress_types::PageSpec;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    /// An 8x8 four-component baseline JPEG: one quantization table, DC and
    /// AC Huffman tables holding a single one-bit code each, and every block
    /// coded as "DC diff 0, EOB".
    fn cmyk_jpeg(adobe: bool) -> Vec<u8> {
        let mut out = vec![0xFF, 0xD8];
        if adobe {
            out.extend_from_slice(&[0xFF, 0xEE, 0x00, 0x0E]);
            out.extend_from_slice(b"Adobe");
            out.extend_from_slice(&[0x00, 0x64, 0x00, 0x00, 0x00, 0x00, 0x00]);
        }
        out.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x43, 0x00]);
        out.extend_from_slice(&[1u8; 64]);
        out.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x14, 0x08, 0x00, 0x08, 0x00, 0x08, 0x04]);
        for id in 1..=4u8 {
            out.extend_from_slice(&[id, 0x11, 0x00]);
        }
        out.extend_from_slice(&[0xFF, 0xC4, 0x00, 0x26]);
        for class in [0x00u8, 0x10] {
            out.push(class);
            out.push(1);
            out.extend_from_slice(&[0u8; 15]);
            out.push(0x00);
        }
        out.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x0E, 0x04]);
        for id in 1..=4u8 {
            out.extend_from_slice(&[id, 0x00]);
        }
        out.extend_from_slice(&[0x00, 0x3F, 0x00]);
        out.push(0x00);
        out.extend_from_slice(&[0xFF, 0xD9]);
        out
    }

    fn logo_rect() -> Rect {
        Rect::new(140.0, 90.0, 40.0, 40.0)
    }

    #[test]
    fn opaque_png_has_no_soft_mask() {
        let png = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([200, 10, 10]))),
            ImageFormat::Png,
        );
        let encoded = EncodedImage::decode(ImageCodec::Png, &png).unwrap();
        assert_eq!((encoded.width, encoded.height), (3, 2));
        assert_eq!(encoded.color_space, "DeviceRGB");
        assert_eq!(encoded.filter, "FlateDecode");
        assert!(encoded.alpha.is_none());
    }

    #[test]
    fn translucent_png_keeps_alpha() {
        let png = encode(
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 128]))),
            ImageFormat::Png,
        );
        let encoded = EncodedImage::decode(ImageCodec::Png, &png).unwrap();
        assert!(encoded.alpha.is_some());
    }

    #[test]
    fn grayscale_png_uses_device_gray() {
        let png = encode(
            DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([90]))),
            ImageFormat::Png,
        );
        let encoded = EncodedImage::decode(ImageCodec::Png, &png).unwrap();
        assert_eq!(encoded.color_space, "DeviceGray");
    }

    #[test]
    fn jpeg_bytes_are_embedded_unchanged() {
        let jpeg = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([10, 120, 30]))),
            ImageFormat::Jpeg,
        );
        let encoded = EncodedImage::decode(ImageCodec::Jpeg, &jpeg).unwrap();
        assert_eq!(encoded.filter, "DCTDecode");
        assert_eq!(encoded.data, jpeg);
        assert_eq!((encoded.width, encoded.height), (8, 8));
    }

    #[test]
    fn cmyk_jpeg_keeps_its_color_space() {
        let encoded = EncodedImage::decode(ImageCodec::Jpeg, &cmyk_jpeg(false)).unwrap();
        assert_eq!(encoded.color_space, "DeviceCMYK");
        assert_eq!(encoded.components(), 4);
        assert!(!encoded.inverted);

        let adobe = EncodedImage::decode(ImageCodec::Jpeg, &cmyk_jpeg(true)).unwrap();
        assert_eq!(adobe.color_space, "DeviceCMYK");
        assert!(adobe.inverted);
        assert_eq!(adobe.data, cmyk_jpeg(true));
    }

    #[test]
    fn rgb_jpeg_frame_has_three_components() {
        let jpeg = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([10, 120, 30]))),
            ImageFormat::Jpeg,
        );
        assert_eq!(
            scan_jpeg_frame(&jpeg),
            Some(JpegFrame { components: 3, adobe: false })
        );
        assert_eq!(scan_jpeg_frame(b"not a jpeg"), None);
    }

    #[test]
    fn codec_selects_the_decode_path() {
        let jpeg = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([10, 120, 30]))),
            ImageFormat::Jpeg,
        );
        let result = EncodedImage::decode(ImageCodec::Png, &jpeg);
        assert!(matches!(
            result,
            Err(EmbedError::Decode { codec: ImageCodec::Png, .. })
        ));
    }

    #[test]
    fn corrupt_png_fails_without_touching_the_document() {
        let mut doc = CardDocument::new(DocumentOptions::default());
        let page = doc.add_page(PageSpec::from_mm(85.0, 55.0));

        let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
        bytes.extend_from_slice(&[0u8; 32]);
        let result = ImageEmbedder::new().embed(&mut doc, page, ImageCodec::Png, &bytes, logo_rect());

        assert!(matches!(result, Err(EmbedError::Decode { .. })));
        assert_eq!(doc.image_count(), 0);
        assert!(doc.page(page).unwrap().images().is_empty());
    }

    #[test]
    fn empty_payload_and_empty_rect_are_rejected() {
        let mut doc = CardDocument::new(DocumentOptions::default());
        let page = doc.add_page(PageSpec::from_mm(85.0, 55.0));
        let embedder = ImageEmbedder::new();

        let result = embedder.embed(&mut doc, page, ImageCodec::Jpeg, &[], logo_rect());
        assert!(matches!(result, Err(EmbedError::EmptyPayload(ImageCodec::Jpeg))));

        let result = embedder.embed(
            &mut doc,
            page,
            ImageCodec::Jpeg,
            &[0xFF, 0xD8, 0xFF],
            Rect::new(0.0, 0.0, 0.0, 10.0),
        );
        assert!(matches!(result, Err(EmbedError::EmptyRect { .. })));
    }

    #[test]
    fn embeds_onto_the_requested_page() {
        let mut doc = CardDocument::new(DocumentOptions::default());
        let front = doc.add_page(PageSpec::from_mm(85.0, 55.0));
        let back = doc.add_page(PageSpec::from_mm(85.0, 55.0));
        let png = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]))),
            ImageFormat::Png,
        );

        ImageEmbedder::new()
            .embed(&mut doc, front, ImageCodec::Png, &png, logo_rect())
            .unwrap();

        assert_eq!(doc.image_count(), 1);
        assert_eq!(doc.page(front).unwrap().images().len(), 1);
        assert!(doc.page(back).unwrap().images().is_empty());
    }
}
