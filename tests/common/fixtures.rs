#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cardpress::{CardFieldValues, CardRequest, LogoAsset};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, format)
        .expect("fixture image should encode");
    buf.into_inner()
}

/// A small opaque PNG logo
pub fn png_logo() -> Vec<u8> {
    encode(
        DynamicImage::ImageRgb8(RgbImage::from_fn(16, 16, |x, y| {
            Rgb([(x * 16) as u8, (y * 16) as u8, 128])
        })),
        ImageFormat::Png,
    )
}

/// A PNG logo with a half-transparent alpha channel
pub fn translucent_png_logo() -> Vec<u8> {
    encode(
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([20, 40, 200, 100]))),
        ImageFormat::Png,
    )
}

/// A small JPEG logo
pub fn jpeg_logo() -> Vec<u8> {
    encode(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([200, 30, 30]))),
        ImageFormat::Jpeg,
    )
}

/// An 8x8 CMYK JPEG with an Adobe marker, as written by print-oriented tools.
/// Every block is coded as a zero DC difference followed by end-of-block.
pub fn cmyk_jpeg_logo() -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8, 0xFF, 0xEE, 0x00, 0x0E];
    out.extend_from_slice(b"Adobe");
    out.extend_from_slice(&[0x00, 0x64, 0x00, 0x00, 0x00, 0x00, 0x00]);
    out.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x43, 0x00]);
    out.extend_from_slice(&[1u8; 64]);
    out.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x14, 0x08, 0x00, 0x08, 0x00, 0x08, 0x04]);
    for id in 1..=4u8 {
        out.extend_from_slice(&[id, 0x11, 0x00]);
    }
    out.extend_from_slice(&[0xFF, 0xC4, 0x00, 0x26]);
    for class in [0x00u8, 0x10] {
        out.extend_from_slice(&[class, 1]);
        out.extend_from_slice(&[0u8; 15]);
        out.push(0x00);
    }
    out.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x0E, 0x04]);
    for id in 1..=4u8 {
        out.extend_from_slice(&[id, 0x00]);
    }
    out.extend_from_slice(&[0x00, 0x3F, 0x00, 0x00, 0xFF, 0xD9]);
    out
}

/// Bytes that start like a PNG but carry no valid image
pub fn corrupt_png() -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(&[0xAB; 64]);
    bytes
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// All four text fields filled in, no logo
pub fn sample_fields() -> CardFieldValues {
    CardFieldValues {
        name: Some("Camille Durand".to_string()),
        title: Some("Architecte".to_string()),
        phone: Some("+33 6 12 34 56 78".to_string()),
        email: Some("camille@example.fr".to_string()),
        logo: LogoAsset::Absent,
    }
}

pub fn with_logo(logo: LogoAsset) -> CardFieldValues {
    CardFieldValues {
        logo,
        ..sample_fields()
    }
}

pub fn request(fields: CardFieldValues) -> CardRequest {
    CardRequest::new(fields, 1u32)
}
