// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bindery-document: Multi-page PDF assembly from an ordered set of images.
//
// Provides image decoding (format sniffing and dimension extraction), page
// layout (aspect-preserving fit inside a margin), PDF page writing, read-back
// inspection, and the assembler tying them together.

pub mod assembler;
pub mod image;
pub mod layout;
pub mod pdf;

// Re-export the primary structs so callers can use `bindery_document::DocumentAssembler` etc.
pub use assembler::{AssembledDocument, DocumentAssembler, PageSummary};
pub use crate::image::decoder::{DecodedImage, ImageDecoder};
pub use layout::{PageGeometry, plan};
pub use pdf::reader::PdfReader;
pub use pdf::sink::PageSink;
pub use pdf::writer::PdfWriter;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::Cursor;

    use ::image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, format).expect("encode fixture");
        out.into_inner()
    }

    /// Solid-colour RGB PNG.
    pub fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
        encode(DynamicImage::ImageRgb8(img), ImageFormat::Png)
    }

    /// RGB PNG with varied pixels, so the compressed data dominates the file.
    pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x ^ y) * 31 % 256) as u8])
        });
        encode(DynamicImage::ImageRgb8(img), ImageFormat::Png)
    }

    /// Half-transparent RGBA PNG.
    pub fn rgba_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 120, 220, 128]));
        encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
    }

    /// Solid-colour GIF.
    pub fn gif(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([90, 90, 200, 255]));
        encode(DynamicImage::ImageRgba8(img), ImageFormat::Gif)
    }

    /// Solid-colour 24-bit BMP.
    pub fn bmp(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([240, 200, 20]));
        encode(DynamicImage::ImageRgb8(img), ImageFormat::Bmp)
    }

    /// Solid-colour baseline JPEG.
    pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([30, 160, 60]));
        encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
    }
}
