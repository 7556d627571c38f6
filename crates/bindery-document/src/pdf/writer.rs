// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: build a multi-page image PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::collections::BTreeMap;

use bindery_core::{EmbedFormat, PagePlacement};
use image::{DynamicImage, ImageFormat};
use printpdf::{
    DictItem, ExternalStream, ExternalXObject, ImageCompression, ImageOptimizationOptions, Mm,
    Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, Px, RawImage, RawImageData,
    RawImageFormat, XObjectId, XObjectTransform,
};
use tracing::{debug, instrument};

use crate::image::decoder::DecodedImage;
use crate::pdf::sink::PageSink;

/// Images are placed at 72 DPI, so one pixel is one point before scaling.
const PLACEMENT_DPI: f32 = 72.0;

/// Millimetres per point.
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Accumulates image pages for a single output document.
///
/// JPEG payloads are stored as-is behind `/DCTDecode`. Everything else is
/// embedded from its decoded pixels and Flate-compressed, so no image is
/// re-encoded lossily.
pub struct PdfWriter {
    doc: PdfDocument,
    /// Page width in points.
    page_width: f32,
    /// Page height in points.
    page_height: f32,
    /// Pages already closed by `begin_page`.
    done: Vec<PdfPage>,
    /// Operations on the current page.
    current: Vec<Op>,
}

impl PdfWriter {
    /// Create a writer whose first page already exists.
    pub fn new(page_width: f32, page_height: f32, title: &str) -> Self {
        Self {
            doc: PdfDocument::new(title),
            page_width,
            page_height,
            done: Vec::new(),
            current: Vec::new(),
        }
    }

    /// Page dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        (
            Mm(self.page_width * MM_PER_PT),
            Mm(self.page_height * MM_PER_PT),
        )
    }

    fn close_current(&mut self) {
        let (page_w, page_h) = self.page_dimensions();
        let ops = std::mem::take(&mut self.current);
        self.done.push(PdfPage::new(page_w, page_h, ops));
    }

    /// Register the image as an XObject, returning its id and its size in
    /// pixels as printpdf will see it.
    fn add_xobject(&mut self, image: &DecodedImage) -> (XObjectId, usize, usize) {
        if let Some(xobject) = dct_passthrough(image) {
            debug!(bytes = image.payload.len(), "JPEG payload embedded without re-encoding");
            let (width, height) = (image.width as usize, image.height as usize);
            return (self.doc.add_xobject(&xobject), width, height);
        }
        let raw = raw_image(&image.pixels);
        let (width, height) = (raw.width, raw.height);
        (self.doc.add_image(&raw), width, height)
    }
}

impl PageSink for PdfWriter {
    fn begin_page(&mut self) {
        self.close_current();
        debug!(page = self.page_count(), "Page appended");
    }

    /// The negotiated `format` is informational: what gets embedded is
    /// decided by the payload's sniffed format and the decoded pixels.
    #[instrument(skip(self, image, format), fields(format = %format, width = image.width, height = image.height))]
    fn place_image(
        &mut self,
        image: &DecodedImage,
        format: EmbedFormat,
        placement: &PagePlacement,
    ) -> Result<(), String> {
        if image.pixels.width() != image.width || image.pixels.height() != image.height {
            return Err(format!(
                "decoded pixels are {}x{} but the image reports {}x{}",
                image.pixels.width(),
                image.pixels.height(),
                image.width,
                image.height
            ));
        }

        let (xobject_id, width_px, height_px) = self.add_xobject(image);
        self.current.push(Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(placement.x)),
                translate_y: Some(Pt(placement.y)),
                scale_x: Some(placement.width / width_px as f32),
                scale_y: Some(placement.height / height_px as f32),
                dpi: Some(PLACEMENT_DPI),
                rotate: None,
            },
        });

        debug!(
            rendered_w_pt = placement.width,
            rendered_h_pt = placement.height,
            "Image placed on page"
        );
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.done.len() + 1
    }

    fn finish(mut self) -> Vec<u8> {
        self.close_current();
        let pages = std::mem::take(&mut self.done);
        self.doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = self.doc.save(&save_options(), &mut warnings);
        debug!(
            pages = self.doc.pages.len(),
            warnings = warnings.len(),
            bytes = output.len(),
            "PDF serialised"
        );
        output
    }
}

/// Lossless Flate for pixel images, at their original resolution.
fn save_options() -> PdfSaveOptions {
    PdfSaveOptions {
        image_optimization: Some(ImageOptimizationOptions {
            quality: None,
            max_image_size: None,
            dither_greyscale: None,
            convert_to_greyscale: None,
            auto_optimize: Some(false),
            format: Some(ImageCompression::Flate),
        }),
        ..Default::default()
    }
}

/// Wrap a JPEG payload as a `/DCTDecode` image stream. Returns `None` for
/// anything that is not a greyscale or RGB JPEG; CMYK JPEGs in particular go
/// through the pixel path.
fn dct_passthrough(image: &DecodedImage) -> Option<ExternalXObject> {
    if image.detected != Some(ImageFormat::Jpeg) {
        return None;
    }
    let color_space: &[u8] = match jpeg_components(&image.payload)? {
        1 => b"DeviceGray",
        3 => b"DeviceRGB",
        _ => return None,
    };

    let name = |value: &[u8]| DictItem::Name(value.to_vec());
    let dict = BTreeMap::from([
        ("Type".to_string(), name(b"XObject")),
        ("Subtype".to_string(), name(b"Image")),
        ("Width".to_string(), DictItem::Int(i64::from(image.width))),
        ("Height".to_string(), DictItem::Int(i64::from(image.height))),
        ("ColorSpace".to_string(), name(color_space)),
        ("BitsPerComponent".to_string(), DictItem::Int(8)),
        ("Filter".to_string(), name(b"DCTDecode")),
    ]);
    Some(ExternalXObject {
        stream: ExternalStream {
            dict,
            content: image.payload.to_vec(),
            compress: false,
        },
        width: Some(Px(image.width as usize)),
        height: Some(Px(image.height as usize)),
        dpi: Some(PLACEMENT_DPI),
    })
}

/// Component count from a JPEG's frame header, or `None` if no frame header
/// precedes the scan data.
fn jpeg_components(data: &[u8]) -> Option<u8> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut i = 2;
    while i + 4 <= data.len() {
        if data[i] != 0xFF {
            return None;
        }
        let marker = data[i + 1];
        if marker == 0xFF {
            // Fill byte.
            i += 1;
            continue;
        }
        // SOF0..SOF15, excluding DHT (C4), JPG (C8) and DAC (CC).
        if (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            // Length(2) precision(1) height(2) width(2) components(1).
            return data.get(i + 9).copied();
        }
        if marker == 0xDA {
            return None;
        }
        let length = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        i += 2 + length;
    }
    None
}

/// Convert decoded pixels to printpdf's raw image, keeping alpha when present.
fn raw_image(pixels: &DynamicImage) -> RawImage {
    let (data, data_format) = if pixels.color().has_alpha() {
        (pixels.to_rgba8().into_raw(), RawImageFormat::RGBA8)
    } else {
        (pixels.to_rgb8().into_raw(), RawImageFormat::RGB8)
    };
    RawImage {
        pixels: RawImageData::U8(data),
        width: pixels.width() as usize,
        height: pixels.height() as usize,
        data_format,
        tag: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::image::decoder::ImageDecoder;
    use crate::pdf::reader::PdfReader;
    use bindery_core::ImageItem;

    fn decoded(bytes: Vec<u8>) -> DecodedImage {
        ImageDecoder::decode(&ImageItem::new(bytes, "image/png", "fixture"), 1).expect("decodes")
    }

    fn placement() -> PagePlacement {
        PagePlacement {
            width: 100.0,
            height: 50.0,
            x: 40.0,
            y: 40.0,
        }
    }

    #[test]
    fn first_page_is_implicit() {
        let mut writer = PdfWriter::new(600.0, 800.0, "test");
        assert_eq!(writer.page_count(), 1);
        writer.begin_page();
        assert_eq!(writer.page_count(), 2);
    }

    #[test]
    fn writes_one_page_per_begin() {
        let image = decoded(fixtures::png(20, 10));
        let mut writer = PdfWriter::new(600.0, 800.0, "test");
        writer
            .place_image(&image, EmbedFormat::Png, &placement())
            .expect("png embeds");
        writer.begin_page();
        writer
            .place_image(&image, EmbedFormat::Png, &placement())
            .expect("png embeds");

        let bytes = writer.finish();
        assert!(bytes.starts_with(b"%PDF"));
        let reader = PdfReader::from_bytes(&bytes).expect("readable");
        assert_eq!(reader.page_count(), 2);
    }

    #[test]
    fn alpha_images_embed() {
        let image = decoded(fixtures::rgba_png(8, 8));
        let mut writer = PdfWriter::new(600.0, 800.0, "test");
        assert!(writer.place_image(&image, EmbedFormat::Png, &placement()).is_ok());
    }

    /// Streams in `bytes` whose `/Filter` is `filter`.
    fn streams_with_filter(bytes: &[u8], filter: &[u8]) -> Vec<lopdf::Stream> {
        let doc = lopdf::Document::load_mem(bytes).expect("readable");
        doc.objects
            .values()
            .filter_map(|object| object.as_stream().ok())
            .filter(|stream| {
                stream.dict.get(b"Filter").and_then(lopdf::Object::as_name).ok() == Some(filter)
            })
            .cloned()
            .collect()
    }

    #[test]
    fn negotiated_format_does_not_gate_embedding() {
        // PNG pixels with a JPEG hint, as happens after fallback.
        let image = decoded(fixtures::png(20, 10));
        let mut writer = PdfWriter::new(600.0, 800.0, "test");
        writer
            .place_image(&image, EmbedFormat::Jpeg, &placement())
            .expect("decoded pixels always embed");
        let bytes = writer.finish();
        assert_eq!(PdfReader::from_bytes(&bytes).expect("readable").page_count(), 1);
    }

    #[test]
    fn jpeg_payload_is_stored_verbatim() {
        let image = decoded(fixtures::jpeg(24, 16));
        let mut writer = PdfWriter::new(600.0, 800.0, "test");
        writer
            .place_image(&image, EmbedFormat::Jpeg, &placement())
            .expect("jpeg embeds");

        let dct = streams_with_filter(&writer.finish(), b"DCTDecode");
        assert_eq!(dct.len(), 1);
        assert_eq!(dct[0].content, &*image.payload);
        assert_eq!(dct[0].dict.get(b"Width").and_then(lopdf::Object::as_i64).ok(), Some(24));
    }

    #[test]
    fn png_is_stored_losslessly() {
        let image = decoded(fixtures::gradient_png(32, 32));
        let mut writer = PdfWriter::new(600.0, 800.0, "test");
        writer
            .place_image(&image, EmbedFormat::Png, &placement())
            .expect("png embeds");

        let bytes = writer.finish();
        assert!(streams_with_filter(&bytes, b"DCTDecode").is_empty());
        assert!(!streams_with_filter(&bytes, b"FlateDecode").is_empty());
    }

    #[test]
    fn component_count_from_frame_header() {
        assert_eq!(jpeg_components(&fixtures::jpeg(8, 8)), Some(3));

        let mut grey = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(::image::GrayImage::new(8, 8))
            .write_to(&mut grey, ImageFormat::Jpeg)
            .expect("encode");
        assert_eq!(jpeg_components(grey.get_ref()), Some(1));

        assert_eq!(jpeg_components(&fixtures::png(8, 8)), None);
        assert_eq!(jpeg_components(&[0xFF, 0xD8, 0xFF]), None);
    }

    #[test]
    fn inconsistent_dimensions_are_rejected() {
        let mut image = decoded(fixtures::png(20, 10));
        image.width = 21;
        let mut writer = PdfWriter::new(600.0, 800.0, "test");
        let err = writer
            .place_image(&image, EmbedFormat::Png, &placement())
            .expect_err("pixels and reported size disagree");
        assert!(err.contains("20x10"));
    }
}
