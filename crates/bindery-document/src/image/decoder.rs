// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image decoder: sniff the raster format from the payload's magic bytes,
// decode it far enough to prove it is renderable, and report its intrinsic
// pixel dimensions. The declared MIME type plays no part here.

use std::io::Cursor;
use std::sync::Arc;

use bindery_core::error::{BinderyError, Result};
use bindery_core::ImageItem;
use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::{debug, instrument};

/// A validated image ready for layout and embedding.
///
/// Owned by the assembly call that produced it and dropped once its page has
/// been appended.
pub struct DecodedImage {
    /// Intrinsic width in pixels (always > 0).
    pub width: u32,
    /// Intrinsic height in pixels (always > 0).
    pub height: u32,
    /// Format sniffed from the payload, if recognised.
    pub detected: Option<ImageFormat>,
    /// The original encoded bytes, handed on to the embedding step.
    pub payload: Arc<[u8]>,
    /// Decoded pixels, embedded by the writer unless the payload can be stored
    /// as-is.
    pub pixels: DynamicImage,
}

/// Stateless decoder; safe to use from any number of threads.
pub struct ImageDecoder;

impl ImageDecoder {
    /// Decode one item. Failures carry the item's identity at `position`
    /// (1-indexed) so callers can report which image was at fault.
    #[instrument(skip(item), fields(name = %item.name, bytes_len = item.payload.len()))]
    pub fn decode(item: &ImageItem, position: usize) -> Result<DecodedImage> {
        let fail = |reason: String| BinderyError::Decode {
            item: item.reference(position),
            reason,
        };

        let (pixels, detected) = decode_bytes(&item.payload).map_err(fail)?;
        let (width, height) = (pixels.width(), pixels.height());
        if width == 0 || height == 0 {
            return Err(fail(format!("image has no area ({width}x{height})")));
        }

        debug!(width, height, format = ?detected, "Image decoded");
        Ok(DecodedImage {
            width,
            height,
            detected,
            payload: Arc::clone(&item.payload),
            pixels,
        })
    }

    /// Read only the header of a payload and return `(width, height)`.
    ///
    /// Cheap, but does not detect truncated pixel data. Used to screen input
    /// files before a full decode.
    pub fn probe_dimensions(payload: &[u8]) -> std::result::Result<(u32, u32), String> {
        if payload.is_empty() {
            return Err("payload is empty".into());
        }
        sniff(payload)?
            .into_dimensions()
            .map_err(|err| format!("unreadable image header: {err}"))
    }
}

/// Fully decode `payload`, returning the pixels and the sniffed format.
fn decode_bytes(
    payload: &[u8],
) -> std::result::Result<(DynamicImage, Option<ImageFormat>), String> {
    if payload.is_empty() {
        return Err("payload is empty".into());
    }
    let reader = sniff(payload)?;
    let detected = reader.format();
    if detected.is_none() {
        return Err("not a recognised image format".into());
    }
    let pixels = reader
        .decode()
        .map_err(|err| format!("corrupt or truncated image: {err}"))?;
    Ok((pixels, detected))
}

fn sniff(payload: &[u8]) -> std::result::Result<ImageReader<Cursor<&[u8]>>, String> {
    ImageReader::new(Cursor::new(payload))
        .with_guessed_format()
        .map_err(|err| format!("failed to read image header: {err}"))
}
