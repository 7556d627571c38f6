// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Bindery image-to-PDF assembly.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an image item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One source image to be placed on one output page.
///
/// The payload is shared and immutable once created, so cloning an item (for
/// example to hand it to a blocking decode task) never copies image bytes.
#[derive(Debug, Clone)]
pub struct ImageItem {
    pub id: ItemId,
    /// Encoded image bytes exactly as supplied by the caller.
    pub payload: Arc<[u8]>,
    /// Declared MIME type (e.g. `image/png`). Advisory only.
    pub mime_type: String,
    /// Display name, used in error messages.
    pub name: String,
}

impl ImageItem {
    /// Create an item with a freshly generated id.
    pub fn new(
        payload: impl Into<Arc<[u8]>>,
        mime_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::with_id(ItemId::new(), payload, mime_type, name)
    }

    /// Create an item with a caller-supplied id.
    pub fn with_id(
        id: ItemId,
        payload: impl Into<Arc<[u8]>>,
        mime_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            payload: payload.into(),
            mime_type: mime_type.into(),
            name: name.into(),
        }
    }

    /// Identity of this item at the given 1-indexed position in a batch.
    pub fn reference(&self, position: usize) -> ItemRef {
        ItemRef {
            id: self.id,
            name: self.name.clone(),
            position,
        }
    }
}

/// Identity of an item within one assembly call, carried by errors and page
/// summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: ItemId,
    pub name: String,
    /// 1-indexed position in the input sequence.
    pub position: usize,
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item {} ({:?}, id {})", self.position, self.name, self.id)
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
    /// Arbitrary page size given directly in points.
    Custom { width_pt: f32, height_pt: f32 },
}

/// Points per millimetre (72 / 25.4).
const PT_PER_MM: f32 = 72.0 / 25.4;

impl PaperSize {
    /// Dimensions in millimetres (width, height), for the named presets.
    pub fn dimensions_mm(&self) -> Option<(f32, f32)> {
        match self {
            Self::A4 => Some((210.0, 297.0)),
            Self::A3 => Some((297.0, 420.0)),
            Self::A5 => Some((148.0, 210.0)),
            Self::Letter => Some((215.9, 279.4)),
            Self::Legal => Some((215.9, 355.6)),
            Self::Tabloid => Some((279.4, 431.8)),
            Self::Custom { .. } => None,
        }
    }

    /// Portrait dimensions in points (width, height).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        if let Self::Custom {
            width_pt,
            height_pt,
        } = self
        {
            return (*width_pt, *height_pt);
        }
        let (w_mm, h_mm) = self.dimensions_mm().unwrap_or_default();
        (w_mm * PT_PER_MM, h_mm * PT_PER_MM)
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Portrait,
    /// Width and height of the paper size are swapped.
    Landscape,
}

impl Orientation {
    /// Apply this orientation to portrait `(width, height)` dimensions.
    pub fn apply(&self, (width, height): (f32, f32)) -> (f32, f32) {
        match self {
            Self::Portrait => (width, height),
            Self::Landscape => (height, width),
        }
    }
}

/// Raster encodings the PDF builder accepts for image content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmbedFormat {
    Jpeg,
    Png,
    Webp,
}

impl EmbedFormat {
    /// Substituted when the declared type names a format outside the allow-list.
    pub const DEFAULT: Self = Self::Jpeg;

    /// Every format that can be embedded natively.
    pub const ALL: [Self; 3] = [Self::Jpeg, Self::Png, Self::Webp];

    /// Upper-case identifier (`JPEG`, `PNG`, `WEBP`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Webp => "WEBP",
        }
    }

    /// Candidate format from a declared MIME type: the subtype after `/`,
    /// upper-cased, looked up in the allow-list. Parameters (`; q=...`) are
    /// ignored.
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        let (_, subtype) = mime_type.split_once('/')?;
        let subtype = subtype.split(';').next().unwrap_or_default().trim();
        let candidate = subtype.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == candidate)
    }

    /// Format to embed with: the candidate when allowed, otherwise
    /// [`EmbedFormat::DEFAULT`]. Never fails.
    pub fn negotiate(mime_type: &str) -> Self {
        Self::from_mime_type(mime_type).unwrap_or(Self::DEFAULT)
    }
}

impl std::fmt::Display for EmbedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rectangle an image occupies on its page, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PagePlacement {
    pub width: f32,
    pub height: f32,
    /// Offset from the left page edge.
    pub x: f32,
    /// Offset from the bottom page edge.
    pub y: f32,
}

/// Infer an image MIME type from a file extension.
pub fn mime_type_from_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" | "jpe" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}
