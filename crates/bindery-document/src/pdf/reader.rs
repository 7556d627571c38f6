// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: read an assembled document back with `lopdf` to check its
// page count and page sizes.

use bindery_core::error::{BinderyError, Result};
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, instrument};

/// Read-only view over a finished PDF.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            BinderyError::Inspect(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");
        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// `(width, height)` of every page in points, in page order, taken from
    /// each page's `/MediaBox`.
    pub fn page_sizes(&self) -> Result<Vec<(f32, f32)>> {
        self.document
            .get_pages()
            .into_iter()
            .map(|(number, page_id)| {
                self.media_box(page_id).map_err(|reason| {
                    BinderyError::Inspect(format!("page {number}: {reason}"))
                })
            })
            .collect()
    }

    fn media_box(&self, page_id: ObjectId) -> std::result::Result<(f32, f32), String> {
        let page = self
            .document
            .get_dictionary(page_id)
            .map_err(|err| format!("page object unreadable: {err}"))?;
        let media_box = page
            .get(b"MediaBox")
            .and_then(Object::as_array)
            .map_err(|err| format!("missing /MediaBox: {err}"))?;
        let coords = media_box
            .iter()
            .map(Object::as_float)
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|err| format!("non-numeric /MediaBox: {err}"))?;
        match coords.as_slice() {
            [x0, y0, x1, y1] => Ok((x1 - x0, y1 - y0)),
            _ => Err(format!("/MediaBox has {} entries", coords.len())),
        }
    }
}

/// Count the pages of an in-memory PDF.
pub fn page_count(bytes: &[u8]) -> Result<usize> {
    Ok(PdfReader::from_bytes(bytes)?.page_count())
}

/// Page sizes of an in-memory PDF, in points.
pub fn page_sizes(bytes: &[u8]) -> Result<Vec<(f32, f32)>> {
    PdfReader::from_bytes(bytes)?.page_sizes()
}
