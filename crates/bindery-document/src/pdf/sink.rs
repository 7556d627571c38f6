// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page sink: the single mutable accumulator a document is built into.

use bindery_core::{EmbedFormat, PagePlacement};

use crate::image::decoder::DecodedImage;

/// Receives pages in order and produces the finished document.
///
/// A freshly constructed sink already holds one empty page; callers append a
/// page with [`begin_page`](Self::begin_page) before placing every image after
/// the first. Implementations are not synchronised: one assembly owns a sink.
pub trait PageSink {
    /// Append a new, empty page and make it current.
    fn begin_page(&mut self);

    /// Embed `image` on the current page at `placement`, using `format` as the
    /// encoding hint. The error string explains why the data was rejected.
    fn place_image(
        &mut self,
        image: &DecodedImage,
        format: EmbedFormat,
        placement: &PagePlacement,
    ) -> Result<(), String>;

    /// Pages that currently exist, including the implicit first page.
    fn page_count(&self) -> usize;

    /// Serialise the whole document.
    fn finish(self) -> Vec<u8>;
}
