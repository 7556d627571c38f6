// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembler: turn an ordered list of images into one PDF, one page
// per image, in input order. The first failing image aborts the whole job and
// nothing built so far is returned.

use bindery_core::error::{BinderyError, Result};
use bindery_core::{AssemblyConfig, EmbedFormat, ImageItem, ItemRef, PagePlacement};
use tracing::{debug, info, instrument, warn};

use crate::image::decoder::{DecodedImage, ImageDecoder};
use crate::layout::PageGeometry;
use crate::pdf::sink::PageSink;
use crate::pdf::writer::PdfWriter;

/// What ended up on one page of the output.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    pub item: ItemRef,
    /// Format negotiated from the declared MIME type. Recorded for callers;
    /// the writer embeds from the payload itself.
    pub format: EmbedFormat,
    pub placement: PagePlacement,
}

/// A finished document.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    /// The serialised PDF.
    pub bytes: Vec<u8>,
    /// One entry per page, in page order.
    pub pages: Vec<PageSummary>,
}

impl AssembledDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Builds multi-page image documents with a fixed page configuration.
///
/// Holds no per-job state, so one assembler can serve any number of
/// independent `assemble` calls, including concurrent ones.
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    config: AssemblyConfig,
    geometry: PageGeometry,
}

impl DocumentAssembler {
    /// Validate `config` up front; an unusable page/margin combination fails
    /// here with [`BinderyError::Configuration`] rather than per item.
    pub fn new(config: AssemblyConfig) -> Result<Self> {
        let (page_width, page_height) = config.page_dimensions();
        let geometry = PageGeometry::new(page_width, page_height, config.margin)?;
        Ok(Self { config, geometry })
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    fn writer(&self) -> PdfWriter {
        PdfWriter::new(
            self.geometry.page_width(),
            self.geometry.page_height(),
            self.config.title(),
        )
    }

    /// Assemble `items` into a PDF.
    #[instrument(skip_all, fields(items = items.len()))]
    pub fn assemble(&self, items: &[ImageItem]) -> Result<AssembledDocument> {
        let (bytes, pages) = self.assemble_into(items, self.writer())?;
        Ok(finished(bytes, pages))
    }

    /// Assemble `items` into an arbitrary sink, returning the serialised
    /// output and the per-page summaries.
    pub fn assemble_into<S: PageSink>(
        &self,
        items: &[ImageItem],
        sink: S,
    ) -> Result<(Vec<u8>, Vec<PageSummary>)> {
        let mut run = self.start(items.len(), sink)?;
        for (position, item) in (1..).zip(items) {
            run.push(item, position, ImageDecoder::decode(item, position))?;
        }
        Ok(run.finish())
    }

    /// Async variant of [`assemble`](Self::assemble).
    ///
    /// Each decode runs on the blocking pool and is awaited before the next
    /// item is touched, so pages keep input order. Dropping the returned
    /// future abandons the job; a decode already in flight completes in the
    /// background and its result is discarded.
    #[instrument(skip_all, fields(items = items.len()))]
    pub async fn assemble_async(&self, items: Vec<ImageItem>) -> Result<AssembledDocument> {
        let mut run = self.start(items.len(), self.writer())?;
        for (position, item) in (1..).zip(&items) {
            let decoded = decode_on_blocking_pool(item, position).await;
            run.push(item, position, decoded)?;
        }
        let (bytes, pages) = run.finish();
        Ok(finished(bytes, pages))
    }

    /// Open a run over `count` items, refusing an empty document.
    fn start<S: PageSink>(&self, count: usize, sink: S) -> Result<Run<'_, S>> {
        if count == 0 {
            warn!("Refusing to assemble an empty document");
            return Err(BinderyError::EmptyInput);
        }
        info!(
            items = count,
            paper = ?self.config.paper_size,
            orientation = ?self.config.orientation,
            margin = self.config.margin,
            "Assembling document"
        );
        Ok(Run {
            assembler: self,
            sink,
            pages: Vec::with_capacity(count),
        })
    }

    /// Lay out and embed one decoded item. Every item after the first gets a
    /// fresh page before its image is placed.
    fn place<S: PageSink>(
        &self,
        sink: &mut S,
        item: &ImageItem,
        position: usize,
        decoded: &DecodedImage,
        pages_so_far: usize,
    ) -> Result<PageSummary> {
        let placement = self
            .geometry
            .place(decoded.width as f32, decoded.height as f32);

        let format = EmbedFormat::negotiate(&item.mime_type);
        if EmbedFormat::from_mime_type(&item.mime_type).is_none() {
            debug!(
                declared = %item.mime_type,
                substituted = %format,
                "Declared type not embeddable, using default format"
            );
        }

        if pages_so_far > 0 {
            sink.begin_page();
        }
        sink.place_image(decoded, format, &placement)
            .map_err(|reason| BinderyError::Embed {
                item: item.reference(position),
                reason,
            })?;

        debug!(
            position,
            name = %item.name,
            %format,
            width = placement.width,
            height = placement.height,
            x = placement.x,
            y = placement.y,
            "Page laid out"
        );
        Ok(PageSummary {
            item: item.reference(position),
            format,
            placement,
        })
    }
}

/// One assembly in progress: the sink being filled and the pages so far.
struct Run<'a, S> {
    assembler: &'a DocumentAssembler,
    sink: S,
    pages: Vec<PageSummary>,
}

impl<S: PageSink> Run<'_, S> {
    /// Append the page for `item`, or abort with the first error, either
    /// the decode failure handed in or one raised while embedding.
    fn push(
        &mut self,
        item: &ImageItem,
        position: usize,
        decoded: Result<DecodedImage>,
    ) -> Result<()> {
        let page = decoded
            .and_then(|decoded| {
                self.assembler
                    .place(&mut self.sink, item, position, &decoded, self.pages.len())
            })
            .inspect_err(log_failure)?;
        self.pages.push(page);
        Ok(())
    }

    fn finish(self) -> (Vec<u8>, Vec<PageSummary>) {
        (self.sink.finish(), self.pages)
    }
}

async fn decode_on_blocking_pool(item: &ImageItem, position: usize) -> Result<DecodedImage> {
    let owned = item.clone();
    tokio::task::spawn_blocking(move || ImageDecoder::decode(&owned, position))
        .await
        .map_err(|join| BinderyError::Decode {
            item: item.reference(position),
            reason: format!("decode task did not complete: {join}"),
        })?
}

fn finished(bytes: Vec<u8>, pages: Vec<PageSummary>) -> AssembledDocument {
    info!(pages = pages.len(), bytes = bytes.len(), "Document assembled");
    AssembledDocument { bytes, pages }
}

fn log_failure(err: &BinderyError) {
    match err.item() {
        Some(item) => warn!(%item, error = %err, "Assembly aborted"),
        None => warn!(error = %err, "Assembly aborted"),
    }
}
