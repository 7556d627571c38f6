// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: the page sink seam, the printpdf-backed writer, and lopdf
// read-back of finished documents.

pub mod reader;
pub mod sink;
pub mod writer;

pub use reader::PdfReader;
pub use sink::PageSink;
pub use writer::PdfWriter;
