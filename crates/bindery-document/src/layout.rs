// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout: fit an image inside the margin-reduced page, preserving its
// aspect ratio, and centre it. Pure geometry; no pixel operations.

use bindery_core::PagePlacement;
use bindery_core::config::validate_page;
use bindery_core::error::{BinderyError, Result};

/// A validated page size and margin, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    page_width: f32,
    page_height: f32,
    margin: f32,
}

impl PageGeometry {
    /// Validate the page and margin once; every later [`place`](Self::place)
    /// call is infallible.
    pub fn new(page_width: f32, page_height: f32, margin: f32) -> Result<Self> {
        validate_page(page_width, page_height, margin)?;
        Ok(Self {
            page_width,
            page_height,
            margin,
        })
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Width left between the left and right margins.
    pub fn available_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Height left between the top and bottom margins.
    pub fn available_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    /// Largest centred rectangle with the image's aspect ratio that fits the
    /// available area.
    ///
    /// Width is tried first and only corrected when the height overflows, so
    /// a square image in a square area fills exactly the available width.
    pub fn place(&self, intrinsic_width: f32, intrinsic_height: f32) -> PagePlacement {
        let available_width = self.available_width();
        let available_height = self.available_height();
        let aspect = intrinsic_width / intrinsic_height;

        let mut width = available_width;
        let mut height = width / aspect;
        if height > available_height {
            height = available_height;
            width = height * aspect;
        }

        PagePlacement {
            width,
            height,
            x: self.margin + (available_width - width) / 2.0,
            y: self.margin + (available_height - height) / 2.0,
        }
    }
}

/// Plan a single placement from raw numbers.
///
/// Fails with [`BinderyError::Configuration`] when any input is not a
/// positive finite number or the margin leaves no room on the page.
pub fn plan(
    intrinsic_width: f32,
    intrinsic_height: f32,
    page_width: f32,
    page_height: f32,
    margin: f32,
) -> Result<PagePlacement> {
    for (label, value) in [
        ("intrinsic width", intrinsic_width),
        ("intrinsic height", intrinsic_height),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(BinderyError::Configuration(format!(
                "{label} must be a positive finite number, got {value}"
            )));
        }
    }
    Ok(PageGeometry::new(page_width, page_height, margin)?.place(intrinsic_width, intrinsic_height))
}
