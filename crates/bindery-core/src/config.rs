// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Assembly configuration.

use serde::{Deserialize, Serialize};

use crate::error::{BinderyError, Result};
use crate::types::{Orientation, PaperSize};

/// Title used when none is configured.
pub const DEFAULT_TITLE: &str = "Bindery Document";

/// Page settings for one assembly job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Paper size preset (default A4).
    pub paper_size: PaperSize,
    /// Uniform inset from every page edge, in points (default 40).
    pub margin: f32,
    /// Page orientation (default portrait).
    pub orientation: Orientation,
    /// Title written to the PDF metadata.
    pub title: Option<String>,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            margin: 40.0,
            orientation: Orientation::Portrait,
            title: None,
        }
    }
}

impl AssemblyConfig {
    /// Parse a (possibly partial) JSON configuration. Missing fields keep
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Page width and height in points after applying the orientation.
    pub fn page_dimensions(&self) -> (f32, f32) {
        self.orientation.apply(self.paper_size.dimensions_pt())
    }

    /// Document title, falling back to [`DEFAULT_TITLE`].
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Check that the page and margin leave a non-empty content area.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.page_dimensions();
        validate_page(width, height, self.margin)
    }
}

/// Validate a page size / margin combination.
pub fn validate_page(width: f32, height: f32, margin: f32) -> Result<()> {
    for (label, value) in [("page width", width), ("page height", height), ("margin", margin)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(BinderyError::Configuration(format!(
                "{label} must be a positive finite number, got {value}"
            )));
        }
    }
    if margin * 2.0 >= width || margin * 2.0 >= height {
        return Err(BinderyError::Configuration(format!(
            "margin {margin} leaves no room on a {width}x{height} page"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_a4_portrait_with_40pt_margin() {
        let config = AssemblyConfig::default();
        assert_eq!(config.paper_size, PaperSize::A4);
        assert_eq!(config.margin, 40.0);
        assert_eq!(config.orientation, Orientation::Portrait);
        assert_eq!(config.title(), DEFAULT_TITLE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AssemblyConfig::from_json(r#"{ "margin": 12.5, "orientation": "Landscape" }"#)
            .expect("valid config");
        assert_eq!(config.margin, 12.5);
        assert_eq!(config.paper_size, PaperSize::A4);
        let (w, h) = config.page_dimensions();
        assert!(w > h);
    }

    #[test]
    fn custom_size_from_json() {
        let config = AssemblyConfig::from_json(
            r#"{ "paper_size": { "Custom": { "width_pt": 600.0, "height_pt": 800.0 } } }"#,
        )
        .expect("valid config");
        assert_eq!(config.page_dimensions(), (600.0, 800.0));
    }

    #[test]
    fn oversized_margin_is_rejected() {
        let config = AssemblyConfig {
            paper_size: PaperSize::Custom {
                width_pt: 100.0,
                height_pt: 400.0,
            },
            margin: 50.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BinderyError::Configuration(_))));
    }

    #[test]
    fn non_positive_values_are_rejected() {
        assert!(validate_page(600.0, 800.0, 0.0).is_err());
        assert!(validate_page(-1.0, 800.0, 10.0).is_err());
        assert!(validate_page(f32::NAN, 800.0, 10.0).is_err());
        assert!(validate_page(600.0, f32::INFINITY, 10.0).is_err());
        assert!(validate_page(600.0, 800.0, 40.0).is_ok());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(
            AssemblyConfig::from_json("{ margin: }"),
            Err(BinderyError::Serialization(_))
        ));
    }
}
