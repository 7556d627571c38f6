// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page settings: optional JSON file, then command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use bindery_core::{AssemblyConfig, Orientation, PaperSize};
use clap::ValueEnum;
use tracing::debug;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

/// Values given on the command line. `None`/`false` leaves the file value.
#[derive(Debug, Default)]
pub struct Overrides {
    pub paper: Option<PaperSize>,
    pub landscape: bool,
    pub margin: Option<f32>,
    pub title: Option<String>,
}

/// Build the assembly configuration from an optional settings file plus
/// overrides.
pub fn resolve(config_file: Option<&Path>, overrides: Overrides) -> Result<AssemblyConfig> {
    let mut config = match config_file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings file {}", path.display()))?;
            AssemblyConfig::from_json(&json)
                .with_context(|| format!("Failed to parse settings file {}", path.display()))?
        }
        None => AssemblyConfig::default(),
    };

    if let Some(paper) = overrides.paper {
        config.paper_size = paper;
    }
    if overrides.landscape {
        config.orientation = Orientation::Landscape;
    }
    if let Some(margin) = overrides.margin {
        config.margin = margin;
    }
    if overrides.title.is_some() {
        config.title = overrides.title;
    }

    debug!(?config, "Settings resolved");
    Ok(config)
}
