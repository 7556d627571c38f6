// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bindery.

use thiserror::Error;

use crate::types::ItemRef;

/// Top-level error type for all Bindery operations.
#[derive(Debug, Error)]
pub enum BinderyError {
    // -- Assembly errors --
    #[error("no images to assemble")]
    EmptyInput,

    #[error("could not decode {item}: {reason}")]
    Decode { item: ItemRef, reason: String },

    #[error("could not embed {item} into the document: {reason}")]
    Embed { item: ItemRef, reason: String },

    #[error("invalid page configuration: {0}")]
    Configuration(String),

    // -- Reading back a produced document --
    #[error("PDF inspection failed: {0}")]
    Inspect(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BinderyError {
    /// The item that caused this error, for per-item failures.
    pub fn item(&self) -> Option<&ItemRef> {
        match self {
            Self::Decode { item, .. } | Self::Embed { item, .. } => Some(item),
            _ => None,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BinderyError>;
