// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Turn image paths into `ImageItem`s, preserving argument order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bindery_core::{ImageItem, mime_type_from_extension};
use bindery_document::ImageDecoder;
use tracing::{debug, warn};

/// Declared type for files whose extension is not a known image type.
const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// Read every file in order. The declared MIME type comes from the extension
/// and the display name from the file name. Files whose header cannot be read
/// are still passed on, so the assembler reports them by position.
pub async fn load_items(paths: &[PathBuf]) -> Result<Vec<ImageItem>> {
    let mut items = Vec::with_capacity(paths.len());
    for path in paths {
        let payload = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mime_type = declared_type(path);
        match ImageDecoder::probe_dimensions(&payload) {
            Ok((width, height)) => debug!(
                path = %path.display(),
                mime_type,
                bytes = payload.len(),
                width,
                height,
                "Image read"
            ),
            Err(reason) => warn!(path = %path.display(), %reason, "File does not look like an image"),
        }
        items.push(ImageItem::new(payload, mime_type, display_name(path)));
    }
    Ok(items)
}

fn declared_type(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_type_from_extension)
        .unwrap_or(UNKNOWN_MIME_TYPE)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_type_from_extension() {
        assert_eq!(declared_type(Path::new("a/b/photo.JPG")), "image/jpeg");
        assert_eq!(declared_type(Path::new("scan.png")), "image/png");
        assert_eq!(declared_type(Path::new("notes")), UNKNOWN_MIME_TYPE);
    }

    #[tokio::test]
    async fn loads_in_argument_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let second = dir.path().join("second.png");
        let first = dir.path().join("first.jpg");
        image::RgbImage::new(4, 2).save(&second).expect("write png");
        image::RgbImage::new(2, 4).save(&first).expect("write jpeg");

        let items = load_items(&[second.clone(), first.clone()]).await.expect("loads");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "second.png");
        assert_eq!(items[0].mime_type, "image/png");
        assert_eq!(items[1].name, "first.jpg");
        assert_eq!(items[1].mime_type, "image/jpeg");
        assert_eq!(&*items[0].payload, std::fs::read(&second).expect("read back").as_slice());
    }

    #[tokio::test]
    async fn unreadable_images_are_still_loaded() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"not an image").expect("write");

        let items = load_items(&[path]).await.expect("loads");
        assert_eq!(items.len(), 1);
        assert_eq!(&*items[0].payload, b"not an image");
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let err = load_items(&[PathBuf::from("/nonexistent/missing.png")])
            .await
            .expect_err("missing file");
        assert!(format!("{err:#}").contains("missing.png"));
    }
}
