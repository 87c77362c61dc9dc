// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-file OCR pipeline
//!
//! decode -> preprocess -> temp-store -> provider -> joined text. Each stage
//! failure maps to one tagged variant; the handler collapses all of them to
//! a generic user-facing message and keeps the detail in logs.

use std::io::{self, Cursor};

use image::ImageFormat;
use thiserror::Error;
use tracing::debug;

use super::image_utils::{decode_upload, ImageError};
use super::ocr::{OcrProvider, ProviderError};
use super::preprocess::preprocess;

/// Per-file processing error
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("decode failed: {0}")]
    Decode(#[from] ImageError),

    #[error("temp file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("OCR provider failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Run one uploaded image through the full pipeline and return the combined
/// text of all recognized lines, joined with single spaces in provider order.
///
/// An empty string means the provider detected no text. The preprocessed
/// image is handed to the provider through a uniquely named temp file that
/// is removed when this function returns, on every path.
pub async fn extract_text(
    bytes: &[u8],
    provider: &dyn OcrProvider,
) -> Result<String, ProcessError> {
    let (image, info) = decode_upload(bytes)?;
    debug!(
        "Decoded upload: {}x{} {:?}, {} bytes",
        info.width, info.height, info.format, info.size_bytes
    );

    let processed = preprocess(&image);

    // PNG-encode in memory first; encoding an in-memory RGB buffer only
    // fails on write, so the failure class is I/O.
    let mut encoded = Vec::new();
    processed
        .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
        .map_err(io::Error::other)?;

    // Unique name per call; the handle owns deletion on drop
    let temp_image = tempfile::Builder::new()
        .prefix("ocr-upload-")
        .suffix(".png")
        .tempfile()?;
    tokio::fs::write(temp_image.path(), &encoded).await?;

    let lines = provider.recognize(temp_image.path()).await?;

    Ok(lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::ocr::provider::MockOcrProvider;
    use crate::vision::ocr::OcrLine;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    fn line(text: &str) -> OcrLine {
        OcrLine {
            text: text.to_string(),
            confidence: 0.9,
            region: vec![],
        }
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([255, 0, 0]));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[tokio::test]
    async fn test_extract_text_joins_lines_with_spaces() {
        let mut provider = MockOcrProvider::new();
        provider
            .expect_recognize()
            .returning(|_| Ok(vec![line("你好"), line("世界")]));

        let text = extract_text(&png_bytes(), &provider).await.unwrap();
        assert_eq!(text, "你好 世界");
    }

    #[tokio::test]
    async fn test_extract_text_empty_line_set_yields_empty_string() {
        let mut provider = MockOcrProvider::new();
        provider.expect_recognize().returning(|_| Ok(vec![]));

        let text = extract_text(&png_bytes(), &provider).await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_extract_text_rejects_corrupt_bytes_before_provider() {
        // No expectation set: a provider call would panic the mock
        let provider = MockOcrProvider::new();

        let result = extract_text(b"notanimage", &provider).await;
        assert!(matches!(result, Err(ProcessError::Decode(_))));
    }

    #[tokio::test]
    async fn test_temp_file_exists_during_call_and_is_removed_after() {
        let seen: Arc<Mutex<Option<PathBuf>>> = Arc::new(Mutex::new(None));
        let seen_in_mock = Arc::clone(&seen);

        let mut provider = MockOcrProvider::new();
        provider.expect_recognize().returning(move |path| {
            assert!(path.exists(), "temp image must exist during the call");
            *seen_in_mock.lock().unwrap() = Some(path.to_path_buf());
            Ok(vec![line("ok")])
        });

        extract_text(&png_bytes(), &provider).await.unwrap();

        let path = seen.lock().unwrap().take().expect("provider was called");
        assert!(!path.exists(), "temp image must be removed after the call");
    }

    #[tokio::test]
    async fn test_temp_file_removed_on_provider_failure() {
        let seen: Arc<Mutex<Option<PathBuf>>> = Arc::new(Mutex::new(None));
        let seen_in_mock = Arc::clone(&seen);

        let mut provider = MockOcrProvider::new();
        provider.expect_recognize().returning(move |path| {
            *seen_in_mock.lock().unwrap() = Some(path.to_path_buf());
            Err(ProviderError::Failed("engine down".to_string()))
        });

        let result = extract_text(&png_bytes(), &provider).await;
        assert!(matches!(result, Err(ProcessError::Provider(_))));

        let path = seen.lock().unwrap().take().expect("provider was called");
        assert!(!path.exists(), "temp image must be removed on the error path");
    }

    #[tokio::test]
    async fn test_temp_names_are_unique_across_calls() {
        let seen: Arc<Mutex<Vec<PathBuf>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_in_mock = Arc::clone(&seen);

        let mut provider = MockOcrProvider::new();
        provider.expect_recognize().returning(move |path| {
            seen_in_mock.lock().unwrap().push(path.to_path_buf());
            Ok(vec![])
        });

        let bytes = png_bytes();
        extract_text(&bytes, &provider).await.unwrap();
        extract_text(&bytes, &provider).await.unwrap();

        let paths = seen.lock().unwrap();
        assert_eq!(paths.len(), 2);
        assert_ne!(paths[0], paths[1]);
    }
}
