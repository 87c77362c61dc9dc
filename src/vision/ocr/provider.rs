// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR provider trait and result types

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by an OCR provider call
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to read image for submission: {0}")]
    Io(#[from] std::io::Error),

    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider reported failure: {0}")]
    Failed(String),

    #[error("provider returned an unexpected response shape: {0}")]
    MalformedResponse(String),
}

/// One recognized text line from the provider.
///
/// The handler only surfaces `text`; geometry and confidence are carried for
/// logging and future use.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrLine {
    /// Recognized text content
    pub text: String,
    /// Confidence score (0.0-1.0)
    pub confidence: f32,
    /// Quadrilateral bounding the line, clockwise from top-left
    pub region: Vec<(f32, f32)>,
}

/// An external optical-character-recognition engine.
///
/// Implementations take the path of an image on disk and return the detected
/// text lines in the provider's reading order. Implementations must be
/// `Send + Sync`; if the backing engine is not reentrant-safe they are
/// responsible for serializing calls internally.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Recognize text lines in the image at `image_path`.
    async fn recognize(&self, image_path: &Path) -> Result<Vec<OcrLine>, ProviderError>;

    /// Provider identifier for logs and health reporting
    fn name(&self) -> &'static str;
}
