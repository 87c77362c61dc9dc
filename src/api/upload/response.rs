// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload response types

use serde::{Deserialize, Serialize};

/// Message used when the provider detects no text in an image
pub const NO_TEXT_DETECTED: &str = "No Chinese text detected.";

/// User-facing message for any per-file failure. The underlying error
/// detail is logged server-side only.
pub const PROCESSING_ERROR: &str = "Error processing image.";

/// Per-file outcome. Serializes to `{filename, message}` on success or
/// `{filename, error}` on failure; exactly one of the two keys appears.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ResultEntry {
    Success { filename: String, message: String },
    Failure { filename: String, error: String },
}

impl ResultEntry {
    /// Build a success entry from the combined OCR text, substituting the
    /// no-text message when the provider returned no lines.
    pub fn success(filename: String, text: String) -> Self {
        let message = if text.is_empty() {
            NO_TEXT_DETECTED.to_string()
        } else {
            text
        };
        Self::Success { filename, message }
    }

    /// Build a failure entry with the generic user-facing message.
    pub fn failure(filename: String) -> Self {
        Self::Failure {
            filename,
            error: PROCESSING_ERROR.to_string(),
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            Self::Success { filename, .. } | Self::Failure { filename, .. } => filename,
        }
    }
}

/// Full response batch: one entry per uploaded file, input order preserved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadResponse {
    pub results: Vec<ResultEntry>,
}
