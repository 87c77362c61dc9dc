// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing for uploaded images
//!
//! This module provides:
//! - Upload decoding with magic-byte format detection
//! - Legibility preprocessing (upscale + contrast stretch)
//! - The per-file OCR pipeline and the external provider seam

pub mod image_utils;
pub mod ocr;
pub mod pipeline;
pub mod preprocess;

pub use image_utils::{decode_upload, sniff_format, ImageError, ImageInfo};
pub use pipeline::{extract_text, ProcessError};
pub use preprocess::{preprocess, CONTRAST_FACTOR, SCALE_FACTOR};
