// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! External OCR provider integration
//!
//! Components:
//! - `provider` - Provider trait and result types
//! - `paddle` - PaddleOCR serving client (HTTP sidecar)

pub mod paddle;
pub mod provider;

pub use paddle::PaddleOcrProvider;
pub use provider::{OcrLine, OcrProvider, ProviderError};
