// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod version;
pub mod vision;

// Re-export main types
pub use api::{start_server, AppState};
pub use config::OcrNodeConfig;
pub use vision::ocr::{OcrLine, OcrProvider, PaddleOcrProvider, ProviderError};
pub use vision::pipeline::{extract_text, ProcessError};
