// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload endpoint: batch image OCR over multipart form data

pub mod handler;
pub mod response;

pub use handler::upload_handler;
pub use response::{ResultEntry, UploadResponse, NO_TEXT_DETECTED, PROCESSING_ERROR};
