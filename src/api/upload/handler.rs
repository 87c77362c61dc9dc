// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload endpoint handler

use axum::extract::State;
use axum::Json;
use axum_extra::extract::Multipart;
use tracing::{error, info};

use super::response::{ResultEntry, UploadResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::extract_text;

/// Multipart field name carrying the image files
const FILES_FIELD: &str = "files";

/// Fallback when a part arrives without a filename
const UNNAMED_FILE: &str = "unnamed";

/// POST /upload - Extract text from a batch of uploaded images
///
/// Accepts repeated multipart `files` fields, each an image blob. Files are
/// processed strictly in order; every file yields exactly one entry in the
/// response, `{filename, message}` on success or `{filename, error}` on
/// failure. A failing file never aborts the batch, so a well-formed request
/// always gets 200 with a full results array.
///
/// # Errors
/// - 400 Bad Request: the multipart stream itself is malformed
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut results = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("malformed multipart stream: {}", e)))?
    {
        // The contract binds only the `files` field; anything else is skipped
        if field.name() != Some(FILES_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .unwrap_or(UNNAMED_FILE)
            .to_string();

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Error reading upload {}: {}", filename, e);
                results.push(ResultEntry::failure(filename));
                continue;
            }
        };

        match extract_text(&bytes, state.ocr_provider.as_ref()).await {
            Ok(text) => {
                info!("Detected text from OCR for {}: {}", filename, text);
                results.push(ResultEntry::success(filename, text));
            }
            Err(e) => {
                error!("Error processing image {}: {}", filename, e);
                results.push(ResultEntry::failure(filename));
            }
        }
    }

    Ok(Json(UploadResponse { results }))
}
