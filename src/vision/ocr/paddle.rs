// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PaddleOCR serving client
//!
//! Talks to a PaddleOCR hubserving sidecar (`ocr_system` module) over HTTP.
//! The sidecar holds the detection, classification and recognition models;
//! this client submits one base64-encoded image per call and maps the line
//! results back into [`OcrLine`]s.

use std::path::Path;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use super::provider::{OcrLine, OcrProvider, ProviderError};
use crate::config::OcrProviderConfig;

/// Status code the serving endpoint returns on success
const SERVING_STATUS_OK: &str = "000";

/// OCR provider backed by a PaddleOCR serving endpoint.
///
/// Thread safety: the type is `Send + Sync`, but the sidecar pipeline is not
/// assumed reentrant-safe, so all calls are serialized through an internal
/// async mutex. Callers may share one instance across requests freely.
pub struct PaddleOcrProvider {
    client: reqwest::Client,
    config: OcrProviderConfig,
    call_lock: Mutex<()>,
}

#[derive(Serialize)]
struct ServingRequest<'a> {
    images: Vec<String>,
    lang: &'a str,
    use_angle_cls: bool,
}

#[derive(Debug, Deserialize)]
struct ServingLine {
    text: String,
    #[serde(default)]
    confidence: f32,
    #[serde(default)]
    text_region: Vec<[f32; 2]>,
}

#[derive(Debug, Deserialize)]
struct ServingResponse {
    status: String,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    results: Vec<Vec<ServingLine>>,
}

impl PaddleOcrProvider {
    /// Create a provider for the configured serving endpoint.
    pub fn new(config: OcrProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            call_lock: Mutex::new(()),
        })
    }

    /// Map a serving response to text lines.
    ///
    /// One image is submitted per call, so exactly one entry is expected in
    /// `results`. An image with no detected text still yields an entry (an
    /// empty line list); a missing entry means the provider misbehaved.
    fn lines_from_response(response: ServingResponse) -> Result<Vec<OcrLine>, ProviderError> {
        if response.status != SERVING_STATUS_OK {
            return Err(ProviderError::Failed(format!(
                "status {}: {}",
                response.status, response.msg
            )));
        }

        let lines = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| {
                ProviderError::MalformedResponse("results array is empty".to_string())
            })?;

        Ok(lines
            .into_iter()
            .map(|line| OcrLine {
                text: line.text,
                confidence: line.confidence,
                region: line.text_region.iter().map(|p| (p[0], p[1])).collect(),
            })
            .collect())
    }
}

#[async_trait]
impl OcrProvider for PaddleOcrProvider {
    async fn recognize(&self, image_path: &Path) -> Result<Vec<OcrLine>, ProviderError> {
        // Sidecar is treated as non-reentrant; hold the lock across the call
        let _guard = self.call_lock.lock().await;

        let bytes = tokio::fs::read(image_path).await?;
        debug!(
            "Submitting {} bytes to OCR provider at {}",
            bytes.len(),
            self.config.endpoint
        );

        let request = ServingRequest {
            images: vec![STANDARD.encode(&bytes)],
            lang: &self.config.lang,
            use_angle_cls: self.config.use_angle_cls,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ServingResponse = response.json().await?;
        Self::lines_from_response(body)
    }

    fn name(&self) -> &'static str {
        "paddleocr"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_from_json(json: &str) -> ServingResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_lines_from_successful_response() {
        let response = response_from_json(
            r#"{
                "status": "000",
                "msg": "",
                "results": [[
                    {"text": "你好", "confidence": 0.98,
                     "text_region": [[10.0, 5.0], [50.0, 5.0], [50.0, 20.0], [10.0, 20.0]]},
                    {"text": "世界", "confidence": 0.95, "text_region": []}
                ]]
            }"#,
        );

        let lines = PaddleOcrProvider::lines_from_response(response).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "你好");
        assert_eq!(lines[0].region[0], (10.0, 5.0));
        assert_eq!(lines[1].text, "世界");
    }

    #[test]
    fn test_lines_from_empty_line_set() {
        // No text detected: one entry, zero lines
        let response = response_from_json(r#"{"status": "000", "results": [[]]}"#);
        let lines = PaddleOcrProvider::lines_from_response(response).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_failed_status_is_provider_error() {
        let response =
            response_from_json(r#"{"status": "101", "msg": "module crashed", "results": []}"#);
        let err = PaddleOcrProvider::lines_from_response(response).unwrap_err();
        assert!(matches!(err, ProviderError::Failed(_)));
        assert!(err.to_string().contains("module crashed"));
    }

    #[test]
    fn test_missing_results_entry_is_malformed() {
        // Success status but no per-image entry at all
        let response = response_from_json(r#"{"status": "000", "results": []}"#);
        let err = PaddleOcrProvider::lines_from_response(response).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn test_provider_name() {
        let provider = PaddleOcrProvider::new(OcrProviderConfig::default()).unwrap();
        assert_eq!(provider.name(), "paddleocr");
    }
}
