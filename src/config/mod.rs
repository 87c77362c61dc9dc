// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Node configuration assembled from environment variables
//!
//! Every knob has a default so the node starts with no environment at all.
//! `dotenv` is loaded by `main` before this runs, so a `.env` file works too.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Default HTTP bind address
const DEFAULT_API_ADDR: &str = "127.0.0.1:8080";

/// Default frontend origin allowed by CORS
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Default PaddleOCR serving endpoint (hubserving ocr_system module)
const DEFAULT_OCR_ENDPOINT: &str = "http://127.0.0.1:8868/predict/ocr_system";

/// Default per-call OCR timeout in seconds
const DEFAULT_OCR_TIMEOUT_SECS: u64 = 60;

/// Configuration for the OCR provider
#[derive(Debug, Clone)]
pub struct OcrProviderConfig {
    /// PaddleOCR serving endpoint URL
    pub endpoint: String,
    /// Recognition language passed to the provider
    pub lang: String,
    /// Whether the provider should run angle classification
    pub use_angle_cls: bool,
    /// Upper bound on a single provider call
    pub timeout: Duration,
}

impl Default for OcrProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OCR_ENDPOINT.to_string(),
            lang: "ch".to_string(),
            use_angle_cls: true,
            timeout: Duration::from_secs(DEFAULT_OCR_TIMEOUT_SECS),
        }
    }
}

/// Top-level node configuration
#[derive(Debug, Clone)]
pub struct OcrNodeConfig {
    /// Address the HTTP server binds to
    pub api_addr: SocketAddr,
    /// Origin allowed by the CORS layer (credentials enabled)
    pub cors_origin: String,
    /// OCR provider settings
    pub ocr: OcrProviderConfig,
}

impl OcrNodeConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Variables: `API_ADDR`, `CORS_ORIGIN`, `OCR_ENDPOINT`, `OCR_LANG`,
    /// `OCR_USE_ANGLE_CLS`, `OCR_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let api_addr = env::var("API_ADDR")
            .unwrap_or_else(|_| DEFAULT_API_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("invalid API_ADDR")?;

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());

        let endpoint =
            env::var("OCR_ENDPOINT").unwrap_or_else(|_| DEFAULT_OCR_ENDPOINT.to_string());

        let lang = env::var("OCR_LANG").unwrap_or_else(|_| "ch".to_string());

        let use_angle_cls = env::var("OCR_USE_ANGLE_CLS")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(true);

        let timeout_secs = env::var("OCR_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_OCR_TIMEOUT_SECS);

        Ok(Self {
            api_addr,
            cors_origin,
            ocr: OcrProviderConfig {
                endpoint,
                lang,
                use_angle_cls,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

impl Default for OcrNodeConfig {
    fn default() -> Self {
        Self {
            api_addr: DEFAULT_API_ADDR.parse().expect("default addr is valid"),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            ocr: OcrProviderConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OcrNodeConfig::default();
        assert_eq!(config.api_addr.port(), 8080);
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.ocr.lang, "ch");
        assert!(config.ocr.use_angle_cls);
        assert_eq!(config.ocr.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_provider_config_default_endpoint() {
        let ocr = OcrProviderConfig::default();
        assert!(ocr.endpoint.contains("8868"));
    }
}
