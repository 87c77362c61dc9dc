// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::{env, sync::Arc};

use anyhow::Result;
use fabstir_ocr_node::{
    api, config::OcrNodeConfig, version, vision::ocr::PaddleOcrProvider,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!("Starting {}", version::get_version_string());

    let config = OcrNodeConfig::from_env()?;
    tracing::info!(
        "OCR provider: {} (lang={}, angle_cls={}, timeout={:?})",
        config.ocr.endpoint,
        config.ocr.lang,
        config.ocr.use_angle_cls,
        config.ocr.timeout,
    );
    tracing::info!("CORS origin: {}", config.cors_origin);

    let provider = Arc::new(PaddleOcrProvider::new(config.ocr.clone())?);

    api::start_server(&config, provider).await
}
