// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{DefaultBodyLimit, State},
    http::HeaderValue,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use super::upload::upload_handler;
use crate::config::OcrNodeConfig;
use crate::version;
use crate::vision::ocr::OcrProvider;

/// Request body cap; comfortably above the per-image limit so multi-file
/// batches fit
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Shared server state. The OCR provider is constructed once in `main` and
/// injected here, never held as ambient global state.
#[derive(Clone)]
pub struct AppState {
    pub ocr_provider: Arc<dyn OcrProvider>,
}

/// Build the application router.
///
/// CORS permits exactly one configured origin, with credentials. Credentialed
/// CORS forbids wildcard methods/headers, so both are mirrored from the
/// request instead.
pub fn build_router(state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .context("invalid CORS origin")?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Ok(Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Batch OCR endpoint
        .route("/upload", post(upload_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

pub async fn start_server(config: &OcrNodeConfig, provider: Arc<dyn OcrProvider>) -> Result<()> {
    let state = AppState {
        ocr_provider: provider,
    };
    let app = build_router(state, &config.cors_origin)?;

    let listener = tokio::net::TcpListener::bind(config.api_addr).await?;
    tracing::info!("API server listening on {}", config.api_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::response::Json(json!({
        "status": "ok",
        "provider": state.ocr_provider.name(),
        "version": version::get_version_info(),
    }))
}
