// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server exposing the research pipeline

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

use crate::research::ResearchOrchestrator;
use crate::version;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ResearchOrchestrator>,
}

/// Start the API server on the given port
pub async fn start_server(
    orchestrator: Arc<ResearchOrchestrator>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState { orchestrator };

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router (separated for tests)
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Research endpoint
        .route("/v1/research", post(super::research::research_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    axum::response::Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "version": version::VERSION_NUMBER,
    }))
}
