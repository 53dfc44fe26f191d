// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Research API endpoint handler

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::request::ResearchApiRequest;
use super::response::ResearchApiResponse;
use crate::api::http_server::AppState;

/// POST /v1/research - Run the research pipeline for a query
///
/// # Request
/// - `query`: Free-text research query (required, 3-500 chars)
///
/// # Response
/// The research result fields (query, sources, summary, language,
/// timestamp, success, error) plus `researchTimeMs`, the wall-clock time
/// measured around the pipeline call.
///
/// # Errors
/// - 400 Bad Request: invalid query shape (body carries an `error` field
///   and no sources)
///
/// Pipeline-level failures (no sources, nothing retrievable) are not HTTP
/// errors: they come back as a 200 with `success: false`.
pub async fn research_handler(
    State(state): State<AppState>,
    Json(request): Json<ResearchApiRequest>,
) -> Result<Json<ResearchApiResponse>, (StatusCode, Json<serde_json::Value>)> {
    debug!("Research request: {:?}", request.query);

    if let Err(e) = request.validate() {
        warn!("Research request validation failed: {}", e);
        return Err((StatusCode::BAD_REQUEST, Json(json!({ "error": e }))));
    }

    let started = Instant::now();
    let result = state.orchestrator.research(&request.query).await;
    let research_time_ms = started.elapsed().as_millis() as u64;

    info!(
        "Research complete: {} sources for '{}' in {}ms (success: {})",
        result.sources.len(),
        request.query,
        research_time_ms,
        result.success
    );

    Ok(Json(ResearchApiResponse::from_result(
        result,
        research_time_ms,
    )))
}
