// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the research API endpoint
//!
//! Handlers are invoked directly; discovery is stubbed and content comes
//! from a pre-seeded cache, so nothing touches the network.

use async_trait::async_trait;
use axum::extract::{Json, State};
use std::sync::Arc;
use std::time::Duration;

use fabstir_research_node::api::http_server::AppState;
use fabstir_research_node::api::research::{research_handler, ResearchApiRequest};
use fabstir_research_node::content::{ContentConfig, ContentFetcher, PageCache, RequestRateLimiter};
use fabstir_research_node::research::ResearchOrchestrator;
use fabstir_research_node::search::{SearchError, SearchProvider, SearchResult, SearchService};

struct StubProvider {
    urls: Vec<&'static str>,
}

#[async_trait]
impl SearchProvider for StubProvider {
    async fn search(
        &self,
        _query: &str,
        _num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self
            .urls
            .iter()
            .map(|url| SearchResult {
                url: url.to_string(),
                title: None,
                snippet: None,
                source: "stub".to_string(),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "stub"
    }

    fn is_available(&self) -> bool {
        true
    }
}

fn app_state(urls: Vec<&'static str>, cache_dir: &std::path::Path) -> (AppState, Arc<PageCache>) {
    let cache = Arc::new(PageCache::new(cache_dir, Duration::from_secs(3600)).unwrap());
    let limiter = Arc::new(RequestRateLimiter::new(Duration::ZERO));
    let config = ContentConfig {
        cache_dir: cache_dir.to_string_lossy().into_owned(),
        min_request_interval_secs: 0,
        max_retries: 1,
        request_timeout_secs: 1,
        ..ContentConfig::default()
    };
    let fetcher = ContentFetcher::new(&config, cache.clone(), limiter);
    let service = SearchService::with_providers(vec![Box::new(StubProvider { urls })], 5);
    let orchestrator = ResearchOrchestrator::new(service, fetcher, 5, config.max_text_length);

    (
        AppState {
            orchestrator: Arc::new(orchestrator),
        },
        cache,
    )
}

#[tokio::test]
async fn test_invalid_request_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let (state, _cache) = app_state(vec![], dir.path());

    let response = research_handler(
        State(state),
        Json(ResearchApiRequest {
            query: "  ".to_string(),
        }),
    )
    .await;

    let (status, body) = response.err().expect("empty query must be rejected");
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    // Error body carries an error field and no sources.
    assert!(body.0.get("error").is_some());
    assert!(body.0.get("sources").is_none());
}

#[tokio::test]
async fn test_successful_request_reports_research_time() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://example.invalid/cats";
    let (state, cache) = app_state(vec![url], dir.path());
    cache.put(
        &PageCache::key(url),
        "<html><body><article><p>Cats sleep for most of the day and wake mainly at dusk. \
         They hunt small prey with patience and precision. \
         A contented cat purrs while resting near its favorite person.</p></article></body></html>",
    );

    let response = research_handler(
        State(state),
        Json(ResearchApiRequest {
            query: "cat behavior".to_string(),
        }),
    )
    .await;

    let body = response.ok().expect("valid query must succeed").0;
    assert!(body.success);
    assert_eq!(body.sources.len(), 1);
    assert!(!body.summary.is_empty());

    // The execution-time measurement wraps the pipeline call; serialization
    // must expose it in camelCase.
    let json = serde_json::to_value(&body).unwrap();
    assert!(json.get("researchTimeMs").is_some());
}

#[tokio::test]
async fn test_pipeline_failure_is_not_an_http_error() {
    let dir = tempfile::tempdir().unwrap();
    let (state, _cache) = app_state(vec![], dir.path());

    let response = research_handler(
        State(state),
        Json(ResearchApiRequest {
            query: "nothing will be found".to_string(),
        }),
    )
    .await;

    let body = response.ok().expect("pipeline failures map to 200").0;
    assert!(!body.success);
    assert!(body.sources.is_empty());
    assert!(body.error.is_some());
}
