// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end tests for the research pipeline
//!
//! Discovery is stubbed with a static provider; content comes from a
//! pre-seeded page cache, so no test touches the network.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use fabstir_research_node::content::{ContentConfig, ContentFetcher, PageCache, RequestRateLimiter};
use fabstir_research_node::research::ResearchOrchestrator;
use fabstir_research_node::search::{SearchError, SearchProvider, SearchResult, SearchService};

const ARTICLE_SENTENCES: &str = "Cats sleep for most of the day and wake mainly at dusk. \
They hunt small prey with patience and precision. \
A contented cat purrs while resting near its favorite person.";

struct StubProvider {
    results: Vec<SearchResult>,
}

impl StubProvider {
    fn hit(url: &str) -> SearchResult {
        SearchResult {
            url: url.to_string(),
            title: Some("Stub result".to_string()),
            snippet: None,
            source: "stub".to_string(),
        }
    }
}

#[async_trait]
impl SearchProvider for StubProvider {
    async fn search(
        &self,
        _query: &str,
        _num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self.results.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }

    fn is_available(&self) -> bool {
        true
    }
}

fn pipeline_with(
    results: Vec<SearchResult>,
    cache_dir: &Path,
) -> (ResearchOrchestrator, Arc<PageCache>) {
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
    let service = SearchService::with_providers(vec![Box::new(StubProvider { results })], 5);

    (
        ResearchOrchestrator::new(service, fetcher, 5, config.max_text_length),
        cache,
    )
}

fn seed_article(cache: &PageCache, url: &str, body_sentences: &str) {
    let html = format!(
        "<html><body><article><p>{}</p></article></body></html>",
        body_sentences
    );
    cache.put(&PageCache::key(url), &html);
}

#[tokio::test]
async fn test_single_source_query_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://example.invalid/cats";
    let (orchestrator, cache) = pipeline_with(vec![StubProvider::hit(url)], dir.path());
    seed_article(&cache, url, ARTICLE_SENTENCES);

    let result = orchestrator.research("cat").await;

    assert!(result.success, "error: {:?}", result.error);
    assert!(result.error.is_none());
    assert_eq!(result.sources.len(), 1);
    assert_eq!(result.sources[0].url, url);
    // Three sentences are under the limit, so the summary is the sentences
    // joined, unmodified.
    assert_eq!(result.sources[0].summary, ARTICLE_SENTENCES);
    assert_eq!(result.summary, ARTICLE_SENTENCES);
}

#[tokio::test]
async fn test_no_search_results_is_a_structured_failure() {
    let dir = tempfile::tempdir().unwrap();
    let (orchestrator, _cache) = pipeline_with(vec![], dir.path());

    let result = orchestrator.research("anything at all").await;

    assert!(!result.success);
    assert!(result.sources.is_empty());
    assert!(result
        .error
        .as_deref()
        .unwrap()
        .contains("no sources found"));
}

#[tokio::test]
async fn test_all_fetches_failing_is_a_structured_failure() {
    let dir = tempfile::tempdir().unwrap();
    // Nothing listens on port 9 and nothing is cached: every fetch fails
    // after its retry budget.
    let (orchestrator, _cache) = pipeline_with(
        vec![
            StubProvider::hit("http://127.0.0.1:9/one"),
            StubProvider::hit("http://127.0.0.1:9/two"),
        ],
        dir.path(),
    );

    let result = orchestrator.research("unreachable topic").await;

    assert!(!result.success);
    assert!(result.sources.is_empty());
    assert!(result.error.as_deref().unwrap().contains("no content"));
}

#[tokio::test]
async fn test_duplicate_urls_collapse_to_one_source() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://example.invalid/cats";
    let (orchestrator, cache) = pipeline_with(
        vec![StubProvider::hit(url), StubProvider::hit(url)],
        dir.path(),
    );
    seed_article(&cache, url, ARTICLE_SENTENCES);

    let result = orchestrator.research("cat").await;

    assert!(result.success);
    assert_eq!(result.sources.len(), 1);
}

#[tokio::test]
async fn test_failed_candidate_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let good = "https://example.invalid/good";
    let bad = "http://127.0.0.1:9/bad";
    let (orchestrator, cache) = pipeline_with(
        vec![StubProvider::hit(bad), StubProvider::hit(good)],
        dir.path(),
    );
    seed_article(&cache, good, ARTICLE_SENTENCES);

    let result = orchestrator.research("cat").await;

    assert!(result.success);
    assert_eq!(result.sources.len(), 1);
    assert_eq!(result.sources[0].url, good);
}

#[tokio::test]
async fn test_source_without_usable_content_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let thin = "https://example.invalid/thin";
    let (orchestrator, cache) = pipeline_with(vec![StubProvider::hit(thin)], dir.path());
    // Cached page exists but extraction yields nothing over the
    // boilerplate threshold.
    cache.put(
        &PageCache::key(thin),
        "<html><body><p>tiny</p></body></html>",
    );

    let result = orchestrator.research("cat").await;

    assert!(!result.success);
    assert!(result.sources.is_empty());
}

#[tokio::test]
async fn test_short_query_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let (orchestrator, _cache) = pipeline_with(vec![], dir.path());

    let result = orchestrator.research(" ab ").await;

    assert!(!result.success);
    assert!(result.error.as_deref().unwrap().contains("3 characters"));
}

#[tokio::test]
async fn test_sources_keep_rank_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = "https://example.invalid/first";
    let second = "https://example.invalid/second";
    let (orchestrator, cache) = pipeline_with(
        vec![StubProvider::hit(first), StubProvider::hit(second)],
        dir.path(),
    );
    seed_article(&cache, first, ARTICLE_SENTENCES);
    seed_article(&cache, second, ARTICLE_SENTENCES);

    let result = orchestrator.research("cat").await;

    assert!(result.success);
    assert_eq!(result.sources.len(), 2);
    assert_eq!(result.sources[0].url, first);
    assert_eq!(result.sources[1].url, second);
}
