// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query-to-summary pipeline orchestration
//!
//! Composes discovery, fetching, extraction and summarization into one
//! query→result flow. Failures local to a single candidate are absorbed;
//! only invalid input or the total absence of usable sources surfaces, and
//! then as a structured error result rather than an `Err`.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::config::ResearchConfig;
use super::types::{ResearchResult, Source};
use crate::content::{extract_main_content, ContentFetcher, PageCache, RequestRateLimiter};
use crate::search::SearchService;
use crate::summarize::summarize;

/// Minimum trimmed query length accepted by the pipeline
const MIN_QUERY_CHARS: usize = 3;

/// The research pipeline
pub struct ResearchOrchestrator {
    search: SearchService,
    fetcher: ContentFetcher,
    max_sentences: usize,
    max_text_length: usize,
}

impl ResearchOrchestrator {
    /// Build the full pipeline from configuration
    ///
    /// Wires one shared rate limiter through the search providers and the
    /// fetcher, and opens the on-disk page cache (creating its directory).
    pub fn from_config(config: &ResearchConfig) -> std::io::Result<Self> {
        let limiter = Arc::new(RequestRateLimiter::new(Duration::from_secs(
            config.content.min_request_interval_secs,
        )));
        let cache = Arc::new(PageCache::new(
            &config.content.cache_dir,
            Duration::from_secs(config.content.cache_validity_hours * 3600),
        )?);

        let search = SearchService::new(&config.search, limiter.clone());
        let fetcher = ContentFetcher::new(&config.content, cache, limiter);

        Ok(Self {
            search,
            fetcher,
            max_sentences: config.max_sentences,
            max_text_length: config.content.max_text_length,
        })
    }

    /// Build a pipeline from explicit components (used by tests and embeds)
    pub fn new(
        search: SearchService,
        fetcher: ContentFetcher,
        max_sentences: usize,
        max_text_length: usize,
    ) -> Self {
        Self {
            search,
            fetcher,
            max_sentences,
            max_text_length,
        }
    }

    /// Run the full research pipeline for a query
    ///
    /// Always returns exactly one [`ResearchResult`]; no failure mode
    /// escapes as an error or panic.
    pub async fn research(&self, query: &str) -> ResearchResult {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return ResearchResult::failure(
                query,
                format!("query must be at least {} characters", MIN_QUERY_CHARS),
            );
        }

        info!(query = trimmed, "starting research");

        let candidates = match self.search.search(trimmed).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(query = trimmed, error = %e, "source discovery failed");
                return ResearchResult::failure(query, "no sources found for query");
            }
        };

        let mut sources: Vec<Source> = Vec::new();
        for candidate in &candidates {
            let body = match self.fetcher.fetch(&candidate.url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(url = %candidate.url, error = %e, "skipping source: fetch failed");
                    continue;
                }
            };

            let text = extract_main_content(&body, self.max_text_length);
            if text.is_empty() {
                debug!(url = %candidate.url, "skipping source: no usable content");
                continue;
            }

            let summary = summarize(&text, self.max_sentences);
            debug!(
                url = %candidate.url,
                language = %summary.language,
                "source summarized"
            );

            sources.push(Source {
                url: candidate.url.clone(),
                title: candidate.title.clone(),
                summary: summary.text,
                language: summary.language,
            });
        }

        if sources.is_empty() {
            return ResearchResult::failure(query, "no content could be retrieved from any source");
        }

        let joined = sources
            .iter()
            .map(|s| s.summary.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let aggregate = summarize(&joined, self.max_sentences);

        info!(
            query = trimmed,
            source_count = sources.len(),
            language = %aggregate.language,
            "research complete"
        );

        ResearchResult {
            query: query.to_string(),
            sources,
            summary: aggregate.text,
            language: aggregate.language,
            timestamp: Utc::now(),
            success: true,
            error: None,
        }
    }

    /// Provider names participating in discovery, in failover order
    pub fn available_providers(&self) -> Vec<&str> {
        self.search.available_providers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_short_query_is_rejected_without_network() {
        // A config pointing at nothing: if validation failed to short-circuit,
        // discovery against unroutable providers would error differently.
        let config = ResearchConfig {
            content: crate::content::ContentConfig {
                cache_dir: tempfile::tempdir()
                    .unwrap()
                    .path()
                    .to_string_lossy()
                    .into_owned(),
                min_request_interval_secs: 0,
                ..crate::content::ContentConfig::default()
            },
            ..ResearchConfig::default()
        };
        let orchestrator = ResearchOrchestrator::from_config(&config).unwrap();

        let result = orchestrator.research("  hi  ").await;
        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("3 characters"));
        assert!(result.sources.is_empty());
    }

    #[test]
    fn test_from_config_creates_cache_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cache_dir = dir.path().join("pages");
        let config = ResearchConfig {
            content: crate::content::ContentConfig {
                cache_dir: cache_dir.to_string_lossy().into_owned(),
                ..crate::content::ContentConfig::default()
            },
            ..ResearchConfig::default()
        };

        let _orchestrator = ResearchOrchestrator::from_config(&config).unwrap();
        assert!(cache_dir.is_dir());
    }
}
