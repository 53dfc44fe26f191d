// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search service orchestration
//!
//! Coordinates the configured providers with priority-ordered failover and
//! deduplicates the winning result list.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::config::SearchConfig;
use super::duckduckgo::DuckDuckGoProvider;
use super::google::GoogleHtmlProvider;
use super::provider::SearchProvider;
use super::types::{SearchError, SearchResult};
use super::wikipedia::WikipediaProvider;
use crate::content::RequestRateLimiter;
use url::Url;

/// Search service with provider failover
///
/// Providers are tried in priority order; one that errors or comes back
/// empty falls through to the next. The winning list is deduplicated by URL
/// and capped at the configured result limit.
pub struct SearchService {
    providers: Vec<Box<dyn SearchProvider>>,
    result_limit: usize,
}

impl SearchService {
    /// Create a search service from configuration
    ///
    /// All providers share the one request limiter — no outbound call
    /// bypasses it.
    pub fn new(config: &SearchConfig, limiter: Arc<RequestRateLimiter>) -> Self {
        let mut providers: Vec<Box<dyn SearchProvider>> = Vec::new();

        providers.push(Box::new(GoogleHtmlProvider::new(
            limiter.clone(),
            config.google_enabled,
        )));
        if config.google_enabled {
            debug!("Google provider enabled");
        }

        providers.push(Box::new(WikipediaProvider::new(
            limiter.clone(),
            &config.wikipedia_lang,
            config.wikipedia_related_limit,
            config.wikipedia_enabled,
        )));
        if config.wikipedia_enabled {
            debug!("Wikipedia provider enabled");
        }

        // Always add DuckDuckGo as fallback (priority 50)
        providers.push(Box::new(DuckDuckGoProvider::new(limiter)));
        debug!("DuckDuckGo provider enabled (fallback)");

        // Sort by priority (lower = preferred)
        providers.sort_by_key(|p| p.priority());

        Self {
            providers,
            result_limit: config.result_limit,
        }
    }

    /// Create a service from explicit providers (used by tests and embeds)
    pub fn with_providers(providers: Vec<Box<dyn SearchProvider>>, result_limit: usize) -> Self {
        let mut providers = providers;
        providers.sort_by_key(|p| p.priority());
        Self {
            providers,
            result_limit,
        }
    }

    /// Discover candidate sources for a query
    ///
    /// Returns the first provider's non-empty result list, deduplicated and
    /// capped, or `SearchError::ProviderUnavailable` when every provider
    /// failed or came back empty.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        for provider in &self.providers {
            if !provider.is_available() {
                continue;
            }

            debug!(provider = provider.name(), query, "trying search provider");

            match provider.search(query, self.result_limit).await {
                Ok(results) if !results.is_empty() => {
                    let deduped = dedupe_by_url(results, self.result_limit);
                    info!(
                        provider = provider.name(),
                        query,
                        result_count = deduped.len(),
                        "search complete"
                    );
                    return Ok(deduped);
                }
                Ok(_) => {
                    warn!(
                        provider = provider.name(),
                        query, "provider returned no results, trying next"
                    );
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        query,
                        error = %e,
                        "provider failed, trying next"
                    );
                }
            }
        }

        Err(SearchError::ProviderUnavailable {
            provider: "all".to_string(),
        })
    }

    /// Get list of available provider names, in failover order
    pub fn available_providers(&self) -> Vec<&str> {
        self.providers
            .iter()
            .filter(|p| p.is_available())
            .map(|p| p.name())
            .collect()
    }
}

/// Drop duplicate URLs, keeping first occurrence (rank order), then cap
fn dedupe_by_url(results: Vec<SearchResult>, limit: usize) -> Vec<SearchResult> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut deduped: Vec<SearchResult> = results
        .into_iter()
        .filter(|r| seen.insert(url_key(&r.url)))
        .collect();
    deduped.truncate(limit);
    deduped
}

/// Normalization key for deduping (drop fragment, trim trailing slash)
fn url_key(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.as_str().trim_end_matches('/').to_string()
        }
        Err(_) => url.trim_end_matches('/').to_string(),
    }
}
