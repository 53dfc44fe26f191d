// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wikipedia search provider
//!
//! Discovers encyclopedia articles through the MediaWiki API: a title
//! search for the query, the top match plus a bounded number of related
//! titles emitted as candidate sources. A disambiguation match is resolved
//! deterministically by taking the page's first link.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::provider::SearchProvider;
use super::types::{SearchError, SearchResult};
use crate::content::RequestRateLimiter;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Wikipedia (MediaWiki API) provider
pub struct WikipediaProvider {
    client: Client,
    limiter: Arc<RequestRateLimiter>,
    api_url: String,
    article_base: String,
    related_limit: usize,
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct SearchApiResponse {
    query: Option<SearchSection>,
}

#[derive(Debug, Deserialize)]
struct SearchSection {
    #[serde(default)]
    search: Vec<TitleHit>,
}

#[derive(Debug, Deserialize)]
struct TitleHit {
    title: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct LinksApiResponse {
    query: Option<LinksSection>,
}

#[derive(Debug, Deserialize)]
struct LinksSection {
    #[serde(default)]
    pages: HashMap<String, LinksPage>,
}

#[derive(Debug, Deserialize)]
struct LinksPage {
    #[serde(default)]
    links: Vec<PageLink>,
}

#[derive(Debug, Deserialize)]
struct PageLink {
    title: String,
}

impl WikipediaProvider {
    /// Create a new Wikipedia provider
    ///
    /// # Arguments
    /// * `limiter` - Shared request limiter
    /// * `lang` - Wikipedia language edition (e.g. "en")
    /// * `related_limit` - How many related titles to emit beyond the top hit
    /// * `enabled` - Whether the provider participates in failover
    pub fn new(
        limiter: Arc<RequestRateLimiter>,
        lang: &str,
        related_limit: usize,
        enabled: bool,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            limiter,
            api_url: format!("https://{}.wikipedia.org/w/api.php", lang),
            article_base: format!("https://{}.wikipedia.org/wiki/", lang),
            related_limit,
            enabled,
        }
    }

    async fn title_search(&self, query: &str, limit: usize) -> Result<Vec<TitleHit>, SearchError> {
        self.limiter.wait().await;

        let srlimit = limit.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", srlimit.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout {
                        timeout_ms: REQUEST_TIMEOUT_SECS * 1000,
                    }
                } else {
                    SearchError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        if !response.status().is_success() {
            return Err(SearchError::ApiError {
                status: response.status().as_u16(),
                message: "Wikipedia request failed".to_string(),
            });
        }

        let parsed: SearchApiResponse =
            response.json().await.map_err(|e| SearchError::ApiError {
                status: 0,
                message: e.to_string(),
            })?;

        Ok(parsed.query.map(|q| q.search).unwrap_or_default())
    }

    /// Resolve a disambiguation page to its first listed article
    ///
    /// Falls back to the original title when no link can be resolved, so
    /// the outcome stays deterministic either way.
    async fn resolve_first_link(&self, title: &str) -> String {
        self.limiter.wait().await;

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("prop", "links"),
                ("titles", title),
                ("plnamespace", "0"),
                ("pllimit", "1"),
                ("format", "json"),
            ])
            .send()
            .await;

        let response = match response {
            Ok(r) if r.status().is_success() => r,
            _ => return title.to_string(),
        };

        match response.json::<LinksApiResponse>().await {
            Ok(parsed) => parsed
                .query
                .and_then(|q| q.pages.into_values().next())
                .and_then(|page| page.links.into_iter().next())
                .map(|link| link.title)
                .unwrap_or_else(|| title.to_string()),
            Err(_) => title.to_string(),
        }
    }

    fn article_url(&self, title: &str) -> Option<String> {
        let mut url = Url::parse(&self.article_base).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(&title.replace(' ', "_"));
        Some(url.to_string())
    }
}

#[async_trait]
impl SearchProvider for WikipediaProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        // Top hit plus a bounded number of related titles.
        let limit = (1 + self.related_limit).min(num_results).max(1);
        let hits = self.title_search(query, limit).await?;

        let mut results = Vec::with_capacity(hits.len());
        for hit in hits {
            let title = if is_disambiguation(&hit.title) {
                self.resolve_first_link(&hit.title).await
            } else {
                hit.title
            };

            let url = match self.article_url(&title) {
                Some(url) => url,
                None => continue,
            };

            let snippet = strip_markup(&hit.snippet);
            results.push(SearchResult {
                url,
                title: Some(title),
                snippet: (!snippet.is_empty()).then_some(snippet),
                source: "wikipedia".to_string(),
            });
        }

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "wikipedia"
    }

    fn is_available(&self) -> bool {
        self.enabled
    }

    fn priority(&self) -> u8 {
        20
    }
}

fn is_disambiguation(title: &str) -> bool {
    title.ends_with("(disambiguation)")
}

/// Strip the search-match markup the API embeds in snippets
fn strip_markup(snippet: &str) -> String {
    let fragment = scraper::Html::parse_fragment(snippet);
    let text: String = fragment.root_element().text().collect::<Vec<_>>().join("");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
