// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Google results-page search provider
//!
//! Scrapes the standard results page with a browser identity. Preferred
//! provider when enabled; the service falls back to DuckDuckGo whenever the
//! page yields no parseable results or the request fails.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::provider::SearchProvider;
use super::types::{SearchError, SearchResult};
use crate::content::RequestRateLimiter;

const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Google results-page provider
pub struct GoogleHtmlProvider {
    client: Client,
    limiter: Arc<RequestRateLimiter>,
    enabled: bool,
}

impl GoogleHtmlProvider {
    /// Create a new Google provider sharing the request limiter
    pub fn new(limiter: Arc<RequestRateLimiter>, enabled: bool) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            limiter,
            enabled,
        }
    }
}

#[async_trait]
impl SearchProvider for GoogleHtmlProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.limiter.wait().await;

        let num = num_results.to_string();
        let response = self
            .client
            .get(GOOGLE_SEARCH_URL)
            .query(&[("q", query), ("num", num.as_str())])
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
                message: "Google request failed".to_string(),
            });
        }

        let html = response.text().await.map_err(|e| SearchError::ApiError {
            status: 0,
            message: e.to_string(),
        })?;

        Ok(parse_results_page(&html, num_results))
    }

    fn name(&self) -> &'static str {
        "google"
    }

    fn is_available(&self) -> bool {
        self.enabled
    }

    fn priority(&self) -> u8 {
        10 // Preferred provider
    }
}

/// Parse result blocks from the Google results page
///
/// Results live in `div.g` blocks: the first external anchor is the target
/// and the `h3` inside it carries the title. Engine-internal links and
/// blocks without a usable anchor are skipped.
fn parse_results_page(html: &str, max_results: usize) -> Vec<SearchResult> {
    let document = Html::parse_document(html);

    let (block_sel, anchor_sel, title_sel) = match (
        Selector::parse("div.g"),
        Selector::parse("a[href]"),
        Selector::parse("h3"),
    ) {
        (Ok(b), Ok(a), Ok(t)) => (b, a, t),
        _ => return Vec::new(),
    };

    let mut results = Vec::new();
    for block in document.select(&block_sel) {
        if results.len() >= max_results {
            break;
        }

        let url = block
            .select(&anchor_sel)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| is_external_result(href));
        let url = match url {
            Some(url) => url.to_string(),
            None => continue,
        };

        let title = block
            .select(&title_sel)
            .next()
            .map(|el| collapse_text(&el.text().collect::<String>()))
            .filter(|t| !t.is_empty());

        results.push(SearchResult {
            url,
            title,
            snippet: None,
            source: "google".to_string(),
        });
    }

    results
}

/// Keep only absolute links that leave the search engine
fn is_external_result(href: &str) -> bool {
    if !href.starts_with("http://") && !href.starts_with("https://") {
        return false;
    }
    match Url::parse(href) {
        Ok(parsed) => parsed
            .host_str()
            .map(|host| !host.ends_with("google.com"))
            .unwrap_or(false),
        Err(_) => false,
    }
}

fn collapse_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
