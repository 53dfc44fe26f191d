// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DuckDuckGo search provider
//!
//! Implements web search using DuckDuckGo's lightweight HTML interface.
//! No API key required, serves as the always-available fallback provider.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::provider::SearchProvider;
use super::types::{SearchError, SearchResult};
use crate::content::RequestRateLimiter;

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// DuckDuckGo search provider (no API key required)
///
/// Issues one rate-limited POST against the HTML endpoint and parses the
/// fixed result-block structure. A structurally malformed block is skipped
/// rather than failing the whole call.
pub struct DuckDuckGoProvider {
    client: Client,
    limiter: Arc<RequestRateLimiter>,
}

impl DuckDuckGoProvider {
    /// Create a new DuckDuckGo provider sharing the request limiter
    pub fn new(limiter: Arc<RequestRateLimiter>) -> Self {
        // Use a realistic browser User-Agent to avoid being blocked
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .expect("Failed to create HTTP client");

        Self { client, limiter }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.limiter.wait().await;

        let response = self
            .client
            .post(DDG_HTML_URL)
            .form(&[("q", query)])
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
                message: "DuckDuckGo request failed".to_string(),
            });
        }

        let html = response.text().await.map_err(|e| SearchError::ApiError {
            status: 0,
            message: e.to_string(),
        })?;

        Ok(parse_result_blocks(&html, num_results))
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    fn is_available(&self) -> bool {
        true // No API key needed
    }

    fn priority(&self) -> u8 {
        50 // Fallback provider
    }
}

/// Parse DuckDuckGo HTML result blocks
///
/// Each result is a `div.result` containing an `a.result__a` link and an
/// optional `a.result__snippet` description. Blocks missing the link or a
/// usable URL are skipped.
fn parse_result_blocks(html: &str, max_results: usize) -> Vec<SearchResult> {
    let document = Html::parse_document(html);

    let (block_sel, link_sel, snippet_sel) = match (
        Selector::parse("div.result"),
        Selector::parse("a.result__a"),
        Selector::parse("a.result__snippet"),
    ) {
        (Ok(b), Ok(l), Ok(s)) => (b, l, s),
        _ => return Vec::new(),
    };

    let mut results = Vec::new();
    for block in document.select(&block_sel) {
        if results.len() >= max_results {
            break;
        }

        let link = match block.select(&link_sel).next() {
            Some(link) => link,
            None => continue,
        };
        let href = match link.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        let url = match unwrap_redirect_url(href) {
            Some(url) => url,
            None => continue,
        };

        let title = collapse_text(&link.text().collect::<String>());
        let snippet = block
            .select(&snippet_sel)
            .next()
            .map(|el| collapse_text(&el.text().collect::<String>()))
            .filter(|s| !s.is_empty());

        results.push(SearchResult {
            url,
            title: (!title.is_empty()).then_some(title),
            snippet,
            source: "duckduckgo".to_string(),
        });
    }

    results
}

/// Extract the actual target from DuckDuckGo's redirect URL
///
/// Result hrefs look like `//duckduckgo.com/l/?uddg=https%3A%2F%2F...&rut=x`;
/// direct http(s) links are passed through unchanged.
fn unwrap_redirect_url(href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }

    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        return None;
    };

    let parsed = Url::parse(&absolute).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned())
}

fn collapse_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
