// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP document fetching with caching, rate limiting and bounded retries

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::cache::PageCache;
use super::config::ContentConfig;
use super::rate_limiter::RequestRateLimiter;

/// Browser-like identity sent with every outbound request
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fetch error types
///
/// A fetch error is never fatal to the overall pipeline: the orchestrator
/// drops the affected source and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("timeout fetching: {url}")]
    Timeout {
        /// Target URL
        url: String,
    },

    /// HTTP transport error
    #[error("HTTP error for {url}: {message}")]
    Http {
        /// Target URL
        url: String,
        /// Error message
        message: String,
    },

    /// HTTP non-success status
    #[error("HTTP {status} for: {url}")]
    Status {
        /// Status code returned by the server
        status: u16,
        /// Target URL
        url: String,
    },
}

/// Document fetcher consulting the page cache before the network
///
/// A cache miss triggers up to `max_retries` fetch cycles; each cycle waits
/// on the shared request limiter, issues a GET with a fixed timeout, and
/// treats a non-success status as a failure. Failures back off exponentially
/// (1, 2, 4 ... seconds) between attempts.
pub struct ContentFetcher {
    client: Client,
    cache: Arc<PageCache>,
    limiter: Arc<RequestRateLimiter>,
    max_retries: u32,
}

impl ContentFetcher {
    /// Create a new content fetcher
    ///
    /// # Arguments
    /// * `config` - Fetch settings (timeout, retry budget)
    /// * `cache` - Shared on-disk page cache
    /// * `limiter` - Shared request limiter (no fetch bypasses it)
    pub fn new(
        config: &ContentConfig,
        cache: Arc<PageCache>,
        limiter: Arc<RequestRateLimiter>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            cache,
            limiter,
            max_retries: config.max_retries.max(1),
        }
    }

    /// Fetch the raw document at `url`
    ///
    /// Returns the response body, from cache when a fresh entry exists
    /// (no network call, no rate limiting), otherwise from the network with
    /// retries. On success the body is persisted to the cache under the
    /// target's digest key.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let key = PageCache::key(url);

        if let Some(body) = self.cache.get(&key) {
            debug!(url, "page cache hit");
            return Ok(body);
        }

        let mut last_error = FetchError::Http {
            url: url.to_string(),
            message: "no fetch attempt made".to_string(),
        };

        for attempt in 0..self.max_retries {
            self.limiter.wait().await;

            match self.try_fetch(url).await {
                Ok(body) => {
                    self.cache.put(&key, &body);
                    info!(url, bytes = body.len(), "fetched page");
                    return Ok(body);
                }
                Err(e) => {
                    warn!(
                        url,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        error = %e,
                        "fetch attempt failed"
                    );
                    last_error = e;

                    if attempt + 1 < self.max_retries {
                        // Exponential backoff: 1s, 2s, 4s, ...
                        let delay = Duration::from_secs(1u64 << attempt);
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error)
    }

    async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Http {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| FetchError::Http {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
