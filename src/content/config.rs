// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for content fetching, caching and extraction

use std::env;

/// Configuration for content fetching, caching and extraction
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Directory backing the on-disk page cache (default: ".cache")
    pub cache_dir: String,
    /// Cache entry validity window in hours (default: 24)
    pub cache_validity_hours: u64,
    /// Minimum interval between outbound requests in seconds (default: 2)
    pub min_request_interval_secs: u64,
    /// Maximum fetch attempts per URL (default: 3)
    pub max_retries: u32,
    /// Timeout per HTTP request in seconds (default: 10)
    pub request_timeout_secs: u64,
    /// Maximum characters of extracted text per page (default: 100000)
    pub max_text_length: usize,
}

impl ContentConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            cache_dir: env::var("RESEARCH_CACHE_DIR").unwrap_or_else(|_| ".cache".to_string()),
            cache_validity_hours: env::var("RESEARCH_CACHE_VALIDITY_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            min_request_interval_secs: env::var("RESEARCH_MIN_REQUEST_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            max_retries: env::var("RESEARCH_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            request_timeout_secs: env::var("RESEARCH_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            max_text_length: env::var("RESEARCH_MAX_TEXT_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100_000),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.cache_dir.trim().is_empty() {
            return Err("cache_dir must not be empty".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be at least 1".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be at least 1".to_string());
        }
        if self.max_text_length < 100 {
            return Err("max_text_length must be at least 100".to_string());
        }
        Ok(())
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            cache_dir: ".cache".to_string(),
            cache_validity_hours: 24,
            min_request_interval_secs: 2,
            max_retries: 3,
            request_timeout_secs: 10,
            max_text_length: 100_000,
        }
    }
}
