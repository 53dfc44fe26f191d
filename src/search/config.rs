// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for source discovery

use std::env;

/// Configuration for source discovery
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum candidate sources per query (default: 5)
    pub result_limit: usize,
    /// Whether the Google results-page provider participates (default: true)
    pub google_enabled: bool,
    /// Whether the Wikipedia provider participates (default: false)
    pub wikipedia_enabled: bool,
    /// Wikipedia language edition (default: "en")
    pub wikipedia_lang: String,
    /// Related titles emitted beyond the top Wikipedia hit (default: 2)
    pub wikipedia_related_limit: usize,
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            result_limit: env::var("RESEARCH_SEARCH_RESULT_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            google_enabled: env::var("RESEARCH_GOOGLE_ENABLED")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
            wikipedia_enabled: env::var("RESEARCH_WIKIPEDIA_ENABLED")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
            wikipedia_lang: env::var("RESEARCH_WIKIPEDIA_LANG").unwrap_or_else(|_| "en".to_string()),
            wikipedia_related_limit: env::var("RESEARCH_WIKIPEDIA_RELATED_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        // DuckDuckGo is always available, so an all-disabled config still works.
        if self.result_limit == 0 {
            return Err("result_limit must be at least 1".to_string());
        }
        if self.wikipedia_lang.trim().is_empty() {
            return Err("wikipedia_lang must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_limit: 5,
            google_enabled: true,
            wikipedia_enabled: false,
            wikipedia_lang: "en".to_string(),
            wikipedia_related_limit: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.result_limit, 5);
        assert!(config.google_enabled);
        assert!(!config.wikipedia_enabled);
        assert_eq!(config.wikipedia_lang, "en");
        assert_eq!(config.wikipedia_related_limit, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_result_limit() {
        let mut config = SearchConfig::default();
        config.result_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_lang() {
        let mut config = SearchConfig::default();
        config.wikipedia_lang = "".to_string();
        assert!(config.validate().is_err());
    }
}
