// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Top-level configuration for the research pipeline

use std::env;

use crate::content::ContentConfig;
use crate::search::SearchConfig;

/// Configuration for the research pipeline
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    /// Source discovery settings
    pub search: SearchConfig,
    /// Fetching, caching and extraction settings
    pub content: ContentConfig,
    /// Maximum sentences per summary (default: 5)
    pub max_sentences: usize,
}

impl ResearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            search: SearchConfig::from_env(),
            content: ContentConfig::from_env(),
            max_sentences: env::var("RESEARCH_MAX_SENTENCES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        self.search.validate()?;
        self.content.validate()?;
        if self.max_sentences == 0 {
            return Err("max_sentences must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            content: ContentConfig::default(),
            max_sentences: 5,
        }
    }
}
