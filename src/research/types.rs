// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Result types for the research pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fetched-and-summarized web document backing a research result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Absolute URL the content was fetched from
    pub url: String,
    /// Title reported by the search provider, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Extractive summary of the document
    pub summary: String,
    /// Detected language of the document, or "unknown"
    pub language: String,
}

/// The structured outcome of one research invocation
///
/// Exactly one result is produced per call; `success` is true iff at least
/// one source yielded extractable content and a non-empty aggregate summary
/// was produced. Sources keep search-rank order and contain no duplicate
/// URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResult {
    /// The original query
    pub query: String,
    /// Per-source summaries, in rank order
    pub sources: Vec<Source>,
    /// Aggregate summary across all sources
    pub summary: String,
    /// Detected language of the aggregate summary
    pub language: String,
    /// When the result was produced
    pub timestamp: DateTime<Utc>,
    /// Whether usable content was produced
    pub success: bool,
    /// Human-readable failure description when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResearchResult {
    /// Build a failed result carrying an explanatory error
    pub fn failure(query: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            sources: Vec::new(),
            summary: String::new(),
            language: crate::summarize::UNKNOWN_LANGUAGE.to_string(),
            timestamp: Utc::now(),
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_shape() {
        let result = ResearchResult::failure("cats", "no sources found");
        assert!(!result.success);
        assert!(result.sources.is_empty());
        assert_eq!(result.error.as_deref(), Some("no sources found"));
        assert_eq!(result.language, "unknown");
    }

    #[test]
    fn test_serialization_is_camel_case() {
        let result = ResearchResult::failure("cats", "nope");
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"timestamp\""));
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error\""));
    }

    #[test]
    fn test_success_omits_error_field() {
        let result = ResearchResult {
            query: "q".to_string(),
            sources: vec![],
            summary: "text".to_string(),
            language: "eng".to_string(),
            timestamp: Utc::now(),
            success: true,
            error: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_source_round_trip() {
        let source = Source {
            url: "https://example.com".to_string(),
            title: Some("Example".to_string()),
            summary: "A summary.".to_string(),
            language: "eng".to_string(),
        };
        let json = serde_json::to_string(&source).unwrap();
        let back: Source = serde_json::from_str(&json).unwrap();
        assert_eq!(back.url, source.url);
        assert_eq!(back.title, source.title);
    }
}
