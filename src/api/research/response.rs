// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Research API response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::research::{ResearchResult, Source};

/// Response body for POST /v1/research
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchApiResponse {
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
    /// Failure description when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock time of the pipeline call in milliseconds
    pub research_time_ms: u64,
}

impl ResearchApiResponse {
    /// Wrap a pipeline result with its measured execution time
    pub fn from_result(result: ResearchResult, research_time_ms: u64) -> Self {
        Self {
            query: result.query,
            sources: result.sources,
            summary: result.summary,
            language: result.language,
            timestamp: result.timestamp,
            success: result.success,
            error: result.error,
            research_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_serialization() {
        let result = ResearchResult::failure("cats", "no sources found");
        let response = ResearchApiResponse::from_result(result, 42);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"query\""));
        assert!(json.contains("\"researchTimeMs\":42"));
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error\""));
    }

    #[test]
    fn test_success_response_omits_error() {
        let result = ResearchResult {
            query: "cats".to_string(),
            sources: vec![],
            summary: "Cats are mammals.".to_string(),
            language: "eng".to_string(),
            timestamp: Utc::now(),
            success: true,
            error: None,
        };
        let response = ResearchApiResponse::from_result(result, 7);

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("\"error\""));
        assert!(json.contains("\"summary\":\"Cats are mammals.\""));
    }
}
