// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for web source discovery

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single candidate source returned by a search provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Absolute URL of the candidate source
    pub url: String,
    /// Title of the result, when the provider surfaces one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Snippet/description from the results page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Provider that produced the result (e.g. "google", "duckduckgo")
    pub source: String,
}

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// API or endpoint error from the search provider
    #[error("search API error: {status} - {message}")]
    ApiError {
        /// HTTP status code (0 when the request never completed)
        status: u16,
        /// Error message
        message: String,
    },

    /// Search request timed out
    #[error("search timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// No provider produced results
    #[error("provider unavailable: {provider}")]
    ProviderUnavailable {
        /// Name of the provider, or "all" when the whole chain failed
        provider: String,
    },

    /// Invalid search query
    #[error("invalid query: {reason}")]
    InvalidQuery {
        /// Reason the query is invalid
        reason: String,
    },
}
