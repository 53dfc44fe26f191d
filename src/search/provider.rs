// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search provider trait definition

use async_trait::async_trait;

use super::types::{SearchError, SearchResult};

/// Trait for implementing search providers
///
/// Search providers implement this trait to discover candidate sources for a
/// query. Multiple providers can be configured with automatic failover.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search
    ///
    /// # Arguments
    /// * `query` - The search query string
    /// * `num_results` - Maximum number of results to return
    ///
    /// # Returns
    /// A ranked vector of candidate sources or an error
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;

    /// Check if the provider is available (enabled, reachable, etc.)
    fn is_available(&self) -> bool;

    /// Get provider priority (lower = preferred)
    ///
    /// Default priority is 100. Providers with lower priority
    /// are tried first during failover.
    fn priority(&self) -> u8 {
        100
    }
}
