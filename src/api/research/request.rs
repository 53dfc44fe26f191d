// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Research API request types

use serde::{Deserialize, Serialize};

/// Request body for POST /v1/research
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchApiRequest {
    /// Free-text research query (required, 3-500 chars after trimming)
    pub query: String,
}

impl ResearchApiRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            return Err("Query cannot be empty".to_string());
        }
        if trimmed.chars().count() < 3 {
            return Err("Query must be at least 3 characters".to_string());
        }
        if self.query.len() > 500 {
            return Err("Query too long (max 500 characters)".to_string());
        }
        Ok(())
    }
}
