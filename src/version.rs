// Version information for the Fabstir Research Node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-research-pipeline-2026-08-07";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2026-08-07";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "search-failover",
    "page-cache",
    "rate-limiting",
    "content-extraction",
    "extractive-summarization",
    "language-detection",
    "http-api",
    "console",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Fabstir Research Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
