// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use fabstir_research_node::{
    api,
    research::{ResearchConfig, ResearchOrchestrator},
    version,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    println!("Starting {}...", version::get_version_string());

    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(8080);

    let config = ResearchConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    let orchestrator = Arc::new(ResearchOrchestrator::from_config(&config)?);
    tracing::info!(
        providers = ?orchestrator.available_providers(),
        cache_dir = %config.content.cache_dir,
        "research pipeline ready"
    );

    api::start_server(orchestrator, api_port)
        .await
        .map_err(|e| anyhow::anyhow!("API server failed: {}", e))?;

    Ok(())
}
