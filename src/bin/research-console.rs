// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Interactive console for the research pipeline
//!
//! Reads queries from stdin, runs the pipeline in-process and prints the
//! aggregate summary, the backing sources and the execution time. A single
//! query can also be passed with `--query` for one-shot use.

use anyhow::Result;
use clap::Parser;
use fabstir_research_node::research::{ResearchConfig, ResearchOrchestrator, ResearchResult};
use std::io::{BufRead, Write};
use std::time::Instant;

/// Research console
#[derive(Parser, Debug)]
#[command(name = "research-console")]
#[command(about = "Interactive console for the research pipeline", long_about = None)]
struct Cli {
    /// Run a single query and exit instead of starting the prompt loop
    #[arg(long)]
    query: Option<String>,

    /// Override the cache directory
    #[arg(long)]
    cache_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Keep the console output clean unless the user asks for logs
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ResearchConfig::from_env();
    if let Some(cache_dir) = cli.cache_dir {
        config.content.cache_dir = cache_dir;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    let orchestrator = ResearchOrchestrator::from_config(&config)?;

    if let Some(query) = cli.query {
        run_query(&orchestrator, &query).await;
        return Ok(());
    }

    println!("Research console. Type 'exit' to quit.");

    let stdin = std::io::stdin();
    loop {
        print!("\nquery> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query.to_lowercase().as_str(), "exit" | "quit" | "q") {
            break;
        }

        run_query(&orchestrator, query).await;
    }

    Ok(())
}

async fn run_query(orchestrator: &ResearchOrchestrator, query: &str) {
    let started = Instant::now();
    let result = orchestrator.research(query).await;
    let elapsed = started.elapsed();

    print_result(&result, elapsed.as_secs_f64());
}

fn print_result(result: &ResearchResult, elapsed_secs: f64) {
    println!("{}", "=".repeat(80));

    if result.success {
        println!("Summary (language: {}):", result.language);
        println!("{}", result.summary);

        println!("\nSources:");
        for (index, source) in result.sources.iter().enumerate() {
            match &source.title {
                Some(title) => println!("\n{}. {}", index + 1, title),
                None => println!("\n{}.", index + 1),
            }
            println!("   URL: {}", source.url);
            println!("   {}", truncate(&source.summary, 200));
        }
    } else {
        println!(
            "Error: {}",
            result.error.as_deref().unwrap_or("unknown failure")
        );
    }

    println!("\n{}", "=".repeat(80));
    println!("Execution time: {:.2}s", elapsed_secs);
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max_chars).collect();
        format!("{}...", prefix)
    }
}
