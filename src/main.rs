// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Start a crawl on its own task
// 3. Print broken links as they stream in (Ctrl-C stops the crawl)
// 4. Print the summary and exit with a proper code:
//    0 = no broken links, 1 = broken links found, 2 = error, 130 = stopped
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use link_patrol::{
    ChannelListener, Counters, CrawlEvent, CrawlResult, Crawler, CrawlerConfig, LinkResult,
    TraversalMode,
};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so --json output on stdout stays clean.
// RUST_LOG=link_patrol=debug shows every page and probe.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            seed_url,
            mode,
            json,
            timeout_secs,
            delay_ms,
        } => {
            let config = cli::crawler_config(timeout_secs, delay_ms);
            handle_crawl(&seed_url, mode.into(), json, &config).await
        }
    }
}

async fn handle_crawl(
    seed_url: &str,
    mode: TraversalMode,
    json: bool,
    config: &CrawlerConfig,
) -> Result<i32> {
    let seed = cli::normalize_seed(seed_url);
    eprintln!("🔍 Crawling {} ({})", seed, mode);

    let crawler = Crawler::new(config).context("could not set up the crawler")?;
    let (listener, mut events) = ChannelListener::new();
    let handle = crawler.start(seed, &mode.to_string(), Arc::new(listener))?;

    let mut counters = Counters::default();
    let mut stopping = false;
    let mut terminal = None;

    while terminal.is_none() {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                match event {
                    CrawlEvent::BrokenLink(link) => {
                        if !json {
                            print_broken(&link);
                        }
                    }
                    CrawlEvent::Page(page) => {
                        eprintln!("   📄 {} [{}] {} link(s)", page.url, page.status, page.link_count);
                    }
                    CrawlEvent::Counters(latest) => counters = latest,
                    other => terminal = Some(other),
                }
            }
            _ = tokio::signal::ctrl_c(), if !stopping => {
                eprintln!("⏹  Stopping after the current request...");
                crawler.stop();
                stopping = true;
            }
        }
    }

    handle.await.context("crawl task failed")?;

    match terminal {
        Some(CrawlEvent::Completed(result)) => {
            print_result(&result, json)?;
            Ok(if result.broken_link_count > 0 { 1 } else { 0 })
        }
        Some(CrawlEvent::Stopped) => {
            eprintln!(
                "⏹  Stopped: {} page(s), {} link(s), {} broken",
                counters.pages, counters.total_links, counters.broken_links
            );
            Ok(130)
        }
        Some(CrawlEvent::Errored(message)) => {
            eprintln!("Error: {}", message);
            Ok(2)
        }
        _ => anyhow::bail!("crawl ended without a result"),
    }
}

fn print_broken(link: &LinkResult) {
    println!("❌ {} [{}] on {} ({})", link.target, link.status, link.source_page, link.anchor_text);
}

// Prints the results either as a table or JSON
fn print_result(result: &CrawlResult, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(result)?;
        println!("{}", json_output);
    } else {
        print_table(result);
    }
    Ok(())
}

// Prints the broken links as a human-readable table, then the totals
fn print_table(result: &CrawlResult) {
    println!();
    println!("{:<60} {:<30} {:<40}", "BROKEN LINK", "STATUS", "SOURCE PAGE");
    println!("{}", "=".repeat(130));

    for link in result.broken_links() {
        println!(
            "{:<60} {:<30} {:<40}",
            truncate(&link.target, 57),
            link.status.to_string(),
            truncate(&link.source_page, 37)
        );
    }

    println!();
    println!("📊 Summary:");
    println!("   📄 Pages: {}", result.page_count);
    println!("   🔗 Links: {}", result.total_link_count);
    println!("   ❌ Broken: {}", result.broken_link_count);
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}
