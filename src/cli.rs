// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI is a thin front-end over the library: it parses arguments, builds
// a CrawlerConfig, and prints whatever the crawl streams back.
// =============================================================================

use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;
use url::Url;

use link_patrol::{CrawlerConfig, TraversalMode};

#[derive(Parser, Debug)]
#[command(
    name = "link-patrol",
    version,
    about = "Crawl a website and report every broken link on it",
    long_about = "link-patrol starts at a seed URL, visits every page on the same host, \
                  and checks every link it finds. External links are checked but never crawled."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website starting from a seed URL
    ///
    /// Example: link-patrol crawl example.com --mode dfs
    Crawl {
        /// Seed URL; http:// is assumed when no scheme is given
        seed_url: String,

        /// Traversal order
        #[arg(long, value_enum, default_value_t = Mode::Bfs)]
        mode: Mode,

        /// Output the final result as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Timeout for each request, in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,

        /// Pause after each link probe, in milliseconds
        #[arg(long, default_value_t = 300)]
        delay_ms: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Bfs,
    Dfs,
}

impl From<Mode> for TraversalMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Bfs => TraversalMode::Bfs,
            Mode::Dfs => TraversalMode::Dfs,
        }
    }
}

pub fn crawler_config(timeout_secs: u64, delay_ms: u64) -> CrawlerConfig {
    CrawlerConfig {
        request_timeout: Duration::from_secs(timeout_secs),
        probe_delay: Duration::from_millis(delay_ms),
        ..CrawlerConfig::default()
    }
}

// Prepends http:// when the user typed a bare host like "example.com",
// then writes the URL out in canonical form ("http://example.com/")
pub fn normalize_seed(input: &str) -> String {
    let trimmed = input.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };
    // Unparseable seeds pass through; the crawl reports them as invalid-url
    Url::parse(&with_scheme)
        .map(|url| url.to_string())
        .unwrap_or(with_scheme)
}
