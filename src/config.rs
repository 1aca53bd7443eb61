// src/config.rs
// =============================================================================
// Knobs shared by the prober, the page fetcher and the traversal engine.
//
// The defaults match what the CLI uses when no flags are given:
// - 10 second timeout on every request (probe or page download)
// - 300 ms pause after every probe, to go easy on the target host
// - up to 10 redirects followed
// - at most 5 MiB of any page body read for link extraction
// =============================================================================

use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PROBE_DELAY: Duration = Duration::from_millis(300);
pub const DEFAULT_MAX_REDIRECTS: usize = 10;
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Upper bound for a single HEAD probe or page download
    pub request_timeout: Duration,
    /// Minimum pause after each probe before the next request goes out
    pub probe_delay: Duration,
    /// How many redirects a probe or page fetch may follow
    pub max_redirects: usize,
    /// Page bodies are cut off after this many bytes
    pub max_body_bytes: usize,
    /// Sent as the User-Agent header on every request
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_TIMEOUT,
            probe_delay: DEFAULT_PROBE_DELAY,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}
