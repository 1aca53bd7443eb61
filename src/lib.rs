// src/lib.rs
// =============================================================================
// link-patrol: finds broken links on a website.
//
// Starting from a seed URL, the crawler visits every page on the same host
// (breadth-first or depth-first), probes every link on those pages with a
// HEAD request, and streams the results to a listener as it goes.
//
// Modules:
// - checker: talks to one URL at a time (probe, fetch, status table)
// - crawl: the traversal engine and its event stream
// - model: LinkResult / CrawledPage / CrawlResult
// - config, error: settings and error types
// =============================================================================

pub mod checker;
pub mod config;
pub mod crawl;
pub mod error;
pub mod model;

#[cfg(test)]
mod test_support;

pub use checker::{FailureTag, LinkStatus};
pub use config::CrawlerConfig;
pub use crawl::{
    ChannelListener, Counters, CrawlEvent, CrawlListener, Crawler, NoopListener, RunOutcome,
    StopSignal, TraversalMode,
};
pub use error::{CrawlError, FetchError};
pub use model::{CrawlResult, CrawledPage, LinkResult};
