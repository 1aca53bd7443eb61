// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first or depth-first crawling starting from a seed URL
// - Same-host restriction (external links are checked but never crawled)
// - Every link on every crawled page is probed, once per occurrence
// - Results stream out through a CrawlListener while the crawl runs
// - Cooperative stop between pages and between probes
//
// Submodules:
// - host: same-host check
// - frontier: the BFS queue / DFS stack
// - emitter: listener trait, events and counter snapshots
// - engine: the Crawler itself
// =============================================================================

mod emitter;
mod engine;
mod frontier;
mod host;

pub use emitter::{ChannelListener, Counters, CrawlEvent, CrawlListener, NoopListener, RunOutcome};
pub use engine::{Crawler, StopSignal};
pub use frontier::{Frontier, TraversalMode};
pub use host::same_host;
