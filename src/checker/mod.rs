// src/checker/mod.rs
// =============================================================================
// This module contains everything that talks to a single URL.
//
// Submodules:
// - status: LinkStatus / FailureTag and the reason-phrase table
// - http: HEAD probes that classify a link (HTTP Status Prober)
// - html: page downloads and anchor extraction (Page Fetcher)
//
// The crawl module drives these; nothing in here knows about frontiers,
// visited sets or listeners.
// =============================================================================

mod html;
mod http;
mod status;

pub use html::{extract_anchors, Anchor, FetchedPage, HttpPageFetcher, PageFetch};
pub use http::{build_client, HttpProber, LinkProbe};
pub use status::{reason_phrase, FailureTag, LinkStatus};
