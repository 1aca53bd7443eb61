// src/model.rs
// =============================================================================
// The records a crawl produces.
//
// - LinkResult: one probed link (one per anchor occurrence, not per unique URL)
// - CrawledPage: one page the engine tried to download
// - CrawlResult: the summary handed out when a run completes
//
// All of them are plain immutable values. The engine builds them, pushes them
// out to listeners and never touches them again.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checker::LinkStatus;

// Anchor text used when the "link" is a page that failed to download
pub const PAGE_ERROR_TEXT: &str = "(page error)";
pub const PAGE_EXCEPTION_TEXT: &str = "(exception)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkResult {
    /// Absolute URL the link points to
    pub target: String,
    pub status: LinkStatus,
    /// Page the link was found on
    pub source_page: String,
    /// Visible label of the link, possibly empty
    pub anchor_text: String,
}

impl LinkResult {
    pub fn is_broken(&self) -> bool {
        self.status.is_broken()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawledPage {
    pub url: String,
    pub status: LinkStatus,
    /// Links probed on this page (0 when the page failed to download)
    pub link_count: usize,
    pub visited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlResult {
    /// Every probed link, in discovery order
    pub all_links: Vec<LinkResult>,
    pub page_count: usize,
    pub total_link_count: usize,
    pub broken_link_count: usize,
}

impl CrawlResult {
    pub fn broken_links(&self) -> impl Iterator<Item = &LinkResult> {
        self.all_links.iter().filter(|link| link.is_broken())
    }
}
