// src/error.rs
// =============================================================================
// Error types for the library.
//
// Only two things can go wrong in a way the caller has to handle:
// - a page could not be downloaded (FetchError, absorbed by the engine)
// - a run could not be started or configured (CrawlError)
//
// Dead links are NOT errors; they are LinkStatus values (see checker/status.rs).
// =============================================================================

use thiserror::Error;

use crate::checker::FailureTag;

/// Why a page could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status
    #[error("page returned HTTP {0}")]
    Status(u16),
    /// The request never completed
    #[error("page could not be retrieved: {0}")]
    Transport(FailureTag),
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("a crawl is already running on this engine")]
    AlreadyRunning,

    #[error("unknown traversal mode: {0:?} (expected BFS or DFS)")]
    UnknownMode(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
