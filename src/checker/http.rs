// src/checker/http.rs
// =============================================================================
// This module checks if URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Maps the status code through the reason table (see status.rs)
// - Turns every transport failure into a FailureTag instead of an error,
//   so one bad link can never abort a crawl
//
// Unlike a bulk checker, probes here run one at a time: the traversal engine
// calls probe() for each anchor in order and sleeps between calls.
// =============================================================================

use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::error::Error as StdError;
use std::io;
use url::Url;

use super::status::{FailureTag, LinkStatus};
use crate::config::CrawlerConfig;

/// Anything that can tell us the status of a URL.
///
/// The engine only talks to this trait, which lets tests swap in a canned
/// implementation instead of hitting the network.
#[async_trait]
pub trait LinkProbe: Send + Sync {
    async fn probe(&self, url: &str) -> LinkStatus;
}

// Builds the reqwest client shared by the prober and the page fetcher
//
// One client = one connection pool, so consecutive requests to the same host
// reuse their TCP/TLS connection.
pub fn build_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.request_timeout)
        .redirect(redirect::Policy::limited(config.max_redirects))
        .user_agent(config.user_agent.clone())
        .build()
}

/// Probes links with a HEAD request.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LinkProbe for HttpProber {
    async fn probe(&self, url: &str) -> LinkStatus {
        // Reject anything we can't send before touching the network
        if let Err(tag) = parse_http_url(url) {
            tracing::debug!(%url, "probe skipped: invalid url");
            return LinkStatus::failed(tag);
        }

        match self.client.head(url).send().await {
            Ok(response) => {
                let code = response.status().as_u16();
                tracing::debug!(%url, code, "probe answered");
                LinkStatus::from_code(code)
            }
            Err(e) => {
                let tag = classify_error(&e);
                tracing::debug!(%url, error = %e, %tag, "probe failed");
                LinkStatus::failed(tag)
            }
        }
    }
}

// Parses a URL and makes sure it's something reqwest can actually request
pub(crate) fn parse_http_url(url: &str) -> Result<Url, FailureTag> {
    let parsed = Url::parse(url).map_err(|_| FailureTag::InvalidUrl)?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(parsed),
        _ => Err(FailureTag::InvalidUrl),
    }
}

// Categorizes a reqwest error into one of our failure tags
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - Nothing listening on the port
// - TLS certificate issues
// - Too many redirects
// - etc.
pub(crate) fn classify_error(error: &reqwest::Error) -> FailureTag {
    if error.is_timeout() {
        FailureTag::Timeout
    } else if error.is_builder() {
        FailureTag::InvalidUrl
    } else if error.is_redirect() {
        FailureTag::ProtocolError
    } else if error.is_connect() {
        classify_connect_error(error)
    } else if error.is_request() || error.is_body() || error.is_decode() {
        FailureTag::ProtocolError
    } else {
        FailureTag::UnknownError
    }
}

// Connect errors wrap the interesting part several sources deep
// (reqwest -> hyper -> io::Error), so we walk the whole chain.
fn classify_connect_error(error: &reqwest::Error) -> FailureTag {
    let mut chain = String::new();
    let mut source: Option<&(dyn StdError + 'static)> = Some(error);

    while let Some(err) = source {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::ConnectionRefused => return FailureTag::ConnectionRefused,
                io::ErrorKind::TimedOut => return FailureTag::Timeout,
                _ => {}
            }
        }
        chain.push_str(&err.to_string().to_lowercase());
        chain.push(' ');
        source = err.source();
    }

    classify_connect_message(&chain)
}

// Falls back to the wording of the error chain when no io::ErrorKind told us enough
fn classify_connect_message(chain: &str) -> FailureTag {
    if chain.contains("dns")
        || chain.contains("failed to lookup address")
        || chain.contains("name or service not known")
        || chain.contains("no such host")
    {
        FailureTag::DnsFailure
    } else if chain.contains("connection refused") {
        FailureTag::ConnectionRefused
    } else if chain.contains("certificate") || chain.contains("tls") || chain.contains("ssl") {
        FailureTag::ProtocolError
    } else {
        FailureTag::UnknownError
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why HEAD and not GET?
//    - HEAD asks for the headers only, so a big PDF costs us nothing
//    - Some servers answer HEAD with 405; that shows up as a broken link,
//      the same way a browser-less checker would report it
//
// 2. Why does probe() return LinkStatus instead of Result?
//    - A dead link is a normal answer for a link checker, not an error
//    - The traversal loop never has to unwind through `?` because of one URL
//
// 3. What is downcast_ref?
//    - Error sources are trait objects (&dyn Error)
//    - downcast_ref::<io::Error>() asks "is this actually an io::Error?"
//    - It lets us read the io::ErrorKind hidden under hyper's wrapper
// -----------------------------------------------------------------------------
