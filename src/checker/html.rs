// src/checker/html.rs
// =============================================================================
// This module downloads pages and extracts the links on them.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to resolve relative links to absolute URLs.
//
// Filtering is NOT done here: every <a href> comes back, including mailto:
// and javascript: links. The traversal engine decides what to probe.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use super::http::classify_error;
use crate::error::FetchError;

/// One `<a href>` found on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// The href attribute, trimmed
    pub href: String,
    /// Absolute URL; the raw href when it can't be resolved, empty when href is empty
    pub url: String,
    /// Visible text with whitespace collapsed
    pub text: String,
}

/// A page that downloaded without an error status (anything below 400).
///
/// Non-HTML bodies come back with their real status and no anchors.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub anchors: Vec<Anchor>,
}

/// Anything that can download a page and list its anchors.
#[async_trait]
pub trait PageFetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Downloads pages with GET, following redirects.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl HttpPageFetcher {
    pub fn new(client: Client, max_body_bytes: usize) -> Self {
        Self {
            client,
            max_body_bytes,
        }
    }
}

#[async_trait]
impl PageFetch for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(classify_error(&e)))?;

        // Only 4xx/5xx count as a failed page; a 3xx that wasn't followed is still a page
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if !is_html_content_type(content_type.as_deref()) {
            tracing::debug!(%url, content_type = ?content_type, "not html, links not extracted");
            return Ok(FetchedPage {
                status: status.as_u16(),
                anchors: Vec::new(),
            });
        }

        // Relative links resolve against where we ended up, not where we started
        let final_url = response.url().to_string();

        // Read at most max_body_bytes; links past the cap are not extracted
        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::Transport(classify_error(&e)))?
        {
            let room = self.max_body_bytes.saturating_sub(body.len());
            body.extend_from_slice(&chunk[..chunk.len().min(room)]);
            if body.len() >= self.max_body_bytes {
                tracing::debug!(%url, limit = self.max_body_bytes, "body truncated");
                break;
            }
        }
        let html = String::from_utf8_lossy(&body);

        // Html is not Send, so parsing happens in one synchronous call
        // with no await while the document is alive
        let anchors = extract_anchors(&html, &final_url);
        tracing::debug!(%url, anchors = anchors.len(), "page fetched");

        Ok(FetchedPage {
            status: status.as_u16(),
            anchors,
        })
    }
}

// A missing Content-Type is given the benefit of the doubt
fn is_html_content_type(content_type: Option<&str>) -> bool {
    match content_type {
        None => true,
        Some(value) => {
            let mime = value
                .split(';')
                .next()
                .unwrap_or("")
                .trim()
                .to_ascii_lowercase();
            mime == "text/html" || mime == "application/xhtml+xml"
        }
    }
}

// Extracts every anchor from HTML content, in document order
//
// Parameters:
//   html: the HTML content to parse
//   page_url: the URL of the page (for resolving relative links)
//
// A <base href> in the document overrides page_url for resolution,
// the same way a browser does it.
pub fn extract_anchors(html: &str, page_url: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);

    // Our selectors are constant and known to be valid
    let anchor_selector = Selector::parse("a[href]").expect("valid anchor selector");
    let base_selector = Selector::parse("base[href]").expect("valid base selector");

    let page_base = Url::parse(page_url).ok();
    let base = document
        .select(&base_selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| match &page_base {
            Some(page) => page.join(href.trim()).ok(),
            None => Url::parse(href.trim()).ok(),
        })
        .or(page_base);

    document
        .select(&anchor_selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?.trim().to_string();
            let url = resolve_url(base.as_ref(), &href);
            let text = collapse_whitespace(&element.text().collect::<String>());
            Some(Anchor { href, url, text })
        })
        .collect()
}

// Resolves a possibly-relative href to an absolute URL
//
// Examples (base = "https://example.com/page"):
//   "/docs"              -> "https://example.com/docs"
//   "../other"           -> "https://example.com/other"
//   "https://other.com"  -> "https://other.com/"
//   "mailto:a@b.c"       -> "mailto:a@b.c" (the engine skips it later)
//   "http://[bad"        -> "http://[bad" (kept so it gets reported as invalid-url)
fn resolve_url(base: Option<&Url>, href: &str) -> String {
    if href.is_empty() {
        return String::new();
    }

    let resolved = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };

    match resolved {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
