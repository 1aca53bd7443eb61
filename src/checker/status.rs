// src/checker/status.rs
// =============================================================================
// This module defines what a link check can end up as.
//
// Two families of outcomes:
// - The server answered: we keep the numeric code plus a reason phrase
//   (looked up in a fixed table of 4xx/5xx codes)
// - The request never completed: we keep a FailureTag that says why
//   (timeout, DNS failure, refused connection, ...)
//
// The table is a plain `static` slice sorted by code. It is built into the
// binary, never mutated, and can be read from any thread without locking.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

// Reason phrases for the standard client and server error codes.
// Must stay sorted by code (we binary search it).
static STATUS_REASONS: &[(u16, &str)] = &[
    // 4xx - Client Errors
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (402, "Payment Required"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (405, "Method Not Allowed"),
    (406, "Not Acceptable"),
    (407, "Proxy Authentication Required"),
    (408, "Request Timeout"),
    (409, "Conflict"),
    (410, "Gone"),
    (411, "Length Required"),
    (412, "Precondition Failed"),
    (413, "Content Too Large"),
    (414, "URI Too Long"),
    (415, "Unsupported Media Type"),
    (416, "Range Not Satisfiable"),
    (417, "Expectation Failed"),
    (418, "I'm a teapot"),
    (421, "Misdirected Request"),
    (422, "Unprocessable Content"),
    (423, "Locked"),
    (424, "Failed Dependency"),
    (425, "Too Early"),
    (426, "Upgrade Required"),
    (428, "Precondition Required"),
    (429, "Too Many Requests"),
    (431, "Request Header Fields Too Large"),
    (451, "Unavailable For Legal Reasons"),
    // 5xx - Server Errors
    (500, "Internal Server Error"),
    (501, "Not Implemented"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
    (504, "Gateway Timeout"),
    (505, "HTTP Version Not Supported"),
    (506, "Variant Also Negotiates"),
    (507, "Insufficient Storage"),
    (508, "Loop Detected"),
    (510, "Not Extended"),
    (511, "Network Authentication Required"),
];

/// Looks up the reason phrase for an error status code.
///
/// Returns `None` for anything not in the table, including every 1xx/2xx/3xx code.
pub fn reason_phrase(code: u16) -> Option<&'static str> {
    STATUS_REASONS
        .binary_search_by_key(&code, |(c, _)| *c)
        .ok()
        .map(|index| STATUS_REASONS[index].1)
}

/// Why a request never produced an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureTag {
    /// The request did not finish within the configured timeout
    Timeout,
    /// The host name could not be resolved
    DnsFailure,
    /// Nothing was listening on the target port
    ConnectionRefused,
    /// The URL could not be parsed, or is not http(s)
    InvalidUrl,
    /// TLS handshake, redirect loop or a malformed response
    ProtocolError,
    /// Anything we could not put in one of the buckets above
    UnknownError,
}

impl FailureTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureTag::Timeout => "timeout",
            FailureTag::DnsFailure => "dns-failure",
            FailureTag::ConnectionRefused => "connection-refused",
            FailureTag::InvalidUrl => "invalid-url",
            FailureTag::ProtocolError => "protocol-error",
            FailureTag::UnknownError => "unknown-error",
        }
    }
}

impl fmt::Display for FailureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of checking one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkStatus {
    /// The server answered with this status code
    Http {
        code: u16,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// The request failed before any status arrived
    Failed { tag: FailureTag },
}

impl LinkStatus {
    // Builds an Http status, filling the reason phrase from the table
    pub fn from_code(code: u16) -> Self {
        LinkStatus::Http {
            code,
            reason: reason_phrase(code).map(str::to_string),
        }
    }

    pub fn failed(tag: FailureTag) -> Self {
        LinkStatus::Failed { tag }
    }

    /// A link is broken when the server answered >= 400 or never answered at all.
    pub fn is_broken(&self) -> bool {
        match self {
            LinkStatus::Http { code, .. } => *code >= 400,
            LinkStatus::Failed { .. } => true,
        }
    }
}

// Renders as "404 Not Found", "299" (no table entry) or "FAILED (timeout)"
impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Http {
                code,
                reason: Some(reason),
            } => write!(f, "{} {}", code, reason),
            LinkStatus::Http { code, reason: None } => write!(f, "{}", code),
            LinkStatus::Failed { tag } => write!(f, "FAILED ({})", tag),
        }
    }
}
