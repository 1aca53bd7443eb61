// src/crawl/host.rs
// =============================================================================
// Decides whether a discovered link stays "inside" the site.
//
// Two URLs are on the same host when both parse and both have a non-empty
// host, compared case-insensitively. Anything that fails to parse is treated
// as external: it still gets probed and reported, it just never gets crawled.
// =============================================================================

use url::Url;

pub fn same_host(a: &str, b: &str) -> bool {
    match (host_of(a), host_of(b)) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(&b),
        _ => false,
    }
}

fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}
