// src/crawl/engine.rs
// =============================================================================
// The traversal engine: crawls every page on the seed's host and probes
// every link it finds.
//
// How one run works:
// 1. Start with the seed in the frontier and in the visited set
// 2. Pop a page (front of the queue for BFS, top of the stack for DFS)
// 3. Fetch it and walk its anchors in markup order
// 4. Probe each anchor, record a LinkResult, push counters out
// 5. Same-host, healthy, never-seen targets become new frontier entries
// 6. Repeat until the frontier is empty or someone calls stop()
//
// The run lives on its own tokio task. Only that task touches the frontier,
// the visited set and the result list; the only thing shared with the caller
// is the stop flag, which is polled before each page and before each probe.
// =============================================================================

use chrono::Utc;
use futures::FutureExt;
use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

use super::emitter::{Counters, CrawlListener, Emitter, RunOutcome};
use super::frontier::{Frontier, TraversalMode};
use super::host::same_host;
use crate::checker::{
    build_client, HttpPageFetcher, HttpProber, LinkProbe, LinkStatus, PageFetch,
};
use crate::config::CrawlerConfig;
use crate::error::{CrawlError, FetchError};
use crate::model::{CrawlResult, CrawledPage, LinkResult, PAGE_ERROR_TEXT, PAGE_EXCEPTION_TEXT};

/// Cooperative cancellation flag shared between the caller and the worker.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Runs crawls, one at a time.
///
/// Every anchor is probed with HEAD before anything else happens to it. A
/// same-host target is only crawled when that probe comes back healthy, so a
/// page whose server rejects HEAD (405, say) is reported as a broken link and
/// its own links are never visited.
pub struct Crawler<P = HttpProber, F = HttpPageFetcher> {
    prober: Arc<P>,
    fetcher: Arc<F>,
    probe_delay: Duration,
    stop: StopSignal,
    active: Arc<AtomicBool>,
}

impl Crawler {
    /// Builds a crawler that talks HTTP, sharing one client between probes and page fetches.
    pub fn new(config: &CrawlerConfig) -> Result<Self, CrawlError> {
        let client = build_client(config)?;
        Ok(Self::with_parts(
            Arc::new(HttpProber::new(client.clone())),
            Arc::new(HttpPageFetcher::new(client, config.max_body_bytes)),
            config.probe_delay,
        ))
    }
}

impl<P, F> Crawler<P, F>
where
    P: LinkProbe + 'static,
    F: PageFetch + 'static,
{
    pub fn with_parts(prober: Arc<P>, fetcher: Arc<F>, probe_delay: Duration) -> Self {
        Self {
            prober,
            fetcher,
            probe_delay,
            stop: StopSignal::default(),
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Starts a run on a new tokio task.
    ///
    /// The seed must already carry a scheme; it is written out in canonical
    /// form (`http://host` becomes `http://host/`) before the crawl. An unknown `mode` does not fail
    /// here: it ends the run with an `Errored` event. The only synchronous
    /// error is [`CrawlError::AlreadyRunning`].
    ///
    /// Must be called from inside a tokio runtime.
    pub fn start(
        &self,
        seed: impl Into<String>,
        mode: &str,
        listener: Arc<dyn CrawlListener>,
    ) -> Result<JoinHandle<RunOutcome>, CrawlError> {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CrawlError::AlreadyRunning);
        }
        self.stop.reset();

        let run = Run {
            prober: Arc::clone(&self.prober),
            fetcher: Arc::clone(&self.fetcher),
            probe_delay: self.probe_delay,
            stop: self.stop.clone(),
            emitter: Emitter::new(listener),
        };
        let active = Arc::clone(&self.active);
        let seed = seed.into();
        let mode = mode.to_string();

        Ok(tokio::spawn(async move {
            let outcome = match AssertUnwindSafe(run.execute(seed, &mode))
                .catch_unwind()
                .await
            {
                Ok(outcome) => outcome,
                Err(panic) => {
                    let message = format!("unexpected internal fault: {}", panic_message(&*panic));
                    tracing::error!(%message, "crawl aborted");
                    RunOutcome::Errored(message)
                }
            };

            // Listeners see the terminal event while is_running() still says true
            run.emitter.finish(&outcome);
            active.store(false, Ordering::SeqCst);
            outcome
        }))
    }

    /// Asks the active run to stop. Does nothing when no run is active.
    pub fn stop(&self) {
        if self.is_running() {
            tracing::info!("stop requested");
            self.stop.request();
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }
}

// Everything one run needs, moved onto the worker task
struct Run<P, F> {
    prober: Arc<P>,
    fetcher: Arc<F>,
    probe_delay: Duration,
    stop: StopSignal,
    emitter: Emitter,
}

impl<P: LinkProbe, F: PageFetch> Run<P, F> {
    async fn execute(&self, seed: String, mode: &str) -> RunOutcome {
        let mode = match mode.parse::<TraversalMode>() {
            Ok(mode) => mode,
            Err(e) => {
                tracing::error!(error = %e, "crawl not started");
                return RunOutcome::Errored(e.to_string());
            }
        };

        // Canonical form, so the seed dedupes against links that point back at it
        let seed = Url::parse(&seed).map(|url| url.to_string()).unwrap_or(seed);

        tracing::info!(%seed, %mode, "crawl started");
        match self.traverse(seed, mode).await {
            Some(result) => {
                tracing::info!(
                    pages = result.page_count,
                    links = result.total_link_count,
                    broken = result.broken_link_count,
                    "crawl completed"
                );
                RunOutcome::Completed(result)
            }
            None => {
                tracing::info!("crawl stopped");
                RunOutcome::Stopped
            }
        }
    }

    // Returns None when the run was stopped before the frontier ran dry
    async fn traverse(&self, seed: String, mode: TraversalMode) -> Option<CrawlResult> {
        let mut visited: HashSet<String> = HashSet::from([seed.clone()]);
        let mut frontier = Frontier::new(mode, seed.clone());
        let mut all_links: Vec<LinkResult> = Vec::new();
        let mut counters = Counters::default();

        while !self.stop.is_requested() {
            let Some(page_url) = frontier.pop() else {
                break;
            };
            let visited_at = Utc::now();
            tracing::debug!(url = %page_url, pending = frontier.len(), "visiting page");

            let page = match self.fetcher.fetch(&page_url).await {
                Ok(page) => page,
                Err(err) => {
                    tracing::warn!(url = %page_url, error = %err, "page fetch failed");
                    let (status, anchor_text) = match err {
                        FetchError::Status(code) => (LinkStatus::from_code(code), PAGE_ERROR_TEXT),
                        FetchError::Transport(tag) => (LinkStatus::failed(tag), PAGE_EXCEPTION_TEXT),
                    };
                    let link = LinkResult {
                        target: page_url.clone(),
                        status: status.clone(),
                        source_page: page_url.clone(),
                        anchor_text: anchor_text.to_string(),
                    };

                    counters.total_links += 1;
                    counters.pages += 1;
                    if link.is_broken() {
                        counters.broken_links += 1;
                        self.emitter.broken_link(&link);
                    }
                    all_links.push(link);

                    self.emitter.page(&CrawledPage {
                        url: page_url,
                        status,
                        link_count: 0,
                        visited_at,
                    });
                    self.emitter.counters(counters);
                    continue;
                }
            };

            let mut children = Vec::new();
            let mut link_count = 0;

            for anchor in page.anchors {
                if self.stop.is_requested() {
                    break;
                }
                if !is_checkable_link(&anchor.url) {
                    continue;
                }

                let status = self.prober.probe(&anchor.url).await;
                if !self.probe_delay.is_zero() {
                    tokio::time::sleep(self.probe_delay).await;
                }

                let link = LinkResult {
                    target: anchor.url,
                    status,
                    source_page: page_url.clone(),
                    anchor_text: anchor.text,
                };

                // A same-host page that already probed broken is reported, not crawled
                if same_host(&seed, &link.target)
                    && visited.insert(link.target.clone())
                    && !link.is_broken()
                {
                    children.push(link.target.clone());
                }

                link_count += 1;
                counters.total_links += 1;
                if link.is_broken() {
                    counters.broken_links += 1;
                    self.emitter.broken_link(&link);
                }
                all_links.push(link);
                self.emitter.counters(counters);
            }

            frontier.push_children(children);

            counters.pages += 1;
            self.emitter.page(&CrawledPage {
                url: page_url,
                status: LinkStatus::from_code(page.status),
                link_count,
                visited_at,
            });
            self.emitter.counters(counters);
        }

        if self.stop.is_requested() {
            return None;
        }

        Some(CrawlResult {
            all_links,
            page_count: counters.pages,
            total_link_count: counters.total_links,
            broken_link_count: counters.broken_links,
        })
    }
}

// Empty targets and non-http(s) schemes (mailto:, tel:, javascript:, ...) are skipped.
// Targets that don't parse at all are kept so the prober reports them as invalid-url.
fn is_checkable_link(target: &str) -> bool {
    if target.is_empty() {
        return false;
    }
    match Url::parse(target) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => true,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
