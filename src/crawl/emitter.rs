// src/crawl/emitter.rs
// =============================================================================
// How results leave the crawl worker.
//
// Whoever watches a run implements CrawlListener. Every method has an empty
// default, so a listener only overrides the streams it cares about.
//
// Streams:
// - broken links, as soon as they are probed
// - page visit records
// - counter snapshots (pages / links / broken) after every change
// - exactly one terminal event: completed, stopped or errored
//
// Listener calls are fire-and-forget. They run on the worker, so they must
// return quickly; ChannelListener just forwards into an unbounded channel.
// =============================================================================

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::model::{CrawlResult, CrawledPage, LinkResult};

/// Running totals for one run, pushed out as immutable snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub pages: usize,
    pub total_links: usize,
    pub broken_links: usize,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(CrawlResult),
    Stopped,
    Errored(String),
}

pub trait CrawlListener: Send + Sync {
    /// A link was probed and found broken.
    fn on_link_result(&self, _link: &LinkResult) {}
    fn on_page(&self, _page: &CrawledPage) {}
    fn on_counters(&self, _counters: Counters) {}
    fn on_complete(&self, _result: &CrawlResult) {}
    fn on_stopped(&self) {}
    fn on_error(&self, _message: &str) {}
}

/// Ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl CrawlListener for NoopListener {}

/// Everything a run reports, as one enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    BrokenLink(LinkResult),
    Page(CrawledPage),
    Counters(Counters),
    Completed(CrawlResult),
    Stopped,
    Errored(String),
}

impl CrawlEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CrawlEvent::Completed(_) | CrawlEvent::Stopped | CrawlEvent::Errored(_)
        )
    }
}

/// Forwards every callback into an unbounded channel.
///
/// Sending never blocks, and a dropped receiver is silently ignored.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    tx: mpsc::UnboundedSender<CrawlEvent>,
}

impl ChannelListener {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<CrawlEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: CrawlEvent) {
        let _ = self.tx.send(event);
    }
}

impl CrawlListener for ChannelListener {
    fn on_link_result(&self, link: &LinkResult) {
        self.send(CrawlEvent::BrokenLink(link.clone()));
    }

    fn on_page(&self, page: &CrawledPage) {
        self.send(CrawlEvent::Page(page.clone()));
    }

    fn on_counters(&self, counters: Counters) {
        self.send(CrawlEvent::Counters(counters));
    }

    fn on_complete(&self, result: &CrawlResult) {
        self.send(CrawlEvent::Completed(result.clone()));
    }

    fn on_stopped(&self) {
        self.send(CrawlEvent::Stopped);
    }

    fn on_error(&self, message: &str) {
        self.send(CrawlEvent::Errored(message.to_string()));
    }
}

// The engine's side of the listener: holds the listener for one run
#[derive(Clone)]
pub(crate) struct Emitter {
    listener: Arc<dyn CrawlListener>,
}

impl Emitter {
    pub(crate) fn new(listener: Arc<dyn CrawlListener>) -> Self {
        Self { listener }
    }

    pub(crate) fn broken_link(&self, link: &LinkResult) {
        self.listener.on_link_result(link);
    }

    pub(crate) fn page(&self, page: &CrawledPage) {
        self.listener.on_page(page);
    }

    pub(crate) fn counters(&self, counters: Counters) {
        self.listener.on_counters(counters);
    }

    // Emits the one terminal event matching the outcome
    pub(crate) fn finish(&self, outcome: &RunOutcome) {
        match outcome {
            RunOutcome::Completed(result) => self.listener.on_complete(result),
            RunOutcome::Stopped => self.listener.on_stopped(),
            RunOutcome::Errored(message) => self.listener.on_error(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_listener_forwards_terminal_event() {
        let (listener, mut rx) = ChannelListener::new();
        let emitter = Emitter::new(Arc::new(listener));

        emitter.counters(Counters {
            pages: 1,
            total_links: 2,
            broken_links: 0,
        });
        emitter.finish(&RunOutcome::Errored("boom".into()));

        assert_eq!(
            rx.try_recv().unwrap(),
            CrawlEvent::Counters(Counters {
                pages: 1,
                total_links: 2,
                broken_links: 0
            })
        );
        let last = rx.try_recv().unwrap();
        assert!(last.is_terminal());
        assert_eq!(last, CrawlEvent::Errored("boom".into()));
    }

    #[test]
    fn test_dropped_receiver_is_not_a_fault() {
        let (listener, rx) = ChannelListener::new();
        drop(rx);
        listener.on_stopped();
    }

    #[test]
    fn test_noop_listener() {
        let emitter = Emitter::new(Arc::new(NoopListener));
        emitter.finish(&RunOutcome::Stopped);
    }
}
