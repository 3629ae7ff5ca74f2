// src/progress.rs
use std::sync::mpsc::Sender;

use crate::error::PageError;

/// Lightweight progress reporting used by the crawl.
/// Frontends (CLI, a GUI, a service) implement this to surface status to users.
pub trait Progress {
    /// About to fetch the directory page.
    fn directory_loading(&mut self) {}

    /// Directory parsed; `total` rule pages will be attempted.
    fn begin(&mut self, _total: usize) {}

    /// One page attempt finished, successful or not.
    fn pages_progress(&mut self, _completed: usize, _total: usize) {}

    /// A page was skipped. Called before the matching `pages_progress`.
    fn page_failed(&mut self, _err: &PageError) {}

    /// Called at the end of a crawl that got past the directory.
    fn finish(&mut self, _records: usize, _total: usize) {}

    /// Directory-level failure; no `finish` follows.
    fn failed(&mut self, _msg: &str) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// What a channel-backed consumer receives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CrawlEvent {
    DirectoryLoading,
    PagesProgress { completed: usize, total: usize },
    PageFailed { url: String, error: String },
    Finished { records: usize, total: usize },
    Failed { error: String },
}

/// Forwards every callback as a [`CrawlEvent`].
/// A dropped receiver is not an error; the crawl just keeps going unobserved.
pub struct ChannelProgress {
    tx: Sender<CrawlEvent>,
}

impl ChannelProgress {
    pub fn new(tx: Sender<CrawlEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, ev: CrawlEvent) {
        let _ = self.tx.send(ev);
    }
}

impl Progress for ChannelProgress {
    fn directory_loading(&mut self) {
        self.send(CrawlEvent::DirectoryLoading);
    }
    fn begin(&mut self, total: usize) {
        self.send(CrawlEvent::PagesProgress { completed: 0, total });
    }
    fn pages_progress(&mut self, completed: usize, total: usize) {
        self.send(CrawlEvent::PagesProgress { completed, total });
    }
    fn page_failed(&mut self, err: &PageError) {
        self.send(CrawlEvent::PageFailed { url: err.url.clone(), error: err.kind.to_string() });
    }
    fn finish(&mut self, records: usize, total: usize) {
        self.send(CrawlEvent::Finished { records, total });
    }
    fn failed(&mut self, msg: &str) {
        self.send(CrawlEvent::Failed { error: s!(msg) });
    }
}

/// Collects events in memory. Handy for tests and for callers that only
/// want to inspect the history after the fact.
#[derive(Default, Debug)]
pub struct RecordingProgress {
    pub events: Vec<CrawlEvent>,
}

impl Progress for RecordingProgress {
    fn directory_loading(&mut self) {
        self.events.push(CrawlEvent::DirectoryLoading);
    }
    fn begin(&mut self, total: usize) {
        self.events.push(CrawlEvent::PagesProgress { completed: 0, total });
    }
    fn pages_progress(&mut self, completed: usize, total: usize) {
        self.events.push(CrawlEvent::PagesProgress { completed, total });
    }
    fn page_failed(&mut self, err: &PageError) {
        self.events.push(CrawlEvent::PageFailed { url: err.url.clone(), error: err.kind.to_string() });
    }
    fn finish(&mut self, records: usize, total: usize) {
        self.events.push(CrawlEvent::Finished { records, total });
    }
    fn failed(&mut self, msg: &str) {
        self.events.push(CrawlEvent::Failed { error: s!(msg) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn channel_forwards_in_order() {
        let (tx, rx) = mpsc::channel();
        let mut p = ChannelProgress::new(tx);
        p.directory_loading();
        p.begin(2);
        p.pages_progress(1, 2);
        drop(p);
        let got: Vec<_> = rx.iter().collect();
        assert_eq!(
            got,
            vec![
                CrawlEvent::DirectoryLoading,
                CrawlEvent::PagesProgress { completed: 0, total: 2 },
                CrawlEvent::PagesProgress { completed: 1, total: 2 },
            ]
        );
    }

    #[test]
    fn channel_survives_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut p = ChannelProgress::new(tx);
        p.pages_progress(1, 1);
        p.finish(1, 1);
    }
}
