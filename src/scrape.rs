// src/scrape.rs
//! Sequential crawl: directory first, then every rule page, one at a time.
//!
//! ```text
//! Idle → FetchingDirectory → FetchingRules(i, n) → Done
//!                  ↘ Failed (no records)
//! ```
//! A failing page is logged and skipped; only the directory can fail the crawl.
//! Fetch `i + 1` is never issued before fetch `i` has returned.

use std::{
    sync::{ mpsc::{self, Receiver}, Arc, atomic::{ AtomicBool, Ordering } },
    thread::{self, JoinHandle},
};

use tracing::{debug, info, warn};
use url::Url;

use crate::{
    config::options::CrawlOptions,
    core::net::Fetch,
    data::{DirectoryEntry, RuleRecord},
    error::{CrawlError, PageError},
    progress::{ChannelProgress, CrawlEvent, Progress},
    specs,
};

/// Cooperative stop flag, checked between page fetches.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self { Self::default() }
    pub fn cancel(&self) { self.0.store(true, Ordering::Relaxed) }
    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageFailure {
    pub name: String,
    pub url: String,
    pub error: String,
}

/// Outcome of a crawl that got past the directory.
#[derive(Clone, Debug, Default)]
pub struct CrawlReport {
    /// Successfully parsed pages, in directory order.
    pub records: Vec<RuleRecord>,
    /// Number of entries on the directory page.
    pub total: usize,
    pub failures: Vec<PageFailure>,
    /// Stopped early by a [`CancelToken`].
    pub cancelled: bool,
}

impl CrawlReport {
    /// Entries that produced no record (failed, or never attempted after a cancel).
    pub fn skipped(&self) -> usize {
        self.total.saturating_sub(self.records.len())
    }
}

/// Crawl to completion on the current thread.
pub fn crawl<F: Fetch + ?Sized>(
    opts: &CrawlOptions,
    fetcher: &F,
    progress: Option<&mut dyn Progress>,
) -> Result<CrawlReport, CrawlError> {
    crawl_cancellable(opts, fetcher, &CancelToken::new(), progress)
}

pub fn crawl_cancellable<F: Fetch + ?Sized>(
    opts: &CrawlOptions,
    fetcher: &F,
    cancel: &CancelToken,
    mut progress: Option<&mut dyn Progress>,
) -> Result<CrawlReport, CrawlError> {
    let (base, entries) = match load_directory(opts, fetcher, progress.as_deref_mut()) {
        Ok(v) => v,
        Err(e) => {
            warn!("Crawl: directory failed: {e}");
            if let Some(p) = progress.as_deref_mut() {
                p.failed(&e.to_string());
            }
            return Err(e);
        }
    };

    let total = entries.len();
    info!(total, "Crawl: directory loaded");
    if let Some(p) = progress.as_deref_mut() {
        p.begin(total);
    }

    let mut report = CrawlReport { total, ..Default::default() };

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 && !opts.request_pause.is_zero() {
            thread::sleep(opts.request_pause); // be polite
        }
        if cancel.is_cancelled() {
            info!(done = i, total, "Crawl: cancelled");
            report.cancelled = true;
            break;
        }

        match fetch_page(&base, entry, fetcher) {
            Ok(rule) => {
                debug!(name = %entry.name, id = %rule.attributes.identifier, "Crawl: page ok");
                report.records.push(rule);
            }
            Err(e) => {
                warn!("Crawl: skipping {}: {}", entry.name, e);
                if let Some(p) = progress.as_deref_mut() {
                    p.page_failed(&e);
                }
                report.failures.push(PageFailure {
                    name: entry.name.clone(),
                    url: e.url.clone(),
                    error: e.kind.to_string(),
                });
            }
        }

        if let Some(p) = progress.as_deref_mut() {
            p.pages_progress(i + 1, total);
        }
    }

    info!(
        records = report.records.len(),
        skipped = report.skipped(),
        "Crawl: done"
    );
    if let Some(p) = progress.as_deref_mut() {
        p.finish(report.records.len(), total);
    }
    Ok(report)
}

/// Handle on a crawl running on its own thread.
pub struct CrawlHandle {
    /// Progress events; the channel closes when the crawl thread ends.
    pub events: Receiver<CrawlEvent>,
    cancel: CancelToken,
    handle: JoinHandle<Result<CrawlReport, CrawlError>>,
}

impl CrawlHandle {
    /// Ask the crawl to stop before its next page fetch.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the crawl to end.
    pub fn join(self) -> Result<CrawlReport, CrawlError> {
        self.handle.join().map_err(|_| CrawlError::Panicked)?
    }
}

/// Run the crawl on a background thread. The caller is never blocked;
/// it drains `events` on whatever thread it likes.
pub fn spawn<F>(opts: CrawlOptions, fetcher: F) -> CrawlHandle
where
    F: Fetch + Send + 'static,
{
    let (tx, events) = mpsc::channel();
    let cancel = CancelToken::new();
    let token = cancel.clone();

    let handle = thread::spawn(move || {
        let mut prog = ChannelProgress::new(tx);
        crawl_cancellable(&opts, &fetcher, &token, Some(&mut prog))
    });

    CrawlHandle { events, cancel, handle }
}

/* ---------- helpers ---------- */

/// The base always ends in `/` so joins stay under its path.
fn base_url(opts: &CrawlOptions) -> Result<Url, CrawlError> {
    let mut base = Url::parse(&opts.base_url).map_err(|source| CrawlError::InvalidUrl {
        url: opts.base_url.clone(),
        source,
    })?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

/// Directory hrefs are relative to the docs tree, leading `/` or not.
/// Absolute URLs pass through unchanged.
fn page_url(base: &Url, href: &str) -> Result<Url, url::ParseError> {
    match Url::parse(href) {
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            base.join(href.strip_prefix('/').unwrap_or(href))
        }
        other => other,
    }
}

fn load_directory<F: Fetch + ?Sized>(
    opts: &CrawlOptions,
    fetcher: &F,
    progress: Option<&mut (dyn Progress + '_)>,
) -> Result<(Url, Vec<DirectoryEntry>), CrawlError> {
    let base = base_url(opts)?;
    let url = base.join(&opts.directory_path).map_err(|source| CrawlError::InvalidUrl {
        url: opts.directory_path.clone(),
        source,
    })?;

    if let Some(p) = progress {
        p.directory_loading();
    }
    info!(url = %url, "Crawl: fetching directory");

    let body = fetcher.fetch(url.as_str())?;
    let entries = specs::directory::parse(&body)?;
    Ok((base, entries))
}

fn fetch_page<F: Fetch + ?Sized>(
    base: &Url,
    entry: &DirectoryEntry,
    fetcher: &F,
) -> Result<RuleRecord, PageError> {
    let url = page_url(base, &entry.relative_url)
        .map_err(|e| PageError::new(&entry.relative_url, e))?;
    let body = fetcher
        .fetch(url.as_str())
        .map_err(|e| PageError::new(url.as_str(), e))?;
    specs::rule_page::parse(&body).map_err(|e| PageError::new(url.as_str(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://realm.github.io/SwiftLint/").unwrap()
    }

    #[test]
    fn hrefs_stay_under_the_docs_path() {
        assert_eq!(page_url(&base(), "a.html").unwrap().as_str(), "https://realm.github.io/SwiftLint/a.html");
        assert_eq!(page_url(&base(), "/a.html").unwrap().as_str(), "https://realm.github.io/SwiftLint/a.html");
    }

    #[test]
    fn absolute_hrefs_pass_through() {
        let url = page_url(&base(), "https://other.test/x.html").unwrap();
        assert_eq!(url.as_str(), "https://other.test/x.html");
    }

    #[test]
    fn base_without_trailing_slash_is_treated_as_a_directory() {
        let opts = CrawlOptions::default().with_base_url("https://docs.example.test/lint");
        assert_eq!(base_url(&opts).unwrap().as_str(), "https://docs.example.test/lint/");
    }
}
