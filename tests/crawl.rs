// tests/crawl.rs
//
// Orchestrator tests with an in-memory fetcher (no network).
//
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;

use ruledoc_scrape::config::consts::BASE_URL;
use ruledoc_scrape::config::options::CrawlOptions;
use ruledoc_scrape::core::Fetch;
use ruledoc_scrape::progress::{CrawlEvent, RecordingProgress};
use ruledoc_scrape::scrape::{self, CancelToken};
use ruledoc_scrape::{CrawlError, FetchError};

const BASE: &str = "https://docs.example.test/lint/";

fn opts() -> CrawlOptions {
    CrawlOptions::default()
        .with_base_url(BASE)
        .with_request_pause(Duration::ZERO)
}

fn rule_html(id: &str, name: &str) -> String {
    format!(
        r#"<html><body><div class="section-content">
            <h1>{name}</h1><p>About {name}.</p>
            <ul><li><strong>Identifier:</strong> {id}</li>
                <li><strong>Enabled by default:</strong> Enabled</li></ul>
            <h2>Non Triggering Examples</h2>
            <pre><code>ok</code></pre>
            <h2>Triggering Examples</h2>
            <pre><code>bad</code></pre>
        </div></body></html>"#
    )
}

fn directory_html(items: &[(&str, &str)]) -> String {
    let lis: String = items
        .iter()
        .map(|(name, href)| format!(r#"<li><a href="{href}">{name}</a></li>"#))
        .collect();
    format!(r#"<html><body><section class="section"><ul>{lis}</ul></section></body></html>"#)
}

/// Serves canned bodies by absolute URL; anything missing times out.
/// Records the order of requests.
#[derive(Default)]
struct StubFetcher {
    pages: HashMap<String, Result<String, u16>>,
    requests: RefCell<Vec<String>>,
}

impl StubFetcher {
    fn page(mut self, path: &str, body: String) -> Self {
        self.pages.insert(format!("{BASE}{}", path.trim_start_matches('/')), Ok(body));
        self
    }
    fn status(mut self, path: &str, status: u16) -> Self {
        self.pages.insert(format!("{BASE}{}", path.trim_start_matches('/')), Err(status));
        self
    }
}

impl Fetch for StubFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status { url: url.into(), status: *status }),
            None => Err(FetchError::Timeout { url: url.into() }),
        }
    }
}

fn two_rule_site() -> StubFetcher {
    StubFetcher::default()
        .page("rule-directory.html", directory_html(&[("Rule A", "a.html"), ("Rule B", "b.html")]))
        .page("a.html", rule_html("rule_a", "Rule A"))
}

#[test]
fn timed_out_page_is_skipped_and_progress_stays_accurate() {
    let fetcher = two_rule_site();
    let mut prog = RecordingProgress::default();

    let report = scrape::crawl(&opts(), &fetcher, Some(&mut prog)).unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].attributes.identifier, "rule_a");
    assert_eq!(report.total, 2);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].url, format!("{BASE}b.html"));

    let progress: Vec<_> = prog
        .events
        .iter()
        .filter(|e| matches!(e, CrawlEvent::PagesProgress { .. }))
        .cloned()
        .collect();
    assert_eq!(
        progress,
        vec![
            CrawlEvent::PagesProgress { completed: 0, total: 2 },
            CrawlEvent::PagesProgress { completed: 1, total: 2 },
            CrawlEvent::PagesProgress { completed: 2, total: 2 },
        ]
    );
    assert_eq!(prog.events.first(), Some(&CrawlEvent::DirectoryLoading));
    assert_eq!(prog.events.last(), Some(&CrawlEvent::Finished { records: 1, total: 2 }));
}

#[test]
fn pages_are_fetched_one_by_one_in_directory_order() {
    let fetcher = StubFetcher::default()
        .page(
            "rule-directory.html",
            directory_html(&[("C", "c.html"), ("A", "a.html"), ("B", "b.html")]),
        )
        .page("a.html", rule_html("a", "A"))
        .page("b.html", rule_html("b", "B"))
        .page("c.html", rule_html("c", "C"));

    let report = scrape::crawl(&opts(), &fetcher, None).unwrap();

    let ids: Vec<_> = report.records.iter().map(|r| r.attributes.identifier.as_str()).collect();
    assert_eq!(ids, ["c", "a", "b"]);
    assert_eq!(
        *fetcher.requests.borrow(),
        vec![
            format!("{BASE}rule-directory.html"),
            format!("{BASE}c.html"),
            format!("{BASE}a.html"),
            format!("{BASE}b.html"),
        ]
    );
}

#[test]
fn root_relative_hrefs_stay_under_the_docs_path() {
    // Default base; "/b.html" is never served and times out.
    let mut pages = HashMap::new();
    pages.insert(
        format!("{BASE_URL}rule-directory.html"),
        directory_html(&[("Rule A", "/a.html"), ("Rule B", "/b.html")]),
    );
    pages.insert(format!("{BASE_URL}a.html"), rule_html("rule_a", "Rule A"));
    let fetcher = SharedFetcher(Arc::new(pages));
    let mut prog = RecordingProgress::default();

    let opts = CrawlOptions::default().with_request_pause(Duration::ZERO);
    let report = scrape::crawl(&opts, &fetcher, Some(&mut prog)).unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].name, "Rule A");
    assert_eq!(report.failures[0].url, format!("{BASE_URL}b.html"));
    assert!(prog.events.contains(&CrawlEvent::PagesProgress { completed: 1, total: 2 }));
    assert!(prog.events.contains(&CrawlEvent::PagesProgress { completed: 2, total: 2 }));
}

#[test]
fn http_errors_and_malformed_pages_are_page_level() {
    let fetcher = StubFetcher::default()
        .page(
            "rule-directory.html",
            directory_html(&[("Gone", "gone.html"), ("Broken", "broken.html"), ("Ok", "ok.html")]),
        )
        .status("gone.html", 404)
        .page("broken.html", s("<html><body><p>no content div</p></body></html>"))
        .page("ok.html", rule_html("ok", "Ok"));

    let report = scrape::crawl(&opts(), &fetcher, None).unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.failures.len(), 2);
    assert!(report.failures[0].error.contains("404"));
    assert!(report.failures[1].error.contains("section not found"));
}

#[test]
fn unreachable_directory_fails_the_crawl() {
    let fetcher = StubFetcher::default();
    let mut prog = RecordingProgress::default();
    let err = scrape::crawl(&opts(), &fetcher, Some(&mut prog)).unwrap_err();

    assert!(matches!(err, CrawlError::Directory(FetchError::Timeout { .. })));
    assert_eq!(prog.events.first(), Some(&CrawlEvent::DirectoryLoading));
    assert!(matches!(prog.events.last(), Some(CrawlEvent::Failed { .. })));
    assert!(!prog.events.iter().any(|e| matches!(e, CrawlEvent::PagesProgress { .. })));
}

#[test]
fn malformed_directory_fails_the_crawl() {
    let fetcher = StubFetcher::default().page("rule-directory.html", s("<html><body></body></html>"));
    let err = scrape::crawl(&opts(), &fetcher, None).unwrap_err();
    assert!(matches!(err, CrawlError::DirectoryParse(_)));
}

#[test]
fn empty_directory_is_an_empty_success() {
    let fetcher = StubFetcher::default().page("rule-directory.html", directory_html(&[]));
    let report = scrape::crawl(&opts(), &fetcher, None).unwrap();
    assert!(report.records.is_empty());
    assert_eq!(report.total, 0);
}

#[test]
fn invalid_base_url_is_rejected() {
    let bad = opts().with_base_url("not a url");
    let err = scrape::crawl(&bad, &StubFetcher::default(), None).unwrap_err();
    assert!(matches!(err, CrawlError::InvalidUrl { .. }));
}

/// Cancels itself once it has served `cancel_after` rule pages.
struct CancellingFetcher {
    inner: StubFetcher,
    token: CancelToken,
    cancel_after: usize,
    served: Mutex<usize>,
}

impl Fetch for CancellingFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let body = self.inner.fetch(url)?;
        if !url.ends_with("rule-directory.html") {
            let mut served = self.served.lock().unwrap();
            *served += 1;
            if *served == self.cancel_after {
                self.token.cancel();
            }
        }
        Ok(body)
    }
}

#[test]
fn cancellation_keeps_what_was_fetched() {
    let token = CancelToken::new();
    let fetcher = CancellingFetcher {
        inner: StubFetcher::default()
            .page(
                "rule-directory.html",
                directory_html(&[("A", "a.html"), ("B", "b.html"), ("C", "c.html")]),
            )
            .page("a.html", rule_html("a", "A"))
            .page("b.html", rule_html("b", "B"))
            .page("c.html", rule_html("c", "C")),
        token: token.clone(),
        cancel_after: 2,
        served: Mutex::new(0),
    };

    let report = scrape::crawl_cancellable(&opts(), &fetcher, &token, None).unwrap();
    assert!(report.cancelled);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.skipped(), 1);
    assert_eq!(fetcher.inner.requests.borrow().len(), 3); // directory + two pages
}

/// Thread-safe variant for the background crawl.
struct SharedFetcher(Arc<HashMap<String, String>>);

impl Fetch for SharedFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.0
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Timeout { url: url.into() })
    }
}

#[test]
fn spawned_crawl_streams_events_then_joins() {
    let mut pages = HashMap::new();
    pages.insert(
        format!("{BASE}rule-directory.html"),
        directory_html(&[("Rule A", "a.html"), ("Rule B", "b.html")]),
    );
    pages.insert(format!("{BASE}a.html"), rule_html("rule_a", "Rule A"));
    pages.insert(format!("{BASE}b.html"), rule_html("rule_b", "Rule B"));

    let handle = scrape::spawn(opts(), SharedFetcher(Arc::new(pages)));
    let events: Vec<_> = handle.events.iter().collect();
    let report = handle.join().unwrap();

    assert_eq!(report.records.len(), 2);
    assert_eq!(
        events,
        vec![
            CrawlEvent::DirectoryLoading,
            CrawlEvent::PagesProgress { completed: 0, total: 2 },
            CrawlEvent::PagesProgress { completed: 1, total: 2 },
            CrawlEvent::PagesProgress { completed: 2, total: 2 },
            CrawlEvent::Finished { records: 2, total: 2 },
        ]
    );
}

fn s(text: &str) -> String {
    text.to_string()
}
