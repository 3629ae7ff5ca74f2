// src/error.rs
//! Error taxonomy for the pipeline.
//!
//! Page-level errors ([`PageError`]) are recoverable: the crawl logs them and
//! moves on. Directory-level errors ([`CrawlError`]) end the crawl with no
//! partial records.

use std::path::PathBuf;

use thiserror::Error;

/// The documentation host could not be reached for one URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection refused, DNS failure, TLS failure, body read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Any non-2xx response.
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
}

/// The HTML did not have the shape the parsers expect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("section not found: {section}")]
    SectionNotFound { section: &'static str },

    #[error("attribute `{field}` could not be decoded: {reason}")]
    AttributeDecode { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum PageErrorKind {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid page url: {0}")]
    Url(#[from] url::ParseError),
}

/// A single rule page failed. Never fatal to the crawl.
#[derive(Debug, Error)]
#[error("{url}: {kind}")]
pub struct PageError {
    pub url: String,
    #[source]
    pub kind: PageErrorKind,
}

impl PageError {
    pub fn new(url: impl Into<String>, kind: impl Into<PageErrorKind>) -> Self {
        Self { url: url.into(), kind: kind.into() }
    }
}

/// The crawl could not start: no directory, no work.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid base url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("rule directory unreachable: {0}")]
    Directory(#[from] FetchError),

    #[error("rule directory malformed: {0}")]
    DirectoryParse(#[from] ParseError),

    #[error("crawl thread panicked")]
    Panicked,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache io at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache at {path} is not a valid rule list: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Crawl(#[from] CrawlError),
}
