// src/lib.rs
//! Scraper and structured extractor for SwiftLint rule documentation.
//!
//! ```text
//! scrape::crawl ─┬─ core::net::Fetch          (one request at a time)
//!                ├─ specs::directory::parse   (rule index page)
//!                └─ specs::rule_page::parse   (one RuleRecord per page)
//! store          JSON cache of the whole Vec<RuleRecord>
//! highlight      styled runs for example snippets
//! ```

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod highlight;
pub mod log;
pub mod progress;
pub mod scrape;
pub mod specs;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use data::{AttributeField, DirectoryEntry, RuleAttributes, RuleRecord};
pub use error::{CrawlError, FetchError, PageError, ParseError, StoreError};
pub use scrape::{crawl, spawn, CancelToken, CrawlReport};
