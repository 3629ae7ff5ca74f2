// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific parsing for the documentation site. Each spec knows *where
//! the ground truth lives in one page's HTML* and turns it into typed data.
//!
//! ## What lives here
//! - **Pure HTML parsing**: every function takes the page body as `&str` and
//!   returns data or a [`ParseError`](crate::error::ParseError). No networking.
//! - **Selector choice** for each template (`section.section` on the directory,
//!   `div.section-content` on rule pages).
//! - **Typed shaping**: attribute labels become [`AttributeField`](crate::data::AttributeField)s
//!   with their declared coercion; example blocks are bucketed by position.
//!
//! ## What does **not** live here
//! - Fetching, throttling, progress: see `scrape`.
//! - Caching: see `store`.
//! - Rendering example code: see `highlight`.
//!
//! ## Typical call chain
//! ```text
//! scrape::crawl → Fetch::fetch(directory) → specs::directory::parse
//!              ↘ for each entry: Fetch::fetch(page) → specs::rule_page::parse
//! ```
//!
//! ## Testing notes
//! Both specs are pure functions: same HTML in, same value out. They are tested
//! offline against fixtures in `tests/fixtures/`.
pub mod directory;
pub mod rule_page;
