// src/specs/directory.rs
//! Scraping *spec* for the rule directory.
//!
//! `section.section` → first `ul` → every `li` → first `a`.
//! Each anchor contributes one [`DirectoryEntry`]; hrefs are returned as written
//! on the page and resolved later by the crawler.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;

use crate::config::consts::DIRECTORY_SECTION;
use crate::core::html::{selector, text_of};
use crate::data::DirectoryEntry;
use crate::error::ParseError;

static SECTION: LazyLock<Selector> = LazyLock::new(|| selector(DIRECTORY_SECTION));
static LIST: LazyLock<Selector> = LazyLock::new(|| selector("ul"));
static ITEM: LazyLock<Selector> = LazyLock::new(|| selector("li"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));

pub fn parse(doc: &str) -> Result<Vec<DirectoryEntry>, ParseError> {
    let doc = Html::parse_document(doc);

    let mut sections = doc.select(&SECTION).peekable();
    if sections.peek().is_none() {
        return Err(ParseError::SectionNotFound { section: DIRECTORY_SECTION });
    }
    let list = sections
        .flat_map(|section| section.select(&LIST))
        .next()
        .ok_or(ParseError::SectionNotFound { section: "section.section ul" })?;

    let mut out = Vec::new();
    for item in list.select(&ITEM) {
        let Some(link) = item.select(&LINK).next() else { continue };
        let href = link.value().attr("href").unwrap_or("").trim();
        if href.is_empty() {
            debug!(name = %text_of(link), "directory entry without href");
            continue;
        }
        out.push(DirectoryEntry { name: text_of(link), relative_url: s!(href) });
    }
    Ok(out)
}
