// src/core/html.rs
// DOM helpers over `scraper`, tuned for the documentation site's templates.

use scraper::node::Node;
use scraper::{ElementRef, Selector};

use super::sanitize::normalize_ws;

/// Parse a CSS selector literal. Meant for `LazyLock` statics only.
#[allow(clippy::expect_used)]
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("hardcoded selector is valid")
}

/// Whitespace-normalized text of an element and all its descendants.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Text of the first descendant matching `sel`, or empty.
pub fn first_text(el: ElementRef<'_>, sel: &Selector) -> String {
    el.select(sel).next().map(text_of).unwrap_or_default()
}

/// Direct child elements only, in document order. Text and comment nodes are skipped.
pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children().filter_map(ElementRef::wrap)
}

/// First text node that is a direct child of `el` and not blank.
/// Text inside child elements (e.g. a `<strong>` label) is not considered.
pub fn own_text(el: ElementRef<'_>) -> Option<String> {
    el.children()
        .filter_map(|n| match n.value() {
            Node::Text(t) => Some(normalize_ws(t)),
            _ => None,
        })
        .find(|t| !t.is_empty())
}

pub fn tag_name<'a>(el: ElementRef<'a>) -> &'a str {
    el.value().name()
}
