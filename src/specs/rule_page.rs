// src/specs/rule_page.rs
//! Scraping *spec* for a single rule page.
//!
//! Template (inside `div.section-content`):
//! ```text
//! <h1>Name</h1>
//! <p>One paragraph of description.</p>
//! <ul><li><strong>Identifier:</strong> some_rule</li> ...</ul>
//! <h2>Non Triggering Examples</h2>      <- the fourth child, skipped
//! <pre>...</pre> <pre>...</pre>
//! <h2>Triggering Examples</h2>
//! <pre>...</pre>
//! ```
//!
//! Only a missing content container is fatal. A missing heading, paragraph or
//! attribute list falls back to defaults; zero `<pre>` blocks is fine.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use crate::config::consts::{EXAMPLES_OFFSET, RULE_CONTENT};
use crate::core::html::{child_elements, first_text, own_text, selector, tag_name, text_of};
use crate::core::sanitize::{clean_label, label_to_key};
use crate::data::{AttributeField, RuleAttributes, RuleRecord};
use crate::error::ParseError;

static CONTENT: LazyLock<Selector> = LazyLock::new(|| selector(RULE_CONTENT));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static LIST: LazyLock<Selector> = LazyLock::new(|| selector("ul"));
static ITEM: LazyLock<Selector> = LazyLock::new(|| selector("li"));
static LABEL: LazyLock<Selector> = LazyLock::new(|| selector("strong, b"));

pub fn parse(doc: &str) -> Result<RuleRecord, ParseError> {
    let doc = Html::parse_document(doc);
    let content = doc
        .select(&CONTENT)
        .next()
        .ok_or(ParseError::SectionNotFound { section: RULE_CONTENT })?;

    let name = first_text(content, &TITLE);
    let info = first_text(content, &PARAGRAPH);
    let attributes = parse_attributes(content)?;
    let (non_triggering_examples, triggering_examples) = partition_examples(content);

    Ok(RuleRecord {
        name,
        info,
        attributes,
        non_triggering_examples,
        triggering_examples,
    })
}

/* ---------- attributes ---------- */

fn parse_attributes(content: ElementRef<'_>) -> Result<RuleAttributes, ParseError> {
    let Some(list) = content.select(&LIST).next() else {
        return Ok(RuleAttributes::default());
    };

    let mut builder = AttributesBuilder::default();
    for item in list.select(&ITEM) {
        let label = item.select(&LABEL).next().map(text_of).unwrap_or_default();
        let key = label_to_key(&clean_label(&label));
        let value = own_text(item).unwrap_or_default();

        match key.parse::<AttributeField>() {
            Ok(field) => builder.set(field, value),
            Err(()) => trace!(%key, "ignoring unknown attribute"),
        }
    }
    builder.finish()
}

/// Typed accumulator for the fixed attribute schema.
/// Unset fields keep their zero value; a field given twice keeps the last value.
#[derive(Default)]
struct AttributesBuilder {
    attrs: RuleAttributes,
    seen: Vec<AttributeField>,
}

impl AttributesBuilder {
    fn set(&mut self, field: AttributeField, raw: String) {
        if self.seen.contains(&field) {
            debug!(field = field.key(), value = %raw, "repeated attribute, last one wins");
        } else {
            self.seen.push(field);
        }

        let flag = field.truthy().map(|t| raw == t);
        let a = &mut self.attrs;
        match field {
            AttributeField::Identifier => a.identifier = raw,
            AttributeField::EnabledByDefault => a.enabled_by_default = flag.unwrap_or(false),
            AttributeField::SupportsAutocorrection => a.supports_autocorrection = flag.unwrap_or(false),
            AttributeField::Kind => a.kind = raw,
            AttributeField::AnalyzerRule => a.analyzer_rule = flag.unwrap_or(false),
            AttributeField::MinimumSwiftCompilerVersion => a.minimum_swift_compiler_version = raw,
            AttributeField::DefaultConfiguration => a.default_configuration = raw,
        }
    }

    fn finish(self) -> Result<RuleAttributes, ParseError> {
        if self.attrs.identifier.is_empty() {
            return Err(ParseError::AttributeDecode {
                field: AttributeField::Identifier.key(),
                reason: s!("missing or empty"),
            });
        }
        Ok(self.attrs)
    }
}

/* ---------- examples ---------- */

#[derive(Clone, Copy, PartialEq, Eq)]
enum ExampleSection {
    BeforeTriggerHeading,
    AfterTriggerHeading,
}

/// Walk the content's child elements past the fixed preamble.
/// The first `<h2>` switches to triggering for good; `<pre>` blocks land in
/// the current bucket as inner HTML.
fn partition_examples(content: ElementRef<'_>) -> (Vec<String>, Vec<String>) {
    let mut non_triggering = Vec::new();
    let mut triggering = Vec::new();
    let mut section = ExampleSection::BeforeTriggerHeading;

    for node in child_elements(content).skip(EXAMPLES_OFFSET) {
        match tag_name(node) {
            "h2" => section = ExampleSection::AfterTriggerHeading,
            "pre" => match section {
                ExampleSection::BeforeTriggerHeading => non_triggering.push(node.inner_html()),
                ExampleSection::AfterTriggerHeading => triggering.push(node.inner_html()),
            },
            _ => {}
        }
    }
    (non_triggering, triggering)
}
