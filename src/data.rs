// src/data.rs
//
// Canonical rule data, as scraped and as cached.
//
// - RuleRecord / RuleAttributes: serialized with camelCase keys; the cache file
//   is a JSON array of RuleRecord and must stay readable by older consumers.
// - AttributeField: the fixed attribute schema, one variant per key.
// - DirectoryEntry: one link on the directory page. Only lives during a crawl.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    pub name: String,
    pub info: String,
    pub attributes: RuleAttributes,
    pub non_triggering_examples: Vec<String>,
    pub triggering_examples: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleAttributes {
    pub identifier: String,
    pub enabled_by_default: bool,
    pub supports_autocorrection: bool,
    pub kind: String,
    pub analyzer_rule: bool,
    pub minimum_swift_compiler_version: String,
    pub default_configuration: String,
}

/// One recognised attribute key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeField {
    Identifier,
    EnabledByDefault,
    SupportsAutocorrection,
    Kind,
    AnalyzerRule,
    MinimumSwiftCompilerVersion,
    DefaultConfiguration,
}

impl AttributeField {
    pub const ALL: [AttributeField; 7] = [
        AttributeField::Identifier,
        AttributeField::EnabledByDefault,
        AttributeField::SupportsAutocorrection,
        AttributeField::Kind,
        AttributeField::AnalyzerRule,
        AttributeField::MinimumSwiftCompilerVersion,
        AttributeField::DefaultConfiguration,
    ];

    /// camelCase key, as it appears in the cache.
    pub fn key(self) -> &'static str {
        match self {
            AttributeField::Identifier => "identifier",
            AttributeField::EnabledByDefault => "enabledByDefault",
            AttributeField::SupportsAutocorrection => "supportsAutocorrection",
            AttributeField::Kind => "kind",
            AttributeField::AnalyzerRule => "analyzerRule",
            AttributeField::MinimumSwiftCompilerVersion => "minimumSwiftCompilerVersion",
            AttributeField::DefaultConfiguration => "defaultConfiguration",
        }
    }

    /// Human label, as the documentation site prints it.
    pub fn label(self) -> &'static str {
        match self {
            AttributeField::Identifier => "Identifier",
            AttributeField::EnabledByDefault => "Enabled by default",
            AttributeField::SupportsAutocorrection => "Supports autocorrection",
            AttributeField::Kind => "Kind",
            AttributeField::AnalyzerRule => "Analyzer rule",
            AttributeField::MinimumSwiftCompilerVersion => "Minimum Swift compiler version",
            AttributeField::DefaultConfiguration => "Default configuration",
        }
    }

    /// The raw string that decodes to `true`, for boolean fields.
    pub fn truthy(self) -> Option<&'static str> {
        match self {
            AttributeField::EnabledByDefault => Some("Enabled"),
            AttributeField::SupportsAutocorrection | AttributeField::AnalyzerRule => Some("Yes"),
            _ => None,
        }
    }
}

impl FromStr for AttributeField {
    type Err = ();

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        AttributeField::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or(())
    }
}

impl RuleAttributes {
    /// Display value of one field (`true`/`false` for booleans).
    pub fn display_value(&self, field: AttributeField) -> String {
        match field {
            AttributeField::Identifier => self.identifier.clone(),
            AttributeField::EnabledByDefault => self.enabled_by_default.to_string(),
            AttributeField::SupportsAutocorrection => self.supports_autocorrection.to_string(),
            AttributeField::Kind => self.kind.clone(),
            AttributeField::AnalyzerRule => self.analyzer_rule.to_string(),
            AttributeField::MinimumSwiftCompilerVersion => self.minimum_swift_compiler_version.clone(),
            AttributeField::DefaultConfiguration => self.default_configuration.clone(),
        }
    }
}

/// One `(name, href)` pair from the directory page. The href is not resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub relative_url: String,
}

/// Split into (enabled-by-default, disabled) keeping input order.
pub fn partition_by_enabled(records: &[RuleRecord]) -> (Vec<&RuleRecord>, Vec<&RuleRecord>) {
    records.iter().partition(|r| r.attributes.enabled_by_default)
}

/// Exact identifier match first, then case-insensitive name match.
pub fn find_rule<'a>(records: &'a [RuleRecord], query: &str) -> Option<&'a RuleRecord> {
    let query = query.trim();
    records
        .iter()
        .find(|r| r.attributes.identifier == query)
        .or_else(|| records.iter().find(|r| r.name.eq_ignore_ascii_case(query)))
}
