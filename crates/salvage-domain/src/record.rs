//! Normalized records consumed by presentation code

use crate::violation::Violation;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A flattened `{summary, details}` unit, e.g. one card or one list entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryDetail {
    /// Optional heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Short text, subject to the summary budget
    pub summary: String,

    /// Supporting bullet points in declared field order
    #[serde(default)]
    pub details: Vec<String>,

    /// Optional numeric rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SummaryDetail {
    /// Create a unit with just a summary
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Append a detail line
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }
}

/// Flattened content of one logical section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ContentUnit {
    /// Narrative text, never truncated
    Text(String),
    /// Short text, capped by the summary budget
    Summary(String),
    /// Ordered list of strings
    List(Vec<String>),
    /// A single flattened object
    Card(SummaryDetail),
    /// A list of flattened objects
    Cards(Vec<SummaryDetail>),
}

/// Canonical output of the extraction pipeline
///
/// Sections follow the schema's declared order, not the payload's key order.
/// The caller owns the record outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Name of the schema the record was validated against
    pub schema: String,

    /// Section name to content, in schema order
    pub sections: IndexMap<String, ContentUnit>,

    /// Violations recovered during validation
    #[serde(default)]
    pub warnings: Vec<Violation>,
}

impl NormalizedRecord {
    /// Create an empty record for the named schema
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            sections: IndexMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Look up a section
    pub fn get(&self, section: &str) -> Option<&ContentUnit> {
        self.sections.get(section)
    }

    /// Text of a `Text` or `Summary` section
    pub fn text(&self, section: &str) -> Option<&str> {
        match self.sections.get(section)? {
            ContentUnit::Text(s) | ContentUnit::Summary(s) => Some(s),
            _ => None,
        }
    }

    /// Items of a `List` section
    pub fn list(&self, section: &str) -> Option<&[String]> {
        match self.sections.get(section)? {
            ContentUnit::List(items) => Some(items),
            _ => None,
        }
    }

    /// The unit of a `Card` section
    pub fn card(&self, section: &str) -> Option<&SummaryDetail> {
        match self.sections.get(section)? {
            ContentUnit::Card(card) => Some(card),
            _ => None,
        }
    }

    /// Units of a `Cards` section
    pub fn cards(&self, section: &str) -> Option<&[SummaryDetail]> {
        match self.sections.get(section)? {
            ContentUnit::Cards(cards) => Some(cards),
            _ => None,
        }
    }

    /// Section names in order
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// True if no violations were recovered
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
