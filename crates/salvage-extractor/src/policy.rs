//! Summary truncation policy
//!
//! Only summaries are capped: `ContentUnit::Summary` sections and the
//! `summary` of every card. Narrative text and detail lists are left alone.
//! Lengths are counted in chars, so a cut never splits a code point.

use crate::config::{ExtractorConfig, DEFAULT_ELLIPSIS, DEFAULT_SUMMARY_BUDGET};
use salvage_domain::{ContentUnit, NormalizedRecord, SummaryDetail};

/// Length budget and marker applied to summaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncationPolicy {
    /// Maximum length in chars, marker included
    pub budget: usize,
    /// Marker that ends a truncated summary
    pub ellipsis: String,
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_BUDGET)
    }
}

impl From<&ExtractorConfig> for TruncationPolicy {
    fn from(config: &ExtractorConfig) -> Self {
        Self {
            budget: config.summary_budget,
            ellipsis: config.ellipsis.clone(),
        }
    }
}

impl TruncationPolicy {
    /// Policy with the default `...` marker
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }

    /// Truncate a single string under this policy
    pub fn truncate(&self, text: &str) -> String {
        truncate(text, self.budget, &self.ellipsis)
    }

    /// Apply the policy to every summary in `record`
    ///
    /// Idempotent: a compliant record is left unchanged.
    pub fn apply(&self, record: &mut NormalizedRecord) {
        for unit in record.sections.values_mut() {
            match unit {
                ContentUnit::Summary(text) => self.cap(text),
                ContentUnit::Card(card) => self.cap_card(card),
                ContentUnit::Cards(cards) => cards.iter_mut().for_each(|c| self.cap_card(c)),
                ContentUnit::Text(_) | ContentUnit::List(_) => {}
            }
        }
    }

    fn cap_card(&self, card: &mut SummaryDetail) {
        self.cap(&mut card.summary);
    }

    fn cap(&self, text: &mut String) {
        if text.chars().count() > self.budget {
            *text = self.truncate(text);
        }
    }
}

/// Apply `policy` to every summary in `record`
pub fn apply(record: &mut NormalizedRecord, policy: &TruncationPolicy) {
    policy.apply(record);
}

/// Cap `text` at `budget` chars, ending with `ellipsis` when cut
///
/// The result never exceeds `budget` chars. If the budget cannot hold the
/// marker, the marker itself is cut to fit.
///
/// # Examples
///
/// ```
/// use salvage_extractor::policy::truncate;
///
/// assert_eq!(truncate("short", 10, "..."), "short");
/// assert_eq!(truncate("a long summary", 10, "..."), "a long ...");
/// ```
pub fn truncate(text: &str, budget: usize, ellipsis: &str) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let marker_len = ellipsis.chars().count();
    if budget <= marker_len {
        return ellipsis.chars().take(budget).collect();
    }
    let mut out: String = text.chars().take(budget - marker_len).collect();
    out.push_str(ellipsis);
    out
}
