//! Structured failure descriptors

use crate::violation::Violation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a model response could not be turned into a record
///
/// A closed set: every pipeline failure maps onto exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Raw text was empty or whitespace-only
    EmptyInput,
    /// No bracketed JSON-like substring could be located
    NoJsonFound,
    /// A JSON-like substring failed to parse even after repair
    ParseError,
    /// Parsed payload failed top-level schema checks
    SchemaViolation,
}

impl ReasonCode {
    /// Stable snake_case code
    pub fn code(&self) -> &'static str {
        match self {
            ReasonCode::EmptyInput => "empty_input",
            ReasonCode::NoJsonFound => "no_json_found",
            ReasonCode::ParseError => "parse_error",
            ReasonCode::SchemaViolation => "schema_violation",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A failure report returned in place of a record
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{reason}: {message}")]
pub struct Diagnostic {
    /// Failure category
    pub reason: ReasonCode,

    /// Human-readable explanation
    pub message: String,

    /// The model response exactly as received
    pub raw_text: String,

    /// Violations, for `schema_violation`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,

    /// The candidate text handed to the parser, for `parse_error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempted: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with no violations
    pub fn new(reason: ReasonCode, message: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
            raw_text: raw_text.into(),
            violations: Vec::new(),
            attempted: None,
        }
    }

    /// Attach violations
    pub fn with_violations(mut self, violations: Vec<Violation>) -> Self {
        self.violations = violations;
        self
    }

    /// Attach the text the parser rejected
    pub fn with_attempted(mut self, text: impl Into<String>) -> Self {
        self.attempted = Some(text.into());
        self
    }

    /// The first `max_chars` characters of the raw text, with `...` if cut
    pub fn raw_excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.raw_text.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_reason_code() {
        let d = Diagnostic::new(ReasonCode::NoJsonFound, "no bracket found", "hello");
        assert_eq!(d.to_string(), "no_json_found: no bracket found");
    }

    #[test]
    fn test_raw_excerpt() {
        let d = Diagnostic::new(ReasonCode::ParseError, "bad", "héllo world");
        assert_eq!(d.raw_excerpt(5), "héllo...");
        assert_eq!(d.raw_excerpt(50), "héllo world");
    }

    #[test]
    fn test_serialization_skips_empty_violations() {
        let d = Diagnostic::new(ReasonCode::EmptyInput, "empty", "");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["reason"], "empty_input");
        assert!(json.get("violations").is_none());

        let d = d.with_violations(vec![Violation::missing_key("a", "string")]);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["violations"][0]["path"], "a");
        assert!(json.get("attempted").is_none());
    }

    #[test]
    fn test_attempted_round_trips() {
        let d = Diagnostic::new(ReasonCode::ParseError, "bad", "x {\"a\" 1} y").with_attempted("{\"a\" 1}");
        let json = serde_json::to_string(&d).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.attempted.as_deref(), Some("{\"a\" 1}"));
    }
}
