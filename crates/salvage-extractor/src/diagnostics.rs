//! Failure reporting
//!
//! Every failure path in the pipeline goes through one of these constructors
//! so that callers see a uniform [`Diagnostic`] and operators see a uniform
//! log line.

use crate::repair::ParseFailure;
use salvage_domain::{Diagnostic, ReasonCode, Violation};
use tracing::warn;

/// Chars of raw text included in log lines
const LOG_EXCERPT_CHARS: usize = 120;

fn report(diagnostic: Diagnostic) -> Diagnostic {
    warn!(
        reason = %diagnostic.reason,
        violations = diagnostic.violations.len(),
        raw = %diagnostic.raw_excerpt(LOG_EXCERPT_CHARS),
        "Could not extract record: {}",
        diagnostic.message
    );
    diagnostic
}

/// Raw text was empty or whitespace-only
pub fn empty_input(raw: &str) -> Diagnostic {
    report(Diagnostic::new(
        ReasonCode::EmptyInput,
        "model response was empty",
        raw,
    ))
}

/// No JSON-like substring was found
pub fn no_json_found(raw: &str) -> Diagnostic {
    report(Diagnostic::new(
        ReasonCode::NoJsonFound,
        "no JSON object or array found in model response",
        raw,
    ))
}

/// The candidate failed to parse after repair
pub fn parse_error(raw: &str, failure: &ParseFailure) -> Diagnostic {
    report(Diagnostic::new(
        ReasonCode::ParseError,
        format!("invalid JSON: {}", failure.error),
        raw,
    )
    .with_attempted(failure.text.as_str()))
}

/// The payload failed top-level schema checks
pub fn schema_violation(raw: &str, schema: &str, violations: Vec<Violation>) -> Diagnostic {
    let message = match violations.first() {
        Some(first) if violations.len() > 1 => format!(
            "response does not match schema '{}': {} (and {} more)",
            schema,
            first,
            violations.len() - 1
        ),
        Some(first) => format!("response does not match schema '{}': {}", schema, first),
        None => format!("response does not match schema '{}'", schema),
    };
    report(Diagnostic::new(ReasonCode::SchemaViolation, message, raw).with_violations(violations))
}
