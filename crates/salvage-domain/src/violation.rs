//! Schema violations and the validation result

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Category of a schema violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required key is absent
    MissingKey,
    /// A value is present but of the wrong kind (or out of range)
    WrongType,
    /// A string that must carry content is blank
    EmptyValue,
}

impl ViolationKind {
    /// Stable snake_case code
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::MissingKey => "missing_key",
            ViolationKind::WrongType => "wrong_type",
            ViolationKind::EmptyValue => "empty_value",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One field-level mismatch between a payload and its schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Field path, e.g. `opportunity_report_card.neglected_areas[1].value_score`
    pub path: String,

    /// Violation category
    pub kind: ViolationKind,

    /// What the schema expected
    pub expected: String,

    /// What the payload contained
    pub actual: String,

    /// True when the offending list element was dropped and the record kept
    #[serde(default)]
    pub dropped: bool,
}

impl Violation {
    /// A required key is missing at `path`
    pub fn missing_key(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ViolationKind::MissingKey,
            expected: expected.into(),
            actual: "absent".to_string(),
            dropped: false,
        }
    }

    /// The value at `path` has the wrong kind
    pub fn wrong_type(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            kind: ViolationKind::WrongType,
            expected: expected.into(),
            actual: actual.into(),
            dropped: false,
        }
    }

    /// The string at `path` is blank
    pub fn empty_value(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ViolationKind::EmptyValue,
            expected: "non-empty string".to_string(),
            actual: "blank string".to_string(),
            dropped: false,
        }
    }

    /// Mark this violation as recovered by dropping its element
    pub fn into_dropped(mut self) -> Self {
        self.dropped = true;
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at '{}': expected {}, found {}",
            self.kind, self.path, self.expected, self.actual
        )?;
        if self.dropped {
            write!(f, " (element dropped)")?;
        }
        Ok(())
    }
}

/// A payload that satisfied its schema, possibly after best-effort drops
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayload {
    /// Top-level object with malformed list elements removed
    pub value: Map<String, Value>,

    /// Violations recovered locally (dropped elements, discarded optional fields)
    pub warnings: Vec<Violation>,
}

/// Outcome of validating a payload against a schema
///
/// Never partially valid: either the record is usable (`Valid`, possibly with
/// warnings) or it is rejected with a non-empty list of violations.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// The payload satisfies the schema
    Valid(ValidatedPayload),
    /// The payload is rejected; always non-empty, in discovery order
    Invalid(Vec<Violation>),
}

impl ValidationResult {
    /// True for the `Valid` variant
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// All recorded violations, recovered or fatal
    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationResult::Valid(payload) => &payload.warnings,
            ValidationResult::Invalid(violations) => violations,
        }
    }

    /// Convert into a `Result`, keeping violations as the error
    pub fn into_result(self) -> Result<ValidatedPayload, Vec<Violation>> {
        match self {
            ValidationResult::Valid(payload) => Ok(payload),
            ValidationResult::Invalid(violations) => Err(violations),
        }
    }
}
