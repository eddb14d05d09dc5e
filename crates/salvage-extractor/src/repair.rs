//! Tolerant JSON parsing with a bounded repair pass
//!
//! Strict parse first. On failure, apply a fixed, ordered list of textual
//! repairs to one working copy, re-parsing strictly after each. There is no
//! search over repair combinations: at most one parse per repair.
//!
//! Both repairs skip over string literals, so a `, }` or `//` inside a
//! quoted value is left alone.

use regex::{Captures, Regex};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;

/// A string literal (group 1) or a `//` comment
static LINE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)("(?:[^"\\]|\\.)*")|//[^\n]*"#).expect("valid line comment regex")
});

/// A textual repair applied before a successful parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repair {
    /// Commas directly before `}` or `]` were removed
    TrailingCommas,
    /// `//` comments were stripped to end of line
    LineComments,
}

impl Repair {
    fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Repair::TrailingCommas => strip_trailing_commas(text),
            Repair::LineComments => strip_line_comments(text),
        }
    }
}

/// Drop commas outside strings that are followed only by whitespace and a
/// closing bracket
fn strip_trailing_commas(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b',' if closes_next(&bytes[i + 1..]) => {
                let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
                buf.push_str(&text[copied..i]);
                copied = i + 1;
            }
            _ => {}
        }
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&text[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

fn closes_next(rest: &[u8]) -> bool {
    rest.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| matches!(b, b'}' | b']'))
}

fn strip_line_comments(text: &str) -> Cow<'_, str> {
    let has_comment = LINE_COMMENT_RE
        .captures_iter(text)
        .any(|caps| caps.get(1).is_none());
    if !has_comment {
        return Cow::Borrowed(text);
    }
    LINE_COMMENT_RE.replace_all(text, |caps: &Captures<'_>| {
        caps.get(1).map_or_else(String::new, |literal| literal.as_str().to_string())
    })
}

/// Which repairs may be attempted, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairOptions {
    /// Enable [`Repair::TrailingCommas`]
    pub trailing_commas: bool,
    /// Enable [`Repair::LineComments`]
    pub line_comments: bool,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            trailing_commas: true,
            line_comments: true,
        }
    }
}

impl RepairOptions {
    /// No repairs: strict parsing only
    pub fn none() -> Self {
        Self {
            trailing_commas: false,
            line_comments: false,
        }
    }

    fn sequence(&self) -> impl Iterator<Item = Repair> {
        [
            (self.trailing_commas, Repair::TrailingCommas),
            (self.line_comments, Repair::LineComments),
        ]
        .into_iter()
        .filter_map(|(enabled, repair)| enabled.then_some(repair))
    }
}

/// A successfully parsed payload
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPayload {
    /// The parsed object or array
    pub value: Value,
    /// Repairs applied before the successful parse, in order
    pub repairs: Vec<Repair>,
}

/// A payload that could not be parsed
#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    /// Error from the initial strict parse
    pub error: String,
    /// The text that was attempted, before any repair
    pub text: String,
}

/// Parse `text` as a JSON object or array, repairing common malformations
///
/// # Examples
///
/// ```
/// use salvage_extractor::repair::{parse_tolerant, Repair, RepairOptions};
///
/// let parsed = parse_tolerant(r#"{"a": "x",}"#, &RepairOptions::default()).unwrap();
/// assert_eq!(parsed.value["a"], "x");
/// assert_eq!(parsed.repairs, vec![Repair::TrailingCommas]);
/// ```
pub fn parse_tolerant(text: &str, options: &RepairOptions) -> Result<ParsedPayload, ParseFailure> {
    let original_error = match parse_container(text) {
        Ok(value) => {
            return Ok(ParsedPayload {
                value,
                repairs: Vec::new(),
            })
        }
        Err(e) => e,
    };

    let mut working = text.to_string();
    let mut applied = Vec::new();
    for repair in options.sequence() {
        let repaired = repair.apply(&working);
        if let Cow::Owned(changed) = repaired {
            working = changed;
            applied.push(repair);
            debug!("Applied {:?} repair, retrying parse", repair);
            if let Ok(value) = parse_container(&working) {
                return Ok(ParsedPayload {
                    value,
                    repairs: applied,
                });
            }
        }
    }

    Err(ParseFailure {
        error: original_error,
        text: text.to_string(),
    })
}

fn parse_container(text: &str) -> Result<Value, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(format!(
            "expected a JSON object or array, found {}",
            json_kind(&other)
        )),
    }
}

/// Short name of a JSON value's kind, for messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
