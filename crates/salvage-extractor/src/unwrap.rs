//! Locate the JSON payload inside a raw model response
//!
//! Models wrap structured output in markdown fences, precede it with chatter
//! ("Sure! Here you go:") or follow it with commentary. This module cuts the
//! response down to the substring most likely to be a JSON object or array,
//! without parsing anything.

const FENCE: &str = "```";

/// How the candidate text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnwrapSource {
    /// Input was empty or whitespace-only
    Empty,
    /// One outer markdown fence pair was stripped
    Fenced,
    /// Cut to the outermost `{...}` or `[...]` span
    Bracketed,
    /// No bracket found; the trimmed input is returned unchanged
    Verbatim,
}

/// Candidate payload text borrowed from the raw response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unwrapped<'a> {
    /// Candidate JSON text
    pub text: &'a str,
    /// How `text` was located
    pub source: UnwrapSource,
}

impl<'a> Unwrapped<'a> {
    fn new(text: &'a str, source: UnwrapSource) -> Self {
        Self { text, source }
    }

    /// True if there is nothing to parse
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Return the substring of `response` most likely to be a JSON value
///
/// 1. Trim surrounding whitespace.
/// 2. If the text both starts and ends with a fence, strip exactly that one
///    pair (and a language tag such as `json` after the opening fence).
/// 3. Otherwise cut to the span from the first `{`/`[` to the last matching
///    `}`/`]`, preferring whichever opener comes first.
/// 4. If no span exists, return the trimmed text unchanged.
pub fn unwrap_response(response: &str) -> Unwrapped<'_> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Unwrapped::new("", UnwrapSource::Empty);
    }

    if let Some(inner) = strip_fence(trimmed) {
        return Unwrapped::new(inner, UnwrapSource::Fenced);
    }

    match bracket_span(trimmed) {
        Some(span) => Unwrapped::new(span, UnwrapSource::Bracketed),
        None => Unwrapped::new(trimmed, UnwrapSource::Verbatim),
    }
}

/// Wrap `payload` in a JSON-tagged fence, the exact inverse of fence stripping
pub fn fence_wrap(payload: &str) -> String {
    format!("{}json\n{}\n{}", FENCE, payload, FENCE)
}

fn strip_fence(text: &str) -> Option<&str> {
    if text.len() < FENCE.len() * 2 || !text.starts_with(FENCE) || !text.ends_with(FENCE) {
        return None;
    }
    let inner = &text[FENCE.len()..text.len() - FENCE.len()];

    // Info string: "json", "JSON", "json5", ...
    let tag_len = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '+'))
        .unwrap_or(inner.len());
    Some(inner[tag_len..].trim())
}

fn bracket_span(text: &str) -> Option<&str> {
    let object = span_between(text, '{', '}');
    let array = span_between(text, '[', ']');

    let (start, end) = match (object, array) {
        (Some(o), Some(a)) => {
            if o.0 <= a.0 {
                o
            } else {
                a
            }
        }
        (Some(o), None) => o,
        (None, Some(a)) => a,
        (None, None) => return None,
    };
    Some(&text[start..=end])
}

fn span_between(text: &str, open: char, close: char) -> Option<(usize, usize)> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_passes_through() {
        let json = r#"{"key": "value"}"#;
        let out = unwrap_response(json);
        assert_eq!(out.text, json);
        assert_eq!(out.source, UnwrapSource::Bracketed);
    }

    #[test]
    fn test_json_tagged_fence() {
        let out = unwrap_response("```json\n{\"a\": \"x\"}\n```");
        assert_eq!(out.text, r#"{"a": "x"}"#);
        assert_eq!(out.source, UnwrapSource::Fenced);
    }

    #[test]
    fn test_untagged_fence() {
        let out = unwrap_response("```\n[1, 2, 3]\n```");
        assert_eq!(out.text, "[1, 2, 3]");
        assert_eq!(out.source, UnwrapSource::Fenced);
    }

    #[test]
    fn test_uppercase_tag_without_newline() {
        let out = unwrap_response("```JSON{\"a\": 1}```");
        assert_eq!(out.text, r#"{"a": 1}"#);
    }

    #[test]
    fn test_surrounding_whitespace_before_fence() {
        let out = unwrap_response("  \n```json\n{}\n```\n\n");
        assert_eq!(out.text, "{}");
        assert_eq!(out.source, UnwrapSource::Fenced);
    }

    #[test]
    fn test_prose_around_object() {
        let out = unwrap_response(r#"Sure! Here you go: {"summary": "ok"} Hope that helps!"#);
        assert_eq!(out.text, r#"{"summary": "ok"}"#);
        assert_eq!(out.source, UnwrapSource::Bracketed);
    }

    #[test]
    fn test_fence_followed_by_commentary_falls_back_to_brackets() {
        let out = unwrap_response("```json\n{\"a\": 1}\n```\nLet me know if you need more.");
        assert_eq!(out.text, r#"{"a": 1}"#);
        assert_eq!(out.source, UnwrapSource::Bracketed);
    }

    #[test]
    fn test_leftmost_opener_wins() {
        let out = unwrap_response(r#"Result: [{"a": 1}, {"a": 2}] done"#);
        assert_eq!(out.text, r#"[{"a": 1}, {"a": 2}]"#);

        let out = unwrap_response(r#"Result: {"items": [1, 2]} done"#);
        assert_eq!(out.text, r#"{"items": [1, 2]}"#);
    }

    #[test]
    fn test_unclosed_leftmost_opener_uses_other_kind() {
        let out = unwrap_response(r#"[note {"a": 1}"#);
        assert_eq!(out.text, r#"{"a": 1}"#);
    }

    #[test]
    fn test_no_bracket_returns_trimmed_text() {
        let out = unwrap_response("  I cannot help with that.  ");
        assert_eq!(out.text, "I cannot help with that.");
        assert_eq!(out.source, UnwrapSource::Verbatim);
    }

    #[test]
    fn test_reversed_brackets_are_not_a_span() {
        let out = unwrap_response("} nothing here {");
        assert_eq!(out.source, UnwrapSource::Verbatim);
    }

    #[test]
    fn test_empty_input() {
        for input in ["", "   ", "\n\t"] {
            let out = unwrap_response(input);
            assert!(out.is_empty());
            assert_eq!(out.source, UnwrapSource::Empty);
        }
    }

    #[test]
    fn test_bare_fences() {
        let out = unwrap_response("``````");
        assert_eq!(out.source, UnwrapSource::Fenced);
        assert!(out.is_empty());

        // Too short to be an opening and a closing fence
        let out = unwrap_response("````");
        assert_eq!(out.source, UnwrapSource::Verbatim);
    }

    #[test]
    fn test_nested_fence_only_outer_stripped() {
        let out = unwrap_response("```\n```json\n{}\n```\n```");
        assert_eq!(out.text, "```json\n{}\n```");
    }

    #[test]
    fn test_multibyte_prose() {
        let out = unwrap_response("Voilà — {\"é\": \"ü\"} ✨");
        assert_eq!(out.text, "{\"é\": \"ü\"}");
    }
}
