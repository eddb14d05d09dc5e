//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::diagnostics;
use crate::error::ExtractorError;
use crate::normalizer::normalize;
use crate::policy::TruncationPolicy;
use crate::repair::{parse_tolerant, RepairOptions};
use crate::unwrap::{unwrap_response, UnwrapSource};
use crate::validator::validate;
use salvage_domain::{
    Diagnostic, ExtractedPayload, NormalizedRecord, SchemaDescriptor, ValidationResult, Violation,
};
use tracing::{debug, info};

/// Runs raw model text through unwrap → parse → validate → normalize → format
///
/// Stateless between calls: one `Extractor` (and any number of schemas) may
/// be shared across threads.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
    policy: TruncationPolicy,
    repair: RepairOptions,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

impl Extractor {
    /// Create a new Extractor
    pub fn new(config: ExtractorConfig) -> Self {
        let policy = TruncationPolicy::from(&config);
        let repair = RepairOptions {
            trailing_commas: config.repair_trailing_commas,
            line_comments: config.strip_line_comments,
        };
        Self {
            config,
            policy,
            repair,
        }
    }

    /// Create a new Extractor, rejecting invalid configuration
    pub fn try_new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract a record from a raw model response
    ///
    /// Never panics and never returns an operational error: any input yields
    /// either a record or a [`Diagnostic`].
    pub fn extract(
        &self,
        raw: &str,
        schema: &SchemaDescriptor,
    ) -> Result<NormalizedRecord, Diagnostic> {
        let unwrapped = unwrap_response(raw);
        match unwrapped.source {
            UnwrapSource::Empty => return Err(diagnostics::empty_input(raw)),
            UnwrapSource::Verbatim => return Err(diagnostics::no_json_found(raw)),
            UnwrapSource::Fenced if !unwrapped.text.contains(['{', '[']) => {
                return Err(diagnostics::no_json_found(raw))
            }
            _ if unwrapped.is_empty() => return Err(diagnostics::no_json_found(raw)),
            source => debug!(
                "Candidate payload located ({:?}), {} of {} bytes",
                source,
                unwrapped.text.len(),
                raw.len()
            ),
        }

        let parsed = parse_tolerant(unwrapped.text, &self.repair)
            .map_err(|failure| diagnostics::parse_error(raw, &failure))?;
        if !parsed.repairs.is_empty() {
            debug!("Payload parsed after repairs: {:?}", parsed.repairs);
        }

        self.finish(&parsed.value, schema)
            .map_err(|violations| diagnostics::schema_violation(raw, schema.name(), violations))
    }

    /// Extract records from several independent responses, in order
    pub fn extract_batch<S: AsRef<str>>(
        &self,
        raws: &[S],
        schema: &SchemaDescriptor,
    ) -> Vec<Result<NormalizedRecord, Diagnostic>> {
        raws.iter().map(|raw| self.extract(raw.as_ref(), schema)).collect()
    }

    /// Validate, normalize and format an already-parsed payload
    ///
    /// On failure the diagnostic's raw text is the payload re-serialized.
    pub fn extract_value(
        &self,
        payload: &ExtractedPayload,
        schema: &SchemaDescriptor,
    ) -> Result<NormalizedRecord, Diagnostic> {
        self.finish(payload, schema).map_err(|violations| {
            diagnostics::schema_violation(&payload.to_string(), schema.name(), violations)
        })
    }

    /// Validate an already-parsed payload without normalizing it
    pub fn validate_only(
        &self,
        payload: &ExtractedPayload,
        schema: &SchemaDescriptor,
    ) -> ValidationResult {
        validate(payload, schema)
    }

    fn finish(
        &self,
        payload: &ExtractedPayload,
        schema: &SchemaDescriptor,
    ) -> Result<NormalizedRecord, Vec<Violation>> {
        let validated = validate(payload, schema).into_result()?;
        let mut record = normalize(&validated, schema);
        self.policy.apply(&mut record);
        info!(
            "Extracted '{}' record: {} section(s), {} warning(s)",
            schema.name(),
            record.sections.len(),
            record.warnings.len()
        );
        Ok(record)
    }
}

/// Run the full pipeline with default settings and the given summary budget
///
/// # Examples
///
/// ```
/// use salvage_domain::{FieldSpec, SchemaDescriptor};
///
/// let schema = SchemaDescriptor::new("simple", vec![FieldSpec::text("a")]);
/// let record = salvage_extractor::extract("```json\n{\"a\": \"x\"}\n```", &schema, 250).unwrap();
/// assert_eq!(record.text("a"), Some("x"));
///
/// let diagnostic = salvage_extractor::extract("", &schema, 250).unwrap_err();
/// assert_eq!(diagnostic.reason.code(), "empty_input");
/// ```
pub fn extract(
    raw: &str,
    schema: &SchemaDescriptor,
    summary_budget: usize,
) -> Result<NormalizedRecord, Diagnostic> {
    Extractor::new(ExtractorConfig::default().with_summary_budget(summary_budget)).extract(raw, schema)
}

/// Validate an already-parsed payload against `schema`
pub fn validate_only(payload: &ExtractedPayload, schema: &SchemaDescriptor) -> ValidationResult {
    validate(payload, schema)
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog;
    use proptest::prelude::*;

    proptest! {
        /// Property: extraction returns a value for arbitrary text
        #[test]
        fn test_extract_never_panics(raw in "\\PC{0,200}") {
            let extractor = Extractor::default();
            let _ = extractor.extract(&raw, &catalog::anti_persona_report());
        }

        /// Property: truncated-JSON-looking input yields a diagnostic, not a panic
        #[test]
        fn test_truncated_json_is_diagnosed(cut in 0usize..200) {
            let full = r#"{"subject": "Hello there", "body": "A short message body."}"#;
            let cut = cut.min(full.chars().count() - 1);
            let raw: String = full.chars().take(cut).collect();
            let result = Extractor::default().extract(&raw, &catalog::cold_email());
            prop_assert!(result.is_err());
        }

        /// Property: brackets and fences in any arrangement never panic
        #[test]
        fn test_bracket_soup_never_panics(raw in "[\\[\\]{}`,:\" a-z0-9/\n]{0,120}") {
            let _ = Extractor::default().extract(&raw, &catalog::pitch_headlines());
        }
    }
}
