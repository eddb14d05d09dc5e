//! Salvage Extractor
//!
//! Turns free-form text-model responses into schema-checked records.
//!
//! # Overview
//!
//! Models asked for JSON answer with JSON wrapped in markdown fences, JSON
//! preceded by a friendly sentence, JSON with a trailing comma, or no JSON at
//! all. The Extractor locates the payload, parses it tolerantly, checks it
//! against a [`SchemaDescriptor`], and flattens it into display-ready
//! sections. Every input yields either a [`NormalizedRecord`] or a
//! [`Diagnostic`]; nothing panics and nothing is silently dropped.
//!
//! # Architecture
//!
//! ```text
//! raw text → unwrap → repair/parse → validate → normalize → truncate → record
//!                 ↘          ↘            ↘
//!                  Diagnostic (empty_input | no_json_found | parse_error | schema_violation)
//! ```
//!
//! # Example Usage
//!
//! ```
//! use salvage_extractor::{catalog, Extractor, ExtractorConfig};
//!
//! let raw = "Sure! Here you go:\n```json\n{\"headlines\": [\"Ship faster\", \"Sleep better\",]}\n```";
//!
//! let extractor = Extractor::new(ExtractorConfig::default());
//! let record = extractor.extract(raw, &catalog::pitch_headlines()).unwrap();
//! assert_eq!(record.list("headlines").unwrap(), ["Ship faster", "Sleep better"]);
//!
//! let diagnostic = extractor
//!     .extract("I'm sorry, I can't help with that.", &catalog::pitch_headlines())
//!     .unwrap_err();
//! assert_eq!(diagnostic.reason.code(), "no_json_found");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;

pub mod catalog;
pub mod diagnostics;
pub mod normalizer;
pub mod policy;
pub mod repair;
pub mod unwrap;
pub mod validator;


pub use config::{ExtractorConfig, DEFAULT_ELLIPSIS, DEFAULT_SUMMARY_BUDGET};
pub use error::ExtractorError;
pub use extractor::{extract, validate_only, Extractor};

pub use salvage_domain::{
    ContentUnit, Diagnostic, ExtractedPayload, FieldKind, FieldRole, FieldSpec, NormalizedRecord,
    ObjectSchema, ReasonCode, SchemaDescriptor, SummaryDetail, ValidatedPayload, ValidationResult,
    Violation, ViolationKind,
};
