//! Salvage Domain Layer
//!
//! Data model for recovering structured records from generative-model text.
//! This crate holds values only; the pipeline that produces them lives in
//! `salvage-extractor`.
//!
//! ## Key Concepts
//!
//! - **SchemaDescriptor**: declarative expected shape of one content type
//! - **Violation**: a field-level mismatch between payload and schema
//! - **ValidationResult**: `Valid` (possibly with recovered warnings) or `Invalid`
//! - **NormalizedRecord**: flattened sections, in schema order, ready to render
//! - **Diagnostic**: structured failure returned instead of an error being thrown

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod diagnostic;
pub mod record;
pub mod schema;
pub mod violation;

// Re-exports for convenience
pub use diagnostic::{Diagnostic, ReasonCode};
pub use record::{ContentUnit, NormalizedRecord, SummaryDetail};
pub use schema::{FieldKind, FieldRole, FieldSpec, ObjectSchema, SchemaDescriptor};
pub use violation::{ValidatedPayload, ValidationResult, Violation, ViolationKind};

/// A candidate JSON payload recovered from a model response
pub type ExtractedPayload = serde_json::Value;
