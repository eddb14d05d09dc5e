//! Error types for the Extractor
//!
//! Pipeline failures are reported as [`Diagnostic`](salvage_domain::Diagnostic)
//! values, not errors. These variants cover misuse of the library itself.

use thiserror::Error;

/// Errors that can occur while setting up extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML deserialization error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Unknown built-in schema name
    #[error("Unknown schema: {0}")]
    UnknownSchema(String),
}
