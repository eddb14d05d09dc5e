//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};

/// Default summary budget in characters
pub const DEFAULT_SUMMARY_BUDGET: usize = 250;

/// Default marker appended to truncated summaries
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Configuration for the Extractor
///
/// # Examples
///
/// ```
/// use salvage_extractor::ExtractorConfig;
///
/// let config = ExtractorConfig::default();
/// assert_eq!(config.summary_budget, 250);
/// assert_eq!(config.ellipsis, "...");
/// assert!(config.validate().is_ok());
///
/// let config = ExtractorConfig::default().with_summary_budget(120);
/// assert_eq!(config.summary_budget, 120);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum summary length in characters, ellipsis included
    /// Default: 250
    #[serde(default = "default_summary_budget")]
    pub summary_budget: usize,

    /// Marker appended when a summary is truncated
    /// Default: "..."
    #[serde(default = "default_ellipsis")]
    pub ellipsis: String,

    /// Remove commas directly before `}` or `]` when strict parsing fails
    /// Default: true
    #[serde(default = "default_true")]
    pub repair_trailing_commas: bool,

    /// Strip `//` line comments when strict parsing fails
    /// Default: true
    #[serde(default = "default_true")]
    pub strip_line_comments: bool,
}

fn default_summary_budget() -> usize {
    DEFAULT_SUMMARY_BUDGET
}

fn default_ellipsis() -> String {
    DEFAULT_ELLIPSIS.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ExtractorConfig {
    /// 250-character summaries, `...` marker, both repairs enabled
    fn default() -> Self {
        Self {
            summary_budget: DEFAULT_SUMMARY_BUDGET,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            repair_trailing_commas: true,
            strip_line_comments: true,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: no textual repair, only well-formed JSON is accepted
    pub fn strict() -> Self {
        Self {
            repair_trailing_commas: false,
            strip_line_comments: false,
            ..Self::default()
        }
    }

    /// Override the summary budget
    pub fn with_summary_budget(mut self, budget: usize) -> Self {
        self.summary_budget = budget;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.ellipsis.is_empty() {
            return Err(ExtractorError::Config("ellipsis must not be empty".to_string()));
        }
        let marker_len = self.ellipsis.chars().count();
        if self.summary_budget <= marker_len {
            return Err(ExtractorError::Config(format!(
                "summary_budget ({}) must exceed the ellipsis length ({})",
                self.summary_budget, marker_len
            )));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
