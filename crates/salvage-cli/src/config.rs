//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use salvage_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Pipeline settings
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".salvage").join("config.toml"))
    }

    /// Load configuration from `explicit`, or the default path.
    ///
    /// A missing default file yields the default configuration; a missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and validate configuration from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.extractor.validate()?;
        Ok(config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.extractor.summary_budget, 250);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[settings]\nformat = \"json\"\n\n[extractor]\nsummary_budget = 120").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.extractor.summary_budget, 120);
        assert_eq!(config.extractor.ellipsis, "...");
    }

    #[test]
    fn test_invalid_extractor_section_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[extractor]\nsummary_budget = 1").unwrap();
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(CliError::Extractor(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(dir.path().join("absent.toml").as_path()));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
