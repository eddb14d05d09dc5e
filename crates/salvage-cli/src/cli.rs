//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Salvage - Extract schema-checked records from text-model responses.
#[derive(Debug, Parser)]
#[command(name = "salvage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.salvage/config.toml)
    #[arg(short, long, global = true, env = "SALVAGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (section names or reason codes only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract records from captured model responses
    Extract(ExtractArgs),

    /// Check an already-parsed JSON payload against a schema
    Validate(ValidateArgs),

    /// List built-in schemas, or show one in detail
    Schemas(SchemasArgs),
}

/// Where the schema comes from.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct SchemaArgs {
    /// Built-in schema name (see `salvage schemas`)
    #[arg(short, long)]
    pub schema: Option<String>,

    /// JSON file containing a schema descriptor
    #[arg(long)]
    pub schema_file: Option<PathBuf>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Files holding raw model responses; reads stdin when omitted or `-`
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Summary length budget in characters
    #[arg(short, long, env = "SALVAGE_SUMMARY_BUDGET")]
    pub budget: Option<usize>,

    /// Accept only well-formed JSON (no trailing-comma or comment repair)
    #[arg(long)]
    pub strict: bool,

    /// Print the raw model response alongside any diagnostic
    #[arg(long)]
    pub show_raw: bool,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// JSON payload file; reads stdin when omitted or `-`
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Also normalize and format the payload when it is valid
    #[arg(short, long)]
    pub normalize: bool,
}

/// Arguments for the schemas command.
#[derive(Debug, Parser)]
pub struct SchemasArgs {
    /// Show the fields of one schema
    pub name: Option<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from([
            "salvage",
            "extract",
            "--schema",
            "cold_email",
            "a.txt",
            "b.txt",
            "--show-raw",
        ]);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.schema.schema.as_deref(), Some("cold_email"));
                assert!(args.show_raw);
                assert!(!args.strict);
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_schema_source_required() {
        assert!(Cli::try_parse_from(["salvage", "extract", "a.txt"]).is_err());
    }

    #[test]
    fn test_schema_sources_exclusive() {
        let result = Cli::try_parse_from([
            "salvage",
            "validate",
            "--schema",
            "cold_email",
            "--schema-file",
            "s.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["salvage", "schemas", "--format", "json", "-v"]);
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Schemas(SchemasArgs { name: None })));
    }
}
