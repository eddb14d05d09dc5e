//! Integration tests for salvage-cli
//!
//! These tests drive the commands through the library surface with captured
//! model responses written to temporary files.

use clap::Parser;
use salvage_cli::commands::{execute_extract, execute_schemas, execute_validate};
use salvage_cli::config::OutputFormat;
use salvage_cli::{Cli, CliError, Command, Config, Formatter, Status};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn formatter() -> Formatter {
    Formatter::new(OutputFormat::Json, false)
}

fn write(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.display().to_string()
}

fn parse(argv: &[&str]) -> Command {
    let mut full = vec!["salvage"];
    full.extend_from_slice(argv);
    Cli::parse_from(full).command
}

#[test]
fn test_extract_clean_responses() {
    let dir = TempDir::new().unwrap();
    let fenced = write(
        &dir,
        "fenced.txt",
        "```json\n{\"headlines\": [\"Ship faster\", \"Sleep better\"]}\n```",
    );
    let chatty = write(
        &dir,
        "chatty.txt",
        "Sure! {\"headlines\": [\"One\",]} Hope that helps!",
    );

    let Command::Extract(args) = parse(&["extract", "-s", "pitch_headlines", fenced.as_str(), chatty.as_str()])
    else {
        panic!("Expected Extract command");
    };
    let status = execute_extract(args, &Config::default(), &formatter()).unwrap();
    assert_eq!(status, Status::Clean);
}

#[test]
fn test_extract_diagnosed_response() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.txt", "{\"subject\": \"Hi\", \"body\": \"Hello\"}");
    let prose = write(&dir, "prose.txt", "I'm sorry, I can't write that email.");

    let Command::Extract(args) = parse(&["extract", "-s", "cold_email", "--show-raw", good.as_str(), prose.as_str()])
    else {
        panic!("Expected Extract command");
    };
    let status = execute_extract(args, &Config::default(), &formatter()).unwrap();
    assert_eq!(status, Status::Diagnosed);
    assert_eq!(status.code(), 2);
}

#[test]
fn test_extract_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.txt").display().to_string();

    let Command::Extract(args) = parse(&["extract", "-s", "cold_email", missing.as_str()]) else {
        panic!("Expected Extract command");
    };
    let result = execute_extract(args, &Config::default(), &formatter());
    assert!(matches!(result, Err(CliError::Io(_))));
}

#[test]
fn test_extract_with_schema_file() {
    let dir = TempDir::new().unwrap();
    let schema = write(
        &dir,
        "schema.json",
        r#"{"name": "ideas", "root": {"fields": [
            {"name": "ideas", "kind": {"type": "text_list"}, "non_empty": true}
        ]}}"#,
    );
    let response = write(&dir, "response.txt", "{\"ideas\": [\"a\", \"\"]}");

    let Command::Extract(args) = parse(&["extract", "--schema-file", schema.as_str(), response.as_str()]) else {
        panic!("Expected Extract command");
    };
    let status = execute_extract(args, &Config::default(), &formatter()).unwrap();
    assert_eq!(status, Status::Diagnosed);
}

#[test]
fn test_extract_rejects_unusable_budget() {
    let dir = TempDir::new().unwrap();
    let response = write(&dir, "r.txt", "{\"subject\": \"Hi\", \"body\": \"Hello\"}");

    let Command::Extract(args) = parse(&["extract", "-s", "cold_email", "-b", "2", response.as_str()])
    else {
        panic!("Expected Extract command");
    };
    let result = execute_extract(args, &Config::default(), &formatter());
    assert!(matches!(result, Err(CliError::Extractor(_))));
}

#[test]
fn test_validate_payload() {
    let dir = TempDir::new().unwrap();
    let valid = write(
        &dir,
        "valid.json",
        r#"{"suggested_anti_personas": [{"persona_name": "X", "reason": "Y"}, {"persona_name": "Z"}],
            "negative_marketing_card": {"summary": "a"},
            "product_brief_card": {"summary": "b"},
            "opportunity_report_card": {"summary": "c"}}"#,
    );
    let invalid = write(&dir, "invalid.json", "{\"headlines\": \"one\"}");

    let Command::Validate(args) = parse(&["validate", "-s", "anti_persona_report", "-n", valid.as_str()])
    else {
        panic!("Expected Validate command");
    };
    let status = execute_validate(args, &Config::default(), &formatter()).unwrap();
    assert_eq!(status, Status::Clean);

    let Command::Validate(args) = parse(&["validate", "-s", "pitch_headlines", invalid.as_str()]) else {
        panic!("Expected Validate command");
    };
    let status = execute_validate(args, &Config::default(), &formatter()).unwrap();
    assert_eq!(status, Status::Diagnosed);
}

#[test]
fn test_validate_requires_well_formed_json() {
    let dir = TempDir::new().unwrap();
    let fenced = write(&dir, "fenced.json", "```json\n{\"headlines\": [\"a\"]}\n```");

    let Command::Validate(args) = parse(&["validate", "-s", "pitch_headlines", fenced.as_str()]) else {
        panic!("Expected Validate command");
    };
    let result = execute_validate(args, &Config::default(), &formatter());
    assert!(matches!(result, Err(CliError::Serialization(_))));
}

#[test]
fn test_schemas_command() {
    let Command::Schemas(args) = parse(&["schemas"]) else {
        panic!("Expected Schemas command");
    };
    assert!(execute_schemas(args, &formatter()).is_ok());

    let Command::Schemas(args) = parse(&["schemas", "problem_persona"]) else {
        panic!("Expected Schemas command");
    };
    assert!(execute_schemas(args, &formatter()).is_ok());

    let Command::Schemas(args) = parse(&["schemas", "landing_page"]) else {
        panic!("Expected Schemas command");
    };
    assert!(matches!(
        execute_schemas(args, &formatter()),
        Err(CliError::Extractor(_))
    ));
}

#[test]
fn test_config_file_drives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "config.toml",
        "[settings]\ncolor = false\nformat = \"quiet\"\n\n[extractor]\nsummary_budget = 64\n",
    );

    let config = Config::load(Some(Path::new(&path))).unwrap();
    assert!(!config.settings.color);
    assert_eq!(config.settings.format, OutputFormat::Quiet);
    assert_eq!(config.extractor.summary_budget, 64);
}
