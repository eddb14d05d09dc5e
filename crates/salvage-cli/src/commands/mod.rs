//! Command implementations.

pub mod extract;
pub mod schemas;
pub mod validate;

pub use self::extract::execute_extract;
pub use self::schemas::execute_schemas;
pub use self::validate::execute_validate;

use crate::cli::SchemaArgs;
use crate::error::{CliError, Result};
use salvage_domain::SchemaDescriptor;
use salvage_extractor::catalog;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// How a command finished, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every input produced a record or a valid payload
    Clean,
    /// At least one input was diagnosed or rejected
    Diagnosed,
}

impl Status {
    /// Process exit code: 0 when clean, 2 when anything was diagnosed
    pub fn code(self) -> i32 {
        match self {
            Status::Clean => 0,
            Status::Diagnosed => 2,
        }
    }
}

/// Resolve the schema named on the command line.
pub fn resolve_schema(args: &SchemaArgs) -> Result<SchemaDescriptor> {
    match (&args.schema, &args.schema_file) {
        (_, Some(path)) => {
            let contents = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        }
        (Some(name), None) => Ok(catalog::lookup(name)?),
        (None, None) => Err(CliError::InvalidInput(
            "Must specify either --schema or --schema-file".to_string(),
        )),
    }
}

/// Read a file, or stdin for `None` / `-`.
pub fn read_input(path: Option<&Path>) -> Result<(String, String)> {
    match path {
        Some(path) if path != Path::new("-") => {
            let text = fs::read_to_string(path)?;
            Ok((path.display().to_string(), text))
        }
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(("-".to_string(), buffer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_builtin_schema() {
        let args = SchemaArgs {
            schema: Some("cold_email".into()),
            schema_file: None,
        };
        assert_eq!(resolve_schema(&args).unwrap().name(), "cold_email");
    }

    #[test]
    fn test_resolve_unknown_schema() {
        let args = SchemaArgs {
            schema: Some("landing_page".into()),
            schema_file: None,
        };
        assert!(matches!(resolve_schema(&args), Err(CliError::Extractor(_))));
    }

    #[test]
    fn test_resolve_schema_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "ideas", "root": {{"fields": [{{"name": "ideas", "kind": {{"type": "text_list"}}}}]}}}}"#
        )
        .unwrap();
        let args = SchemaArgs {
            schema: None,
            schema_file: Some(file.path().to_path_buf()),
        };
        let schema = resolve_schema(&args).unwrap();
        assert_eq!(schema.name(), "ideas");
        assert_eq!(schema.fields().len(), 1);
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "hello").unwrap();
        let (source, text) = read_input(Some(file.path())).unwrap();
        assert_eq!(text, "hello");
        assert_eq!(source, file.path().display().to_string());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Clean.code(), 0);
        assert_eq!(Status::Diagnosed.code(), 2);
    }
}
