//! Validate command implementation.

use super::{read_input, resolve_schema, Status};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use salvage_domain::ExtractedPayload;
use salvage_extractor::Extractor;

/// Execute the validate command.
///
/// The input must already be well-formed JSON; unlike `extract`, no
/// unwrapping or repair is attempted and a parse failure is an error.
pub fn execute_validate(
    args: ValidateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<Status> {
    let schema = resolve_schema(&args.schema)?;
    let extractor = Extractor::try_new(config.extractor.clone())?;

    let (source, text) = read_input(args.file.as_deref())?;
    let payload: ExtractedPayload = serde_json::from_str(&text)?;

    let result = extractor.validate_only(&payload, &schema);
    let status = if result.is_valid() {
        Status::Clean
    } else {
        Status::Diagnosed
    };
    println!("{}", formatter.format_validation(&source, &result)?);

    if args.normalize && result.is_valid() {
        let outcome = extractor.extract_value(&payload, &schema);
        println!("{}", formatter.format_extraction(&source, &outcome, false)?);
    }

    Ok(status)
}
