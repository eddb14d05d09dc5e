//! Extract command implementation.

use super::{read_input, resolve_schema, Status};
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use salvage_extractor::{Extractor, ExtractorConfig};
use tracing::debug;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<Status> {
    let schema = resolve_schema(&args.schema)?;
    let extractor = Extractor::try_new(extractor_config(&args, config))?;

    let mut sources = Vec::new();
    let mut raws = Vec::new();
    if args.files.is_empty() {
        let (source, raw) = read_input(None)?;
        sources.push(source);
        raws.push(raw);
    } else {
        for path in &args.files {
            let (source, raw) = read_input(Some(path.as_path()))?;
            sources.push(source);
            raws.push(raw);
        }
    }
    debug!(
        "Extracting {} response(s) with schema '{}'",
        raws.len(),
        schema.name()
    );

    let mut status = Status::Clean;
    for (source, outcome) in sources.iter().zip(extractor.extract_batch(&raws, &schema)) {
        if outcome.is_err() {
            status = Status::Diagnosed;
        }
        println!("{}", formatter.format_extraction(source, &outcome, args.show_raw)?);
    }

    Ok(status)
}

/// File configuration with command-line overrides applied.
fn extractor_config(args: &ExtractArgs, config: &Config) -> ExtractorConfig {
    let mut extractor = if args.strict {
        ExtractorConfig {
            summary_budget: config.extractor.summary_budget,
            ellipsis: config.extractor.ellipsis.clone(),
            ..ExtractorConfig::strict()
        }
    } else {
        config.extractor.clone()
    };
    if let Some(budget) = args.budget {
        extractor = extractor.with_summary_budget(budget);
    }
    extractor
}
