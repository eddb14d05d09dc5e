//! Schemas command implementation.

use crate::cli::SchemasArgs;
use crate::error::Result;
use crate::output::Formatter;
use salvage_extractor::catalog;

/// Execute the schemas command.
pub fn execute_schemas(args: SchemasArgs, formatter: &Formatter) -> Result<()> {
    match args.name {
        Some(name) => {
            let schema = catalog::lookup(&name)?;
            println!("{}", formatter.format_schema(&schema)?);
        }
        None => println!("{}", formatter.format_schemas(&catalog::all())?),
    }
    Ok(())
}
