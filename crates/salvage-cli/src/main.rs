//! Salvage CLI - Extract schema-checked records from text-model responses.

use clap::Parser;
use salvage_cli::commands;
use salvage_cli::{Cli, Command, Config, Formatter, Status};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(status) => std::process::exit(status.code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> salvage_cli::Result<Status> {
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter),
        Command::Validate(args) => commands::execute_validate(args, &config, &formatter),
        Command::Schemas(args) => {
            commands::execute_schemas(args, &formatter)?;
            Ok(Status::Clean)
        }
    }
}
