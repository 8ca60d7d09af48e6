//! Ledgerlens command line.
//!
//! Usage:
//!   ledgerlens balances <snapshot.json>        - Print a balances table
//!   ledgerlens transactions <transactions.json> - Print a transactions table
//!   ledgerlens --help                          - Show all options
//!
//! Book settings come from `config/` files and `LEDGERLENS__*` variables.

mod cli;
mod commands;
mod render;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use ledgerlens_shared::{AppConfig, AppError, OutputFormat};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};

fn main() -> ExitCode {
    // Usage errors and help exit here, before any configuration is read
    let cli = Cli::parse();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout is reserved for table output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ledgerlens=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            let code = err
                .downcast_ref::<AppError>()
                .map_or(1, AppError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    debug!(
        fraction_digits = config.book.fraction_digits,
        separator = %config.book.decimal_separator,
        periodicity = %config.book.periodicity,
        "Loaded book settings"
    );

    let (table, output) = match cli.command {
        Command::Balances(args) => (
            commands::balances(&args, &config.book)?,
            args.table.output,
        ),
        Command::Transactions(args) => (
            commands::transactions(&args, &config.book)?,
            args.table.output,
        ),
    };

    let format = output.map_or(config.output.format, OutputFormat::from);
    let text = render::render(&table, format)?;
    std::io::stdout()
        .lock()
        .write_all(text.as_bytes())
        .context("Failed to write table")?;
    Ok(())
}
