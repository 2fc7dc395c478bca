//! Ledgercast CLI - Forecasts for monthly accounting aggregates
//!
//! Usage:
//!   ledgercast trend --file history.csv            Growth rate and seasonality
//!   ledgercast project --file history.csv -m 6     Scenario projections
//!   ledgercast budget --file history.csv           Budget-line suggestions
//!   ledgercast insights --file history.csv         Dashboard findings

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let output = commands::Output::from_flag(cli.json);

    match cli.command {
        Commands::Trend { file, metric } => {
            let (engine, _) = commands::load_engine(cli.config.as_deref())?;
            let history = commands::open_history(&file)?;
            commands::cmd_trend(&engine, &history, &metric, output)
        }
        Commands::Project {
            file,
            months,
            scenario,
        } => {
            let (engine, _) = commands::load_engine(cli.config.as_deref())?;
            let history = commands::open_history(&file)?;
            commands::cmd_project(&engine, &history, months, &scenario, output)
        }
        Commands::Budget {
            file,
            account,
            month,
        } => {
            let (engine, _) = commands::load_engine(cli.config.as_deref())?;
            let history = commands::open_history(&file)?;
            commands::cmd_budget(
                &engine,
                &history,
                account.as_deref(),
                month.as_deref(),
                output,
            )
        }
        Commands::Summary { file } => {
            let history = commands::open_history(&file)?;
            commands::cmd_summary(&history, output)
        }
        Commands::Insights { file, months } => {
            let (engine, _) = commands::load_engine(cli.config.as_deref())?;
            let history = commands::open_history(&file)?;
            commands::cmd_insights(&engine, &history, months, output)
        }
        Commands::Config => {
            let (_, loaded) = commands::load_engine(cli.config.as_deref())?;
            commands::cmd_config(&loaded, output)
        }
    }
}
