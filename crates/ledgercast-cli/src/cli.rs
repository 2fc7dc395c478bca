//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ledgercast - Forecasts and budget suggestions from monthly ledgers
#[derive(Parser)]
#[command(name = "ledgercast")]
#[command(about = "Trend, scenario and budget forecasts for monthly accounting data", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Forecast config file (defaults to the platform config override, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show growth rate and seasonality for one metric
    Trend {
        /// History file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Metric: in, out, net, or account:<id>
        #[arg(short, long, default_value = "in")]
        metric: String,
    },

    /// Project future months under a scenario
    Project {
        /// History file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Number of months to project
        #[arg(short, long, default_value = "3")]
        months: u32,

        /// Scenario: pessimistic, realistic, optimistic, or all
        #[arg(short, long, default_value = "realistic")]
        scenario: String,
    },

    /// Suggest budget lines for the coming month
    Budget {
        /// History file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Account id (every account in the history if omitted)
        #[arg(short, long)]
        account: Option<String>,

        /// Target month as MMYYYY (defaults to the month after the last entry)
        #[arg(long)]
        month: Option<String>,
    },

    /// Show totals, averages and ratios over the whole history
    Summary {
        /// History file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show dashboard findings (deficits, trends, volatile accounts)
    Insights {
        /// History file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Forecast horizon in months
        #[arg(short, long, default_value = "3")]
        months: u32,
    },

    /// Show the effective forecast configuration
    Config,
}
