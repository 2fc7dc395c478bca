//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::Path;

use clap::Parser;
use ledgercast_core::test_utils::{account_history, declining_history, sample_history, to_csv};
use ledgercast_core::ForecastEngine;
use tempfile::NamedTempFile;

use crate::cli::{Cli, Commands};
use crate::commands::{self, truncate, Output};

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn engine() -> ForecastEngine {
    ForecastEngine::new()
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_project_args() {
    let cli = Cli::try_parse_from([
        "ledgercast",
        "--json",
        "project",
        "--file",
        "history.csv",
        "--months",
        "6",
        "--scenario",
        "all",
    ])
    .unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::Project {
            months, scenario, ..
        } => {
            assert_eq!(months, 6);
            assert_eq!(scenario, "all");
        }
        _ => panic!("expected project command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli =
        Cli::try_parse_from(["ledgercast", "trend", "-f", "h.csv", "--verbose", "--config", "c.toml"])
            .unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.config.as_deref(), Some(Path::new("c.toml")));
}

#[test]
fn test_file_is_required() {
    assert!(Cli::try_parse_from(["ledgercast", "summary"]).is_err());
}

// ========== Shared Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a very long account name", 10), "a very ...");
}

#[test]
fn test_open_history_csv_and_json() {
    let history = account_history();

    let csv = write_temp(".csv", &to_csv(&history));
    assert_eq!(commands::open_history(csv.path()).unwrap(), history);

    let json = write_temp(".json", &serde_json::to_string(&history).unwrap());
    assert_eq!(commands::open_history(json.path()).unwrap(), history);
}

#[test]
fn test_open_history_rejects_empty_file() {
    let csv = write_temp(".csv", "month_key,total_in,total_out\n");
    let err = commands::open_history(csv.path()).unwrap_err();
    assert!(err.to_string().contains("no months"));
}

#[test]
fn test_open_history_missing_file() {
    let err = commands::open_history(Path::new("/nonexistent/history.csv")).unwrap_err();
    assert!(err.to_string().contains("Failed to load history"));
}

#[test]
fn test_load_engine_with_override() {
    let config = write_temp(
        ".toml",
        "[confidence]\nhigh_below = 0.05\nmedium_below = 0.2\n",
    );
    let (engine, loaded) = commands::load_engine(Some(config.path())).unwrap();
    assert_eq!(engine.config().high_confidence_cv, 0.05);
    assert_eq!(loaded.source.to_string(), config.path().display().to_string());
}

#[test]
fn test_load_engine_rejects_bad_config() {
    let config = write_temp(".toml", "[scenarios.inflow]\npessimistic = 2.0\n");
    assert!(commands::load_engine(Some(config.path())).is_err());
}

// ========== Forecast Command Tests ==========

#[test]
fn test_cmd_trend() {
    let history = sample_history();
    for output in [Output::Table, Output::Json] {
        assert!(commands::cmd_trend(&engine(), &history, "in", output).is_ok());
    }
    assert!(commands::cmd_trend(&engine(), &history, "account:rent", Output::Table).is_ok());
}

#[test]
fn test_cmd_trend_invalid_metric() {
    let err = commands::cmd_trend(&engine(), &sample_history(), "profit", Output::Table)
        .unwrap_err();
    assert!(err.to_string().contains("Invalid metric"));
}

#[test]
fn test_cmd_project() {
    let history = sample_history();
    assert!(commands::cmd_project(&engine(), &history, 3, "realistic", Output::Table).is_ok());
    assert!(commands::cmd_project(&engine(), &history, 3, "all", Output::Json).is_ok());
    assert!(commands::cmd_project(&engine(), &history, 3, "ALL", Output::Table).is_ok());
}

#[test]
fn test_project_json_output() {
    let report =
        commands::build_projection_report(&engine(), &sample_history(), 1, "realistic").unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&commands::to_json(&report).unwrap()).unwrap();

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["month_key"], "042024");
    assert_eq!(rows[0]["scenario"], "realistic");
    let expected_in = rows[0]["expected_in"].as_f64().unwrap();
    assert!((expected_in - 133_100.0).abs() < 1e-6);
}

#[test]
fn test_project_all_json_has_every_scenario() {
    let report = commands::build_projection_report(&engine(), &sample_history(), 2, "all").unwrap();
    let json = serde_json::to_value(&report).unwrap();

    for scenario in ["pessimistic", "realistic", "optimistic"] {
        let rows = json[scenario].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["month_key"], "052024");
    }
    assert!(
        json["pessimistic"][0]["expected_in"].as_f64().unwrap()
            < json["optimistic"][0]["expected_in"].as_f64().unwrap()
    );
}

#[test]
fn test_budget_defaults_to_month_after_history() {
    let history = ledgercast_core::test_utils::history_from_rows(&[("129999", 1.0, 1.0)]);
    let err = commands::resolve_target_month(&history, None).unwrap_err();
    assert!(err.to_string().contains("pass --month"));
}

#[test]
fn test_cmd_project_rejects_bad_input() {
    let history = sample_history();
    assert!(commands::cmd_project(&engine(), &history, 0, "realistic", Output::Table).is_err());
    assert!(commands::cmd_project(&engine(), &history, 3, "rosy", Output::Table).is_err());
    assert!(commands::cmd_project(&engine(), &history, 0, "all", Output::Table).is_err());
}

// ========== Budget Command Tests ==========

#[test]
fn test_resolve_target_month() {
    let history = account_history();
    assert_eq!(
        commands::resolve_target_month(&history, None)
            .unwrap()
            .to_string(),
        "012025"
    );
    assert_eq!(
        commands::resolve_target_month(&history, Some("062024"))
            .unwrap()
            .to_string(),
        "062024"
    );
    assert!(commands::resolve_target_month(&history, Some("2024-06-01")).is_err());
}

#[test]
fn test_cmd_budget() {
    let history = account_history();
    assert!(commands::cmd_budget(&engine(), &history, None, None, Output::Table).is_ok());
    assert!(commands::cmd_budget(&engine(), &history, Some("rent"), None, Output::Json).is_ok());
    // Unknown account is unavailable, not an error
    assert!(
        commands::cmd_budget(&engine(), &history, Some("travel"), None, Output::Table).is_ok()
    );
}

#[test]
fn test_cmd_budget_empty_account_id() {
    let history = account_history();
    assert!(commands::cmd_budget(&engine(), &history, Some("  "), None, Output::Table).is_err());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_summary() {
    let history = account_history();
    assert!(commands::cmd_summary(&history, Output::Table).is_ok());
    assert!(commands::cmd_summary(&history, Output::Json).is_ok());
}

#[test]
fn test_cmd_insights() {
    let history = declining_history();
    assert!(commands::cmd_insights(&engine(), &history, 3, Output::Table).is_ok());
    assert!(commands::cmd_insights(&engine(), &history, 3, Output::Json).is_ok());
    assert!(commands::cmd_insights(&engine(), &sample_history(), 3, Output::Table).is_ok());
}

#[test]
fn test_cmd_insights_rejects_zero_horizon() {
    assert!(commands::cmd_insights(&engine(), &declining_history(), 0, Output::Table).is_err());
}

// ========== Config Command Tests ==========

#[test]
fn test_cmd_config() {
    let config = write_temp(".toml", "[rounding]\nminor_unit_digits = 2\n");
    let (_, loaded) = commands::load_engine(Some(config.path())).unwrap();
    assert_eq!(loaded.config.minor_unit_digits, 2);
    assert!(commands::cmd_config(&loaded, Output::Table).is_ok());
    assert!(commands::cmd_config(&loaded, Output::Json).is_ok());
}
