//! Trend and projection commands

use anyhow::{Context, Result};
use ledgercast_core::models::{Metric, Projection, Scenario, ScenarioSet};
use ledgercast_core::{ForecastEngine, History};
use serde::Serialize;

use super::core::{print_json, Output};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn cmd_trend(
    engine: &ForecastEngine,
    history: &History,
    metric: &str,
    output: Output,
) -> Result<()> {
    let metric: Metric = metric
        .parse()
        .with_context(|| format!("Invalid metric: {}", metric))?;
    let trend = engine.trend(history, &metric);

    if output == Output::Json {
        return print_json(&trend);
    }

    println!();
    println!("📈 Trend: {}", trend.metric);
    println!("   ─────────────────────────────");

    if trend.insufficient_data {
        println!("   Growth rate:  n/a (need at least 2 months with a non-zero base)");
    } else {
        println!(
            "   Growth rate:  {:+.2}% per month",
            trend.growth_rate_per_month * 100.0
        );
    }

    println!();
    println!("   Seasonality");
    for (month, factor) in &trend.seasonality_factor {
        let name = MONTH_NAMES
            .get((*month as usize).saturating_sub(1))
            .copied()
            .unwrap_or("?");
        let bar = "█".repeat((factor * 10.0).round().clamp(0.0, 40.0) as usize);
        println!("   {:3} {:>5.2} {}", name, factor, bar);
    }

    Ok(())
}

/// Result of `project`: one scenario, or all three with `--scenario all`
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProjectionReport {
    Single(Vec<Projection>),
    All(ScenarioSet),
}

/// Run the projection selected by the `--scenario` argument
pub fn build_projection_report(
    engine: &ForecastEngine,
    history: &History,
    months: u32,
    scenario: &str,
) -> Result<ProjectionReport> {
    if scenario.eq_ignore_ascii_case("all") {
        let set = engine
            .project_scenarios(history, months)
            .context("Projection failed")?;
        return Ok(ProjectionReport::All(set));
    }

    let scenario: Scenario = scenario
        .parse()
        .with_context(|| format!("Invalid scenario: {}", scenario))?;
    let projections = engine
        .project(history, months, scenario)
        .context("Projection failed")?;

    Ok(ProjectionReport::Single(projections))
}

pub fn cmd_project(
    engine: &ForecastEngine,
    history: &History,
    months: u32,
    scenario: &str,
    output: Output,
) -> Result<()> {
    let report = build_projection_report(engine, history, months, scenario)?;

    if output == Output::Json {
        return print_json(&report);
    }

    match &report {
        ProjectionReport::Single(projections) => {
            if let Some(first) = projections.first() {
                println!();
                println!("🔮 Projection ({}, {} months)", first.scenario, months);
            }
            print_projection_table(projections);
        }
        ProjectionReport::All(set) => {
            for scenario in Scenario::ALL {
                println!();
                println!("🔮 Projection ({})", scenario);
                print_projection_table(set.get(scenario));
            }
        }
    }

    Ok(())
}

fn print_projection_table(projections: &[Projection]) {
    println!(
        "   {:8} │ {:>14} │ {:>14} │ {:>14}",
        "Month", "Inflow", "Outflow", "Balance"
    );
    println!("   ─────────┼────────────────┼────────────────┼────────────────");

    for p in projections {
        let marker = if p.expected_balance < 0.0 { " ⚠️" } else { "" };
        println!(
            "   {:8} │ {:>14.2} │ {:>14.2} │ {:>14.2}{}",
            p.month_key.to_string(),
            p.expected_in,
            p.expected_out,
            p.expected_balance,
            marker
        );
    }
}
