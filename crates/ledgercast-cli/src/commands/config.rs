//! Config display command

use anyhow::Result;
use ledgercast_core::config::{default_config_path, LoadedConfig};
use serde::Serialize;

use super::core::{print_json, Output};

#[derive(Serialize)]
struct ConfigReport<'a> {
    source: String,
    override_path: Option<String>,
    config: &'a ledgercast_core::ForecastConfig,
}

pub fn cmd_config(loaded: &LoadedConfig, output: Output) -> Result<()> {
    let override_path = default_config_path();

    if output == Output::Json {
        return print_json(&ConfigReport {
            source: loaded.source.to_string(),
            override_path: override_path.map(|p| p.display().to_string()),
            config: &loaded.config,
        });
    }

    let config = &loaded.config;

    println!();
    println!("⚙️  Forecast Config");
    println!("   Source: {}", loaded.source);
    if let Some(path) = &override_path {
        println!("   Override path: {}", path.display());
    }
    println!("   ─────────────────────────────");
    println!(
        "   {:12} │ {:>11} │ {:>9} │ {:>10}",
        "Multipliers", "pessimistic", "realistic", "optimistic"
    );
    println!(
        "   {:12} │ {:>11.2} │ {:>9.2} │ {:>10.2}",
        "inflow", config.inflow.pessimistic, config.inflow.realistic, config.inflow.optimistic
    );
    println!(
        "   {:12} │ {:>11.2} │ {:>9.2} │ {:>10.2}",
        "outflow", config.outflow.pessimistic, config.outflow.realistic, config.outflow.optimistic
    );
    println!();
    println!(
        "   Confidence:  high below CV {:.2}, medium below CV {:.2}",
        config.high_confidence_cv, config.medium_confidence_cv
    );
    println!("   Rounding:    {} decimal digits", config.minor_unit_digits);
    println!(
        "   Decline:     growth finding below {:.1}% per month",
        -config.decline_threshold * 100.0
    );

    Ok(())
}
