//! Shared command utilities
//!
//! This module contains:
//! - `load_engine` - Resolve config and build the forecast engine
//! - `open_history` - Load a history file with path context on failure
//! - `Output` - Table or JSON rendering

use std::path::Path;

use anyhow::{Context, Result};
use ledgercast_core::config::{ForecastConfig, LoadedConfig};
use ledgercast_core::{load_history, ForecastEngine, History};
use serde::Serialize;
use tracing::debug;

/// How command results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Table,
    Json,
}

impl Output {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Load config (explicit path > data-dir override > embedded) and build an engine
pub fn load_engine(config_path: Option<&Path>) -> Result<(ForecastEngine, LoadedConfig)> {
    let loaded = ForecastConfig::load(config_path).context("Failed to load forecast config")?;
    let engine = ForecastEngine::with_config(loaded.config.clone())
        .context("Invalid forecast config")?;
    debug!(source = %loaded.source, "Forecast engine ready");
    Ok((engine, loaded))
}

/// Load a history file, failing on empty histories
pub fn open_history(path: &Path) -> Result<History> {
    let history = load_history(path)
        .with_context(|| format!("Failed to load history from {}", path.display()))?;

    if history.is_empty() {
        anyhow::bail!("History file {} has no months", path.display());
    }

    Ok(history)
}

/// Render any result as pretty JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

/// Pretty-print any result as JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", to_json(value)?);
    Ok(())
}
