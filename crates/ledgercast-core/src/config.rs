//! Forecast configuration
//!
//! Scenario multipliers, confidence thresholds and rounding are business
//! constants rather than code, so they live in a TOML file.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/ledgercast/config/forecast.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Scenario;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/forecast.toml");

/// Per-scenario multipliers for one side of the ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMultipliers {
    pub pessimistic: f64,
    pub realistic: f64,
    pub optimistic: f64,
}

impl ScenarioMultipliers {
    pub fn get(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Pessimistic => self.pessimistic,
            Scenario::Realistic => self.realistic,
            Scenario::Optimistic => self.optimistic,
        }
    }

    fn all_positive(&self) -> bool {
        [self.pessimistic, self.realistic, self.optimistic]
            .iter()
            .all(|m| m.is_finite() && *m > 0.0)
    }
}

/// Forecast configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Multipliers applied to projected inflow
    pub inflow: ScenarioMultipliers,
    /// Multipliers applied to projected outflow (inverse of inflow by default)
    pub outflow: ScenarioMultipliers,
    /// Coefficient of variation below which confidence is high
    pub high_confidence_cv: f64,
    /// Coefficient of variation below which confidence is medium
    pub medium_confidence_cv: f64,
    /// Decimal digits kept when rounding suggested amounts
    pub minor_unit_digits: u32,
    /// Monthly inflow decline that raises a growth-trend finding (0.05 = 5%)
    pub decline_threshold: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            inflow: ScenarioMultipliers {
                pessimistic: 0.9,
                realistic: 1.0,
                optimistic: 1.1,
            },
            outflow: ScenarioMultipliers {
                pessimistic: 1.1,
                realistic: 1.0,
                optimistic: 0.9,
            },
            high_confidence_cv: 0.15,   // cv < 15% -> high
            medium_confidence_cv: 0.35, // cv < 35% -> medium
            minor_unit_digits: 0,       // whole currency units
            decline_threshold: 0.05,    // 5% monthly decline
        }
    }
}

impl ForecastConfig {
    /// Load config, preferring `override_path`, then the data-dir override, then defaults
    pub fn load(override_path: Option<&Path>) -> Result<LoadedConfig> {
        let source = match override_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                ConfigSource::File(path.to_path_buf())
            }
            None => match default_config_path() {
                Some(path) if path.exists() => ConfigSource::File(path),
                _ => ConfigSource::Embedded,
            },
        };

        let config = match &source {
            ConfigSource::File(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                parse_config(&content)?
            }
            ConfigSource::Embedded => parse_config(DEFAULT_CONFIG)?,
        };

        debug!(source = %source, "Loaded forecast config");
        Ok(LoadedConfig { config, source })
    }

    /// Reject configs that would break scenario ordering or confidence bands
    pub fn validate(&self) -> Result<()> {
        if !self.inflow.all_positive() || !self.outflow.all_positive() {
            return Err(Error::Config(
                "Scenario multipliers must be finite and positive".into(),
            ));
        }

        let i = &self.inflow;
        if !(i.pessimistic <= i.realistic && i.realistic <= i.optimistic) {
            return Err(Error::Config(format!(
                "Inflow multipliers must satisfy pessimistic <= realistic <= optimistic \
                 (got {} / {} / {})",
                i.pessimistic, i.realistic, i.optimistic
            )));
        }

        let o = &self.outflow;
        if !(o.pessimistic >= o.realistic && o.realistic >= o.optimistic) {
            return Err(Error::Config(format!(
                "Outflow multipliers must satisfy pessimistic >= realistic >= optimistic \
                 (got {} / {} / {})",
                o.pessimistic, o.realistic, o.optimistic
            )));
        }

        if !(self.high_confidence_cv > 0.0 && self.high_confidence_cv < self.medium_confidence_cv)
        {
            return Err(Error::Config(format!(
                "Confidence thresholds must satisfy 0 < high_below < medium_below \
                 (got {} / {})",
                self.high_confidence_cv, self.medium_confidence_cv
            )));
        }

        if self.minor_unit_digits > 6 {
            return Err(Error::Config(format!(
                "minor_unit_digits must be at most 6, got {}",
                self.minor_unit_digits
            )));
        }

        if !self.decline_threshold.is_finite() || self.decline_threshold < 0.0 {
            return Err(Error::Config(
                "decline_threshold must be a non-negative number".into(),
            ));
        }

        Ok(())
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Embedded => write!(f, "embedded defaults"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A parsed config together with its source
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ForecastConfig,
    pub source: ConfigSource,
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("ledgercast").join("config").join("forecast.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    scenarios: Option<RawScenarios>,
    confidence: Option<RawConfidence>,
    rounding: Option<RawRounding>,
    insights: Option<RawInsights>,
}

#[derive(Debug, Deserialize)]
struct RawScenarios {
    inflow: Option<RawMultipliers>,
    outflow: Option<RawMultipliers>,
}

#[derive(Debug, Deserialize)]
struct RawMultipliers {
    pessimistic: Option<f64>,
    realistic: Option<f64>,
    optimistic: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawConfidence {
    high_below: Option<f64>,
    medium_below: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRounding {
    minor_unit_digits: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    decline_threshold: Option<f64>,
}

fn apply_multipliers(target: &mut ScenarioMultipliers, raw: RawMultipliers) {
    if let Some(m) = raw.pessimistic {
        target.pessimistic = m;
    }
    if let Some(m) = raw.realistic {
        target.realistic = m;
    }
    if let Some(m) = raw.optimistic {
        target.optimistic = m;
    }
}

/// Parse config from TOML content and validate it
pub fn parse_config(content: &str) -> Result<ForecastConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = ForecastConfig::default();

    if let Some(scenarios) = raw.scenarios {
        if let Some(inflow) = scenarios.inflow {
            apply_multipliers(&mut config.inflow, inflow);
        }
        if let Some(outflow) = scenarios.outflow {
            apply_multipliers(&mut config.outflow, outflow);
        }
    }

    if let Some(confidence) = raw.confidence {
        if let Some(high) = confidence.high_below {
            config.high_confidence_cv = high;
        }
        if let Some(medium) = confidence.medium_below {
            config.medium_confidence_cv = medium;
        }
    }

    if let Some(digits) = raw.rounding.and_then(|r| r.minor_unit_digits) {
        config.minor_unit_digits = digits;
    }

    if let Some(threshold) = raw.insights.and_then(|i| i.decline_threshold) {
        config.decline_threshold = threshold;
    }

    config.validate()?;
    Ok(config)
}
