//! Ledgercast Core Library
//!
//! Forecasting and budgeting over monthly accounting aggregates:
//! - Monthly history model with validated month keys
//! - Growth rate and seasonality estimation
//! - Scenario projections (pessimistic / realistic / optimistic)
//! - Budget-line suggestions with confidence classification
//! - Summary ratios and dashboard insights
//! - CSV / JSON history import
//! - TOML configuration for scenario multipliers and thresholds

pub mod cache;
pub mod config;
pub mod error;
pub mod forecast;
pub mod import;
pub mod insights;
pub mod models;
pub mod ratios;

/// Fixture histories for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use cache::ForecastCache;
pub use config::{ConfigSource, ForecastConfig, LoadedConfig, ScenarioMultipliers};
pub use error::{Error, Result};
pub use forecast::ForecastEngine;
pub use import::{load_history, HistoryFormat};
pub use insights::{AnalysisContext, Finding, InsightEngine, InsightType, Severity};
pub use models::{
    BudgetLine, BudgetSuggestion, Confidence, GrowthEstimate, History, Metric, MonthKey,
    MonthlyAggregate, Projection, Scenario, ScenarioSet, TrendEstimate,
};
pub use ratios::{summarize, FinancialSummary};
