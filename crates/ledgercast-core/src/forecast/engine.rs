//! ForecastEngine - stateless facade over the forecast computations

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ForecastConfig;
use crate::error::Result;
use crate::models::{
    BudgetLine, GrowthEstimate, History, Metric, MonthKey, Projection, Scenario, ScenarioSet,
    TrendEstimate,
};

use super::budget::suggest_budget_line;
use super::projection::{validate_horizon, ProjectionModel};
use super::seasonality::seasonality_factors;
use super::trend::growth_rate;

/// Forecast engine
///
/// Holds only its configuration. Every method is a pure function of its
/// arguments, so callers own any memoization (see `cache::ForecastCache`).
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl ForecastEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with an explicit configuration
    pub fn with_config(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Average month-over-month change of `metric`
    pub fn growth_rate(&self, history: &History, metric: &Metric) -> GrowthEstimate {
        let values: Vec<f64> = history.series(metric).into_iter().map(|(_, v)| v).collect();
        let growth = growth_rate(&values);
        debug!(
            metric = %metric,
            points = values.len(),
            intervals = growth.intervals_used,
            rate = growth.rate_per_month,
            insufficient = growth.insufficient_data,
            "Growth rate computed"
        );
        growth
    }

    /// Seasonality factor of `metric` for each month index 1..=12
    pub fn seasonality_factor(&self, history: &History, metric: &Metric) -> BTreeMap<u32, f64> {
        seasonality_factors(&history.series(metric))
    }

    /// Growth rate and seasonality of `metric` together
    pub fn trend(&self, history: &History, metric: &Metric) -> TrendEstimate {
        let growth = self.growth_rate(history, metric);
        TrendEstimate {
            metric: metric.clone(),
            growth_rate_per_month: growth.rate_per_month,
            insufficient_data: growth.insufficient_data,
            seasonality_factor: self.seasonality_factor(history, metric),
        }
    }

    /// Project the next `months_ahead` months under `scenario`
    pub fn project(
        &self,
        history: &History,
        months_ahead: u32,
        scenario: Scenario,
    ) -> Result<Vec<Projection>> {
        super::projection::project(history, months_ahead, scenario, &self.config)
    }

    /// Project every scenario from a single fitted model
    pub fn project_scenarios(&self, history: &History, months_ahead: u32) -> Result<ScenarioSet> {
        validate_horizon(months_ahead)?;
        let model = ProjectionModel::fit(history)?;
        Ok(ScenarioSet {
            pessimistic: model.project(months_ahead, Scenario::Pessimistic, &self.config)?,
            realistic: model.project(months_ahead, Scenario::Realistic, &self.config)?,
            optimistic: model.project(months_ahead, Scenario::Optimistic, &self.config)?,
        })
    }

    /// Suggest a budget line for one account
    pub fn suggest_budget_line(
        &self,
        history: &History,
        account_id: &str,
        target_month: MonthKey,
    ) -> Result<BudgetLine> {
        suggest_budget_line(history, account_id, target_month, &self.config)
    }

    /// Suggest budget lines for every account in the history, ordered by account id
    pub fn suggest_all_budget_lines(
        &self,
        history: &History,
        target_month: MonthKey,
    ) -> Result<Vec<BudgetLine>> {
        history
            .account_ids()
            .iter()
            .map(|id| self.suggest_budget_line(history, id, target_month))
            .collect()
    }
}
