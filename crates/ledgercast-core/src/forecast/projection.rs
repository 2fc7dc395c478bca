//! Scenario projections of future months
//!
//! Inflow and outflow are projected independently from the last known
//! aggregate: each side compounds its own growth rate, then applies the
//! target month's seasonality factor and the scenario multiplier. Scenario
//! multipliers are inverse on the outflow side, so a pessimistic month earns
//! less and spends more.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ForecastConfig;
use crate::error::{Error, Result};
use crate::models::{GrowthEstimate, History, Metric, MonthKey, Projection, Scenario};

use super::seasonality::{factor_for, seasonality_factors};
use super::trend::{compound, growth_rate};

/// Fitted model for one side of the ledger
#[derive(Debug, Clone)]
struct SideModel {
    base: f64,
    growth: GrowthEstimate,
    seasonality: BTreeMap<u32, f64>,
}

impl SideModel {
    fn fit(history: &History, metric: &Metric, base: f64) -> Self {
        let series = history.series(metric);
        let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
        Self {
            base,
            growth: growth_rate(&values),
            seasonality: seasonality_factors(&series),
        }
    }

    fn expected(&self, months_out: u32, month: MonthKey, multiplier: f64) -> f64 {
        self.base
            * compound(self.growth.rate_per_month, months_out)
            * factor_for(&self.seasonality, month.month())
            * multiplier
    }
}

/// Trend model fitted once per history and reused across scenarios
#[derive(Debug, Clone)]
pub struct ProjectionModel {
    last_month: MonthKey,
    inflow: SideModel,
    outflow: SideModel,
}

impl ProjectionModel {
    /// Fit inflow and outflow trends; needs at least one month to project from
    pub fn fit(history: &History) -> Result<Self> {
        let last = history.last().ok_or_else(|| {
            Error::InsufficientData("Cannot project from an empty history".into())
        })?;

        Ok(Self {
            last_month: last.month_key,
            inflow: SideModel::fit(history, &Metric::Inflow, last.total_in),
            outflow: SideModel::fit(history, &Metric::Outflow, last.total_out),
        })
    }

    pub fn inflow_growth(&self) -> GrowthEstimate {
        self.inflow.growth
    }

    pub fn outflow_growth(&self) -> GrowthEstimate {
        self.outflow.growth
    }

    /// Project `months_ahead` months under `scenario`
    pub fn project(
        &self,
        months_ahead: u32,
        scenario: Scenario,
        config: &ForecastConfig,
    ) -> Result<Vec<Projection>> {
        validate_horizon(months_ahead)?;

        let inflow_multiplier = config.inflow.get(scenario);
        let outflow_multiplier = config.outflow.get(scenario);

        debug!(
            months_ahead,
            scenario = scenario.as_str(),
            inflow_growth = self.inflow.growth.rate_per_month,
            outflow_growth = self.outflow.growth.rate_per_month,
            "Projecting"
        );

        let mut projections = Vec::with_capacity(months_ahead as usize);
        let mut month = self.last_month;

        for k in 1..=months_ahead {
            month = month.next().ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "Horizon of {} months runs past the last representable month",
                    months_ahead
                ))
            })?;
            let expected_in = self.inflow.expected(k, month, inflow_multiplier);
            let expected_out = self.outflow.expected(k, month, outflow_multiplier);
            projections.push(Projection {
                month_key: month,
                expected_in,
                expected_out,
                expected_balance: expected_in - expected_out,
                scenario,
            });
        }

        Ok(projections)
    }
}

pub(crate) fn validate_horizon(months_ahead: u32) -> Result<()> {
    if months_ahead < 1 {
        return Err(Error::InvalidArgument(format!(
            "months_ahead must be at least 1, got {}",
            months_ahead
        )));
    }
    Ok(())
}

/// Project `months_ahead` months of `history` under one scenario
pub fn project(
    history: &History,
    months_ahead: u32,
    scenario: Scenario,
    config: &ForecastConfig,
) -> Result<Vec<Projection>> {
    validate_horizon(months_ahead)?;
    ProjectionModel::fit(history)?.project(months_ahead, scenario, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthlyAggregate;

    fn history(rows: &[(&str, f64, f64)]) -> History {
        History::new(
            rows.iter()
                .map(|(k, i, o)| MonthlyAggregate::new(k.parse().unwrap(), *i, *o))
                .collect(),
        )
        .unwrap()
    }

    fn sample() -> History {
        history(&[
            ("012024", 100_000.0, 60_000.0),
            ("022024", 110_000.0, 61_000.0),
            ("032024", 121_000.0, 62_000.0),
        ])
    }

    #[test]
    fn test_project_one_month_realistic() {
        let config = ForecastConfig::default();
        let projections = project(&sample(), 1, Scenario::Realistic, &config).unwrap();

        assert_eq!(projections.len(), 1);
        let p = &projections[0];
        assert_eq!(p.month_key.to_string(), "042024");
        assert!((p.expected_in - 133_100.0).abs() < 1e-6);
        assert_eq!(p.scenario, Scenario::Realistic);
        assert!((p.expected_balance - (p.expected_in - p.expected_out)).abs() < 1e-9);
    }

    #[test]
    fn test_project_rejects_zero_horizon() {
        let config = ForecastConfig::default();
        let err = project(&sample(), 0, Scenario::Realistic, &config).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_project_empty_history() {
        let config = ForecastConfig::default();
        let err = project(&History::default(), 3, Scenario::Realistic, &config).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_project_single_month_is_flat() {
        let config = ForecastConfig::default();
        let h = history(&[("062024", 5_000.0, 4_000.0)]);
        let projections = project(&h, 3, Scenario::Realistic, &config).unwrap();
        assert!(projections.iter().all(|p| p.expected_in == 5_000.0));
        assert!(projections.iter().all(|p| p.expected_out == 4_000.0));
    }

    #[test]
    fn test_project_stops_at_last_representable_month() {
        let config = ForecastConfig::default();
        let h = history(&[("119999", 1.0, 1.0)]);
        let projections = project(&h, 1, Scenario::Realistic, &config).unwrap();
        assert_eq!(projections[0].month_key.to_string(), "129999");

        let err = project(&h, 2, Scenario::Realistic, &config).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_project_crosses_year_boundary() {
        let config = ForecastConfig::default();
        let h = history(&[("112024", 1.0, 1.0), ("122024", 1.0, 1.0)]);
        let keys: Vec<String> = project(&h, 3, Scenario::Realistic, &config)
            .unwrap()
            .iter()
            .map(|p| p.month_key.to_string())
            .collect();
        assert_eq!(keys, vec!["012025", "022025", "032025"]);
    }

    #[test]
    fn test_scenario_multipliers_are_inverse_on_outflow() {
        let config = ForecastConfig::default();
        let model = ProjectionModel::fit(&sample()).unwrap();
        let pess = &model.project(1, Scenario::Pessimistic, &config).unwrap()[0];
        let real = &model.project(1, Scenario::Realistic, &config).unwrap()[0];
        let opt = &model.project(1, Scenario::Optimistic, &config).unwrap()[0];

        assert!(pess.expected_in < real.expected_in && real.expected_in < opt.expected_in);
        assert!(pess.expected_out > real.expected_out && real.expected_out > opt.expected_out);
        assert!(pess.expected_balance < opt.expected_balance);
    }
}
