//! Budget-line suggestions
//!
//! A suggestion for an account is its historical monthly mean, pushed forward
//! with the same growth and seasonality logic as projections, and graded by
//! how much the account moves around month to month.

use tracing::debug;

use crate::config::ForecastConfig;
use crate::error::{Error, Result};
use crate::models::{BudgetLine, BudgetSuggestion, Confidence, History, Metric, MonthKey};

use super::seasonality::{factor_for, seasonality_factors};
use super::stats::{describe, round_to_digits};
use super::trend::{compound, growth_rate};

/// Minimum months of account history before suggesting anything
pub const MIN_BASIS_MONTHS: usize = 3;

/// Reason reported when there are fewer than `MIN_BASIS_MONTHS`
pub const INSUFFICIENT_HISTORY: &str = "insufficient history";

/// Grade a coefficient of variation against the configured thresholds
pub fn classify_confidence(coefficient_of_variation: f64, config: &ForecastConfig) -> Confidence {
    if coefficient_of_variation < config.high_confidence_cv {
        Confidence::High
    } else if coefficient_of_variation < config.medium_confidence_cv {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Suggest a budget amount for `account_id` in `target_month`
///
/// Only months strictly before the target count as basis, and amounts are
/// taken as magnitudes. Too little history is not an error: it comes back as
/// `BudgetLine::Unavailable`.
pub fn suggest_budget_line(
    history: &History,
    account_id: &str,
    target_month: MonthKey,
    config: &ForecastConfig,
) -> Result<BudgetLine> {
    if account_id.trim().is_empty() {
        return Err(Error::InvalidArgument("Account id is empty".into()));
    }

    let series: Vec<(MonthKey, f64)> = history
        .before(target_month)
        .series(&Metric::Account(account_id.to_string()))
        .into_iter()
        .map(|(k, v)| (k, v.abs()))
        .collect();

    let basis_months = series.len();
    let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();

    let stats = match describe(&values) {
        Some(stats) if basis_months >= MIN_BASIS_MONTHS => stats,
        _ => {
            debug!(
                account = account_id,
                basis_months,
                target = %target_month,
                "Not enough history for budget suggestion"
            );
            return Ok(BudgetLine::Unavailable {
                account_id: account_id.to_string(),
                basis_months,
                reason: INSUFFICIENT_HISTORY.to_string(),
            });
        }
    };

    let growth = growth_rate(&values);
    let seasonality = seasonality_factors(&series);

    // Basis is strictly before the target, so this is at least 1
    let last_basis = series[basis_months - 1].0;
    let months_out = last_basis.months_until(target_month).max(0) as u32;

    let projected = stats.mean
        * compound(growth.rate_per_month, months_out)
        * factor_for(&seasonality, target_month.month());
    let suggested_amount = round_to_digits(projected.max(0.0), config.minor_unit_digits);

    let confidence = classify_confidence(stats.coefficient_of_variation, config);

    debug!(
        account = account_id,
        basis_months,
        target = %target_month,
        mean = stats.mean,
        cv = stats.coefficient_of_variation,
        confidence = confidence.as_str(),
        "Budget suggestion computed"
    );

    Ok(BudgetLine::Suggested(BudgetSuggestion {
        account_id: account_id.to_string(),
        target_month,
        suggested_amount,
        confidence,
        basis_months,
        mean_amount: stats.mean,
        min_amount: stats.min,
        max_amount: stats.max,
        coefficient_of_variation: stats.coefficient_of_variation,
    }))
}
