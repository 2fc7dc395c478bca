//! Seasonality factors by calendar month
//!
//! This is plain index normalisation: each represented month's average over
//! the average of all represented months. It is not a seasonal decomposition
//! and makes no attempt to separate trend from season.

use std::collections::BTreeMap;

use crate::models::MonthKey;

/// Factor used for months with no history
pub const NEUTRAL_FACTOR: f64 = 1.0;

/// Seasonality factor for every month index 1..=12
///
/// The overall average is the mean of the per-month averages, so the factors
/// of represented months average to exactly 1.0 even when some calendar months
/// appear more often than others.
pub fn seasonality_factors(series: &[(MonthKey, f64)]) -> BTreeMap<u32, f64> {
    let mut buckets: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for (key, value) in series {
        let bucket = buckets.entry(key.month()).or_insert((0.0, 0));
        bucket.0 += value;
        bucket.1 += 1;
    }

    let month_averages: BTreeMap<u32, f64> = buckets
        .into_iter()
        .map(|(month, (sum, count))| (month, sum / count as f64))
        .collect();

    let mut factors: BTreeMap<u32, f64> = (1..=12).map(|m| (m, NEUTRAL_FACTOR)).collect();

    if month_averages.is_empty() {
        return factors;
    }

    let overall = month_averages.values().sum::<f64>() / month_averages.len() as f64;
    if overall.abs() < f64::EPSILON {
        return factors;
    }

    for (month, average) in month_averages {
        factors.insert(month, average / overall);
    }

    factors
}

/// Factor for one month index, neutral if absent
pub fn factor_for(factors: &BTreeMap<u32, f64>, month: u32) -> f64 {
    factors.get(&month).copied().unwrap_or(NEUTRAL_FACTOR)
}
