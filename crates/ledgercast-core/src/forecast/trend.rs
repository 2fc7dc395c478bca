//! Month-over-month growth estimation

use tracing::debug;

use crate::models::GrowthEstimate;

/// Minimum points needed to measure any change
pub const MIN_GROWTH_POINTS: usize = 2;

/// Average month-over-month relative change of a chronological series
///
/// Each interval contributes `(cur - prev) / |prev|`. Intervals whose previous
/// value is zero are skipped. Fewer than two points, or no usable interval,
/// yields a rate of 0 flagged as insufficient data.
pub fn growth_rate(values: &[f64]) -> GrowthEstimate {
    if values.len() < MIN_GROWTH_POINTS {
        return GrowthEstimate::insufficient();
    }

    let mut total_change = 0.0;
    let mut intervals_used = 0usize;

    for pair in values.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        if prev.abs() < f64::EPSILON {
            continue;
        }
        total_change += (cur - prev) / prev.abs();
        intervals_used += 1;
    }

    if intervals_used == 0 {
        debug!(
            points = values.len(),
            "Every interval had a zero base; growth rate unavailable"
        );
        return GrowthEstimate::insufficient();
    }

    GrowthEstimate {
        rate_per_month: total_change / intervals_used as f64,
        intervals_used,
        insufficient_data: false,
    }
}

/// Compounded growth multiplier after `months` months
///
/// A rate below -100% would flip the sign of the projection, so the base is
/// floored at zero.
pub fn compound(rate_per_month: f64, months: u32) -> f64 {
    (1.0 + rate_per_month).max(0.0).powi(months as i32)
}
