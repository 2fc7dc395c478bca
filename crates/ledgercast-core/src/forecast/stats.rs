//! Descriptive statistics over small in-memory series

use serde::{Deserialize, Serialize};

/// Summary statistics of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// `std_dev / |mean|`, 0 when the mean is 0
    pub coefficient_of_variation: f64,
}

/// Calculate mean of a slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Describe a series, `None` when it is empty
pub fn describe(values: &[f64]) -> Option<SeriesStats> {
    let mean = mean(values)?;

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    let std_dev = variance.sqrt();

    let coefficient_of_variation = if mean.abs() < f64::EPSILON {
        0.0
    } else {
        std_dev / mean.abs()
    };

    Some(SeriesStats {
        count: values.len(),
        mean,
        min,
        max,
        std_dev,
        coefficient_of_variation,
    })
}

/// Round to `digits` decimal places (0 = whole units)
pub fn round_to_digits(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_empty() {
        assert!(describe(&[]).is_none());
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn test_describe_constant_series() {
        let stats = describe(&[500.0, 500.0, 500.0]).unwrap();
        assert_eq!(stats.mean, 500.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.coefficient_of_variation, 0.0);
    }

    #[test]
    fn test_describe_population_std_dev() {
        // Classic example: population std dev of this set is exactly 2
        let stats = describe(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count, 8);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
        assert!((stats.coefficient_of_variation - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_zero_mean_has_zero_cv() {
        let stats = describe(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(stats.coefficient_of_variation, 0.0);
    }

    #[test]
    fn test_round_to_digits() {
        assert_eq!(round_to_digits(1234.56, 0), 1235.0);
        assert_eq!(round_to_digits(1234.5649, 2), 1234.56);
        assert_eq!(round_to_digits(-0.4, 0), -0.0);
    }
}
