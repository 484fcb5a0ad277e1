//! Statistical utility functions.

use crate::error::{ForecastError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Two-sided standard normal critical value for a confidence `level`.
///
/// `level = 0.95` gives ≈ 1.96.
pub fn normal_critical_value(level: f64) -> Result<f64> {
    if !(level > 0.0 && level < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "confidence level must be in (0, 1), got {level}"
        )));
    }
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ForecastError::ComputationError(e.to_string()))?;
    Ok(normal.inverse_cdf((1.0 + level) / 2.0))
}

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample autocorrelation for lags `0..=max_lag`.
///
/// Lags at or beyond the series length are omitted.
pub fn acf(values: &[f64], max_lag: usize) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return vec![];
    }

    let m = mean(values);
    let denominator: f64 = values.iter().map(|x| (x - m).powi(2)).sum();

    (0..=max_lag.min(n - 1))
        .map(|lag| {
            if denominator < 1e-12 {
                return if lag == 0 { 1.0 } else { 0.0 };
            }
            let numerator: f64 = (lag..n)
                .map(|i| (values[i] - m) * (values[i - lag] - m))
                .sum();
            numerator / denominator
        })
        .collect()
}

/// Partial autocorrelation for lags `0..=max_lag` (Durbin-Levinson).
///
/// Stops early, returning the lags computed so far, if the recursion
/// becomes singular.
pub fn pacf(values: &[f64], max_lag: usize) -> Vec<f64> {
    let rho = acf(values, max_lag);
    if rho.is_empty() {
        return vec![];
    }

    let mut out = vec![1.0];
    let mut phi: Vec<f64> = Vec::new();

    for k in 1..rho.len() {
        let num = rho[k] - (1..k).map(|j| phi[j - 1] * rho[k - j]).sum::<f64>();
        let den = 1.0 - (1..k).map(|j| phi[j - 1] * rho[j]).sum::<f64>();
        if den.abs() < 1e-12 {
            break;
        }

        let phi_kk = num / den;
        let mut next: Vec<f64> = (1..k).map(|j| phi[j - 1] - phi_kk * phi[k - j - 1]).collect();
        next.push(phi_kk);
        phi = next;
        out.push(phi_kk);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn normal_critical_value_known_levels() {
        assert_relative_eq!(normal_critical_value(0.95).unwrap(), 1.959964, epsilon = 1e-5);
        assert_relative_eq!(normal_critical_value(0.99).unwrap(), 2.575829, epsilon = 1e-5);
        assert!(normal_critical_value(1.0).is_err());
        assert!(normal_critical_value(0.0).is_err());
    }

    #[test]
    fn mean_of_empty_is_nan() {
        assert!(mean(&[]).is_nan());
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn acf_lag_zero_is_one() {
        let series = vec![1.0, 3.0, 2.0, 5.0, 4.0];
        let r = acf(&series, 2);
        assert_eq!(r.len(), 3);
        assert_relative_eq!(r[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn acf_caps_at_series_length() {
        let series = vec![1.0, 2.0, 3.0];
        assert_eq!(acf(&series, 100).len(), 3);
    }

    #[test]
    fn acf_constant_series() {
        let r = acf(&[5.0; 10], 3);
        assert_eq!(r, vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn pacf_ar1_cuts_off_after_lag_one() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut series = vec![0.0];
        for i in 1..500 {
            let shock: f64 = rng.gen_range(-1.0..1.0);
            series.push(0.8 * series[i - 1] + shock);
        }

        let p = pacf(&series, 5);
        assert_eq!(p.len(), 6);
        assert!(p[1] > 0.6, "expected strong lag-1 PACF, got {}", p[1]);
        for lag in 2..=5 {
            assert!(p[lag].abs() < 0.2, "lag {} PACF {}", lag, p[lag]);
        }
    }

    #[test]
    fn pacf_first_lag_equals_acf() {
        let series = vec![2.0, 4.0, 3.0, 6.0, 5.0, 7.0, 6.5, 8.0];
        let r = acf(&series, 3);
        let p = pacf(&series, 3);
        assert_relative_eq!(p[1], r[1], epsilon = 1e-12);
    }
}
