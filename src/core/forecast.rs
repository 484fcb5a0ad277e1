//! Forecast result structure for holding predictions.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};

/// Predicted means aligned to timestamps, with a confidence band.
///
/// Used both for in-sample predictions and for forward forecasts.
#[derive(Debug, Clone, Default)]
pub struct Forecast {
    timestamps: Vec<DateTime<Utc>>,
    mean: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    level: f64,
}

impl Forecast {
    /// Create an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecast with a confidence band at `level`.
    pub fn with_intervals(
        timestamps: Vec<DateTime<Utc>>,
        mean: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        level: f64,
    ) -> Result<Self> {
        for len in [timestamps.len(), lower.len(), upper.len()] {
            if len != mean.len() {
                return Err(ForecastError::DimensionMismatch {
                    expected: mean.len(),
                    got: len,
                });
            }
        }

        Ok(Self {
            timestamps,
            mean,
            lower,
            upper,
            level,
        })
    }

    /// Number of predicted periods.
    pub fn horizon(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Predicted mean sequence.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Confidence level of the band (e.g. 0.95).
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Predicted mean `periods` steps ahead (1-indexed).
    ///
    /// Fails with `InsufficientHorizon` when the forecast is shorter than
    /// `periods`.
    pub fn mean_at_period(&self, periods: usize) -> Result<f64> {
        if periods == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon periods are 1-indexed".to_string(),
            ));
        }
        self.mean
            .get(periods - 1)
            .copied()
            .ok_or(ForecastError::InsufficientHorizon {
                needed: periods,
                got: self.mean.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn stamps(n: usize) -> Vec<DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2018, 5, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| base + Duration::days(i as i64)).collect()
    }

    #[test]
    fn forecast_empty_state() {
        let forecast = Forecast::new();
        assert!(forecast.is_empty());
        assert_eq!(forecast.horizon(), 0);
    }

    #[test]
    fn forecast_with_intervals_keeps_band() {
        let forecast = Forecast::with_intervals(
            stamps(2),
            vec![2.0, 3.0],
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            0.95,
        )
        .unwrap();

        assert_eq!(forecast.mean(), &[2.0, 3.0]);
        assert_eq!(forecast.lower(), &[1.0, 2.0]);
        assert_eq!(forecast.upper(), &[3.0, 4.0]);
        assert_eq!(forecast.level(), 0.95);
        assert_eq!(forecast.horizon(), 2);
    }

    #[test]
    fn forecast_rejects_ragged_band() {
        let result = Forecast::with_intervals(stamps(2), vec![2.0, 3.0], vec![1.0], vec![3.0, 4.0], 0.95);
        assert!(matches!(
            result,
            Err(ForecastError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn mean_at_period_is_one_indexed_and_bounded() {
        let forecast = Forecast::with_intervals(
            stamps(3),
            vec![10.0, 11.0, 12.0],
            vec![9.0, 10.0, 11.0],
            vec![11.0, 12.0, 13.0],
            0.95,
        )
        .unwrap();

        assert_eq!(forecast.mean_at_period(1).unwrap(), 10.0);
        assert_eq!(forecast.mean_at_period(3).unwrap(), 12.0);
        assert_eq!(
            forecast.mean_at_period(4),
            Err(ForecastError::InsufficientHorizon { needed: 4, got: 3 })
        );
        assert!(forecast.mean_at_period(0).is_err());
    }
}
