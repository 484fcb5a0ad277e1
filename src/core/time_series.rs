//! TimeSeries data structure for representing temporal data.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Datelike, Duration, Months, Utc};

/// Sampling frequency used to stamp forecast periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Calendar months (day-of-month preserved where it exists).
    Monthly,
    /// Fixed-length step.
    Fixed(Duration),
}

impl Frequency {
    /// Timestamp `periods` steps after `from`.
    ///
    /// Monthly steps from the last day of a month land on the last day of
    /// the target month.
    pub fn advance(&self, from: DateTime<Utc>, periods: u32) -> Option<DateTime<Utc>> {
        match self {
            Frequency::Monthly => {
                let shifted = from.checked_add_months(Months::new(periods))?;
                if is_month_end(from) {
                    end_of_month(shifted)
                } else {
                    Some(shifted)
                }
            }
            Frequency::Fixed(step) => {
                let total = step.checked_mul(i32::try_from(periods).ok()?)?;
                from.checked_add_signed(total)
            }
        }
    }

    /// Infer the frequency from strictly increasing timestamps.
    ///
    /// Returns `None` for fewer than two timestamps.
    pub fn infer(timestamps: &[DateTime<Utc>]) -> Option<Frequency> {
        if timestamps.len() < 2 {
            return None;
        }

        let monthly = timestamps
            .windows(2)
            .all(|w| Frequency::Monthly.advance(w[0], 1) == Some(w[1]));
        if monthly {
            return Some(Frequency::Monthly);
        }

        // Median spacing for irregular fixed steps
        let mut deltas: Vec<Duration> = timestamps.windows(2).map(|w| w[1] - w[0]).collect();
        deltas.sort();
        Some(Frequency::Fixed(deltas[deltas.len() / 2]))
    }
}

fn is_month_end(t: DateTime<Utc>) -> bool {
    t.date_naive().succ_opt().is_some_and(|next| next.month() != t.month())
}

/// Same time of day on the last day of `t`'s month.
fn end_of_month(t: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let first = t.with_day(1)?;
    let next_first = first.checked_add_months(Months::new(1))?;
    next_first.checked_sub_signed(Duration::days(1))
}

/// A univariate time series with timestamps and values.
///
/// Timestamps are strictly increasing and the series is never empty.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
    label: Option<String>,
    frequency: Option<Frequency>,
}

impl TimeSeries {
    /// Create a univariate time series, inferring its frequency.
    pub fn univariate(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.is_empty() || values.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        if timestamps.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }

        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(ForecastError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::MissingValues);
        }

        let frequency = Frequency::infer(&timestamps);

        Ok(Self {
            timestamps,
            values,
            label: None,
            frequency,
        })
    }

    /// Create a monthly series starting at `start`.
    pub fn monthly(start: DateTime<Utc>, values: Vec<f64>) -> Result<Self> {
        let timestamps = (0..values.len())
            .map(|i| {
                u32::try_from(i)
                    .ok()
                    .and_then(|i| Frequency::Monthly.advance(start, i))
                    .ok_or_else(|| {
                        ForecastError::TimestampError("monthly timestamp overflow".to_string())
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut series = Self::univariate(timestamps, values)?;
        series.frequency = Some(Frequency::Monthly);
        Ok(series)
    }

    /// Attach a display label (e.g. a zipcode).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Override the inferred frequency.
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    pub fn first_timestamp(&self) -> DateTime<Utc> {
        self.timestamps[0]
    }

    pub fn last_timestamp(&self) -> DateTime<Utc> {
        self.timestamps[self.timestamps.len() - 1]
    }

    /// Last observed value.
    pub fn last_value(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Index of the first observation at or after `date`.
    pub fn position_at_or_after(&self, date: DateTime<Utc>) -> Option<usize> {
        let idx = self.timestamps.partition_point(|t| *t < date);
        (idx < self.len()).then_some(idx)
    }

    /// Timestamps of the `steps` periods following the last observation.
    pub fn future_timestamps(&self, steps: usize) -> Result<Vec<DateTime<Utc>>> {
        let frequency = self.frequency.ok_or_else(|| {
            ForecastError::TimestampError("cannot infer frequency from a single observation".to_string())
        })?;
        let last = self.last_timestamp();

        (1..=steps)
            .map(|k| {
                u32::try_from(k)
                    .ok()
                    .and_then(|k| frequency.advance(last, k))
                    .ok_or_else(|| {
                        ForecastError::TimestampError("forecast timestamp overflow".to_string())
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1996, 4, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn time_series_constructs_univariate_data() {
        let ts = TimeSeries::monthly(start(), vec![1.0, 2.0, 3.0]).unwrap();

        assert_eq!(ts.len(), 3);
        assert!(!ts.is_empty());
        assert_eq!(ts.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(ts.last_value(), 3.0);
        assert_eq!(
            ts.last_timestamp(),
            Utc.with_ymd_and_hms(1996, 6, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn time_series_rejects_empty_input() {
        assert!(matches!(
            TimeSeries::univariate(vec![], vec![]),
            Err(ForecastError::EmptyData)
        ));
    }

    #[test]
    fn time_series_rejects_unordered_timestamps() {
        let a = start();
        let b = a + Duration::days(1);
        let result = TimeSeries::univariate(vec![b, a], vec![1.0, 2.0]);
        assert!(matches!(result, Err(ForecastError::TimestampError(_))));
    }

    #[test]
    fn time_series_rejects_length_mismatch() {
        let result = TimeSeries::univariate(vec![start()], vec![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(ForecastError::DimensionMismatch { expected: 1, got: 2 })
        ));
    }

    #[test]
    fn time_series_rejects_nan() {
        let result = TimeSeries::monthly(start(), vec![1.0, f64::NAN]);
        assert!(matches!(result, Err(ForecastError::MissingValues)));
    }

    #[test]
    fn frequency_infers_calendar_months() {
        let ts = TimeSeries::monthly(start(), vec![1.0; 24]).unwrap();
        let rebuilt = TimeSeries::univariate(ts.timestamps().to_vec(), ts.values().to_vec()).unwrap();
        assert_eq!(rebuilt.frequency(), Some(Frequency::Monthly));
    }

    #[test]
    fn frequency_infers_fixed_step() {
        let timestamps: Vec<_> = (0..5).map(|i| start() + Duration::days(7 * i)).collect();
        let ts = TimeSeries::univariate(timestamps, vec![1.0; 5]).unwrap();
        assert_eq!(ts.frequency(), Some(Frequency::Fixed(Duration::days(7))));
    }

    #[test]
    fn future_timestamps_follow_months() {
        let ts = TimeSeries::monthly(start(), vec![1.0; 3]).unwrap();
        let future = ts.future_timestamps(2).unwrap();
        assert_eq!(future[0], Utc.with_ymd_and_hms(1996, 7, 1, 0, 0, 0).unwrap());
        assert_eq!(future[1], Utc.with_ymd_and_hms(1996, 8, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn future_timestamps_need_frequency() {
        let ts = TimeSeries::univariate(vec![start()], vec![1.0]).unwrap();
        assert!(matches!(
            ts.future_timestamps(1),
            Err(ForecastError::TimestampError(_))
        ));
        let ts = ts.with_frequency(Frequency::Monthly);
        assert_eq!(ts.future_timestamps(1).unwrap().len(), 1);
    }

    #[test]
    fn position_at_or_after_finds_cutoff() {
        let ts = TimeSeries::monthly(start(), vec![1.0; 12]).unwrap();
        let cutoff = Utc.with_ymd_and_hms(1996, 9, 15, 0, 0, 0).unwrap();
        assert_eq!(ts.position_at_or_after(cutoff), Some(6));
        assert_eq!(ts.position_at_or_after(start()), Some(0));

        let past_end = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(ts.position_at_or_after(past_end), None);
    }

    #[test]
    fn frequency_infers_month_end_stamps() {
        let timestamps: Vec<_> = [(1, 31), (2, 28), (3, 31), (4, 30), (5, 31), (6, 30)]
            .iter()
            .map(|&(m, d)| Utc.with_ymd_and_hms(2018, m, d, 0, 0, 0).unwrap())
            .collect();
        let ts = TimeSeries::univariate(timestamps, vec![1.0; 6]).unwrap();
        assert_eq!(ts.frequency(), Some(Frequency::Monthly));

        let future = ts.future_timestamps(12).unwrap();
        assert_eq!(future[0], Utc.with_ymd_and_hms(2018, 7, 31, 0, 0, 0).unwrap());
        assert_eq!(future[1], Utc.with_ymd_and_hms(2018, 8, 31, 0, 0, 0).unwrap());
        assert_eq!(future[2], Utc.with_ymd_and_hms(2018, 9, 30, 0, 0, 0).unwrap());
        assert_eq!(future[7], Utc.with_ymd_and_hms(2019, 2, 28, 0, 0, 0).unwrap());
        assert_eq!(future[11], Utc.with_ymd_and_hms(2019, 6, 30, 0, 0, 0).unwrap());
    }

    #[test]
    fn monthly_constructor_keeps_month_ends() {
        let start = Utc.with_ymd_and_hms(2019, 12, 31, 0, 0, 0).unwrap();
        let ts = TimeSeries::monthly(start, vec![1.0; 3]).unwrap();
        assert_eq!(
            ts.timestamps()[2],
            Utc.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap()
        );
        assert_eq!(
            ts.future_timestamps(1).unwrap()[0],
            Utc.with_ymd_and_hms(2020, 3, 31, 0, 0, 0).unwrap()
        );
    }
}
