//! ACF and PACF stem charts.

use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::plot::{Chart, RenderContext};
use crate::utils::stats::{acf, pacf};

/// Lags drawn when the caller does not choose.
pub const DEFAULT_LAGS: usize = 100;

const FIGURE_SIZE: (f64, f64) = (15.0, 5.0);

/// Autocorrelation stems with a ±1.96/√n band.
///
/// `lags` defaults to [`DEFAULT_LAGS`] and is capped at `n - 1`.
pub fn plot_acf(series: &TimeSeries, lags: Option<usize>, ctx: &mut RenderContext<'_>) -> Result<()> {
    let max_lag = lag_count(series, lags)?;
    let chart = correlogram("Autocorrelation", &acf(series.values(), max_lag), series.len());
    ctx.render(chart)
}

/// Partial autocorrelation stems with a ±1.96/√n band.
pub fn plot_pacf(series: &TimeSeries, lags: Option<usize>, ctx: &mut RenderContext<'_>) -> Result<()> {
    let max_lag = lag_count(series, lags)?;
    let chart = correlogram(
        "Partial Autocorrelation",
        &pacf(series.values(), max_lag),
        series.len(),
    );
    ctx.render(chart)
}

fn lag_count(series: &TimeSeries, lags: Option<usize>) -> Result<usize> {
    let n = series.len();
    if n < 2 {
        return Err(ForecastError::InsufficientData { needed: 2, got: n });
    }
    Ok(lags.unwrap_or(DEFAULT_LAGS).min(n - 1))
}

fn correlogram(title: &str, values: &[f64], n: usize) -> Chart {
    Chart::new(FIGURE_SIZE)
        .with_title(title)
        .stems(values, 1.96 / (n as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::ChartRecorder;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn seasonal_series(n: usize) -> TimeSeries {
        let start = Utc.with_ymd_and_hms(1996, 4, 1, 0, 0, 0).unwrap();
        let values = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin())
            .collect();
        TimeSeries::monthly(start, values).unwrap()
    }

    #[test]
    fn acf_chart_caps_lags_at_series_length() {
        let series = seasonal_series(40);
        let mut recorder = ChartRecorder::new();
        plot_acf(&series, None, &mut RenderContext::new(&mut recorder)).unwrap();

        let stems = recorder.charts()[0].stems.as_ref().unwrap();
        assert_eq!(stems.values.len(), 40);
        assert_eq!(stems.lags.last(), Some(&39));
        assert_relative_eq!(stems.significance, 1.96 / 40f64.sqrt());
        assert_eq!(recorder.charts()[0].figure_size, (15.0, 5.0));
    }

    #[test]
    fn pacf_chart_uses_requested_lags() {
        let series = seasonal_series(120);
        let mut recorder = ChartRecorder::new();
        plot_pacf(&series, Some(24), &mut RenderContext::new(&mut recorder)).unwrap();

        let chart = &recorder.charts()[0];
        assert_eq!(chart.title.as_deref(), Some("Partial Autocorrelation"));
        assert_eq!(chart.stems.as_ref().map(|s| s.values.len()), Some(25));
    }

    #[test]
    fn correlogram_needs_two_points() {
        let start = Utc.with_ymd_and_hms(1996, 4, 1, 0, 0, 0).unwrap();
        let series = TimeSeries::monthly(start, vec![1.0]).unwrap();
        let mut recorder = ChartRecorder::new();
        let result = plot_acf(&series, None, &mut RenderContext::new(&mut recorder));
        assert!(matches!(result, Err(ForecastError::InsufficientData { .. })));
    }
}
