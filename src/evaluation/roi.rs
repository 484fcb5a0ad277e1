//! Forward forecasts and horizon return-on-investment.

use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::FittedModel;
use crate::plot::RenderContext;
use serde::{Deserialize, Serialize};
use tracing::info;

const DEFAULT_LEVEL: f64 = 0.95;

/// Forecast periods at which ROI is read, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiHorizons {
    /// One year of monthly periods.
    pub short: usize,
    /// Five years of monthly periods.
    pub long: usize,
}

impl Default for RoiHorizons {
    fn default() -> Self {
        Self { short: 12, long: 60 }
    }
}

impl RoiHorizons {
    pub fn new(short: usize, long: usize) -> Result<Self> {
        if short == 0 || long == 0 {
            return Err(ForecastError::InvalidParameter(
                "ROI horizons must be at least one period".to_string(),
            ));
        }
        Ok(Self { short, long })
    }

    /// Periods a forecast must cover to read both horizons.
    pub fn required_steps(&self) -> usize {
        self.short.max(self.long)
    }
}

/// ROI relative to the last observed value, rounded to 3 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiSummary {
    pub roi_1yr: f64,
    pub roi_5yr: f64,
    pub horizons: RoiHorizons,
    pub last_value: f64,
}

/// Round half away from zero to 3 decimal places.
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Forecast `steps` periods and derive 1-year and 5-year ROI.
///
/// See [`evaluate_forecast_with`].
pub fn evaluate_forecast<M: FittedModel + ?Sized>(
    series: &TimeSeries,
    model: &M,
    steps: usize,
    ctx: Option<&mut RenderContext<'_>>,
) -> Result<RoiSummary> {
    evaluate_forecast_with(series, model, steps, RoiHorizons::default(), ctx)
}

/// Forecast `steps` periods and read ROI at `horizons`.
///
/// When a render context is given, the `steps`-period forecast is charted
/// against the history. If `steps` does not exceed the long horizon the
/// forecast is requested again at exactly that length and the shorter one is
/// discarded. A model that cannot forecast far enough yields
/// [`ForecastError::InsufficientHorizon`].
pub fn evaluate_forecast_with<M: FittedModel + ?Sized>(
    series: &TimeSeries,
    model: &M,
    steps: usize,
    horizons: RoiHorizons,
    ctx: Option<&mut RenderContext<'_>>,
) -> Result<RoiSummary> {
    if steps == 0 {
        return Err(ForecastError::InvalidParameter(
            "forecast steps must be positive".to_string(),
        ));
    }

    let level = ctx.as_ref().map_or(DEFAULT_LEVEL, |c| c.level());
    let mut forecast = model.forecast(steps, level)?;

    if let Some(ctx) = ctx {
        let chart = ctx
            .chart()
            .line("observed", series.timestamps(), series.values())
            .line("forecast", forecast.timestamps(), forecast.mean())
            .band(forecast.timestamps(), forecast.lower(), forecast.upper())
            .with_legend("upper left");
        ctx.render(chart)?;
    }

    let required = horizons.required_steps();
    if steps <= required {
        forecast = model.forecast(required, level)?;
    }

    let last_value = series.last_value();
    if last_value == 0.0 {
        return Err(ForecastError::ComputationError(
            "ROI is undefined for a last observed value of zero".to_string(),
        ));
    }
    let roi = |periods: usize| -> Result<f64> {
        let predicted = forecast.mean_at_period(periods)?;
        Ok(round3((predicted - last_value) / last_value))
    };

    let summary = RoiSummary {
        roi_1yr: roi(horizons.short)?,
        roi_5yr: roi(horizons.long)?,
        horizons,
        last_value,
    };
    info!(
        "ROI after {} periods: {}, after {} periods: {}",
        horizons.short, summary.roi_1yr, horizons.long, summary.roi_5yr
    );

    Ok(summary)
}
