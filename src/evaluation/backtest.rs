//! Accuracy of in-sample predictions against held-out history.

use crate::core::{Forecast, TimeSeries};
use crate::error::Result;
use crate::models::FittedModel;
use crate::plot::RenderContext;
use crate::utils::metrics::{mae, rmse};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Predict from `cutoff` to the end of `series`, chart the result and return
/// the RMSE against the observed values.
///
/// With `dynamic = true` every prediction after the first conditions on
/// earlier predictions instead of the observed history. The model's
/// in-sample prediction decides what an out-of-range cutoff means; its
/// error is returned unchanged.
pub fn evaluate_backtest<M: FittedModel + ?Sized>(
    series: &TimeSeries,
    model: &M,
    cutoff: DateTime<Utc>,
    dynamic: bool,
    ctx: &mut RenderContext<'_>,
) -> Result<f64> {
    let prediction = model.predict_in_sample(cutoff, dynamic, ctx.level())?;

    let label = if dynamic {
        format!("dynamic prediction from {}", cutoff.format("%Y-%m-%d"))
    } else {
        "one-step-ahead prediction".to_string()
    };
    let chart = ctx
        .chart()
        .line("observed", series.timestamps(), series.values())
        .colored_line(
            label,
            prediction.timestamps(),
            prediction.mean(),
            "darkorange",
            0.9,
        )
        .band(prediction.timestamps(), prediction.lower(), prediction.upper())
        .with_legend("upper left");
    ctx.render(chart)?;

    let (observed, predicted) = align(series, &prediction);
    let error = rmse(&observed, &predicted);
    debug!("MAE over {} aligned points: {:.4}", observed.len(), mae(&observed, &predicted));
    info!("RMSE: {:.4}", error);

    Ok(error)
}

/// Observed and predicted values at the timestamps both share.
fn align(series: &TimeSeries, prediction: &Forecast) -> (Vec<f64>, Vec<f64>) {
    prediction
        .timestamps()
        .iter()
        .zip(prediction.mean())
        .filter_map(|(t, p)| {
            series
                .timestamps()
                .binary_search(t)
                .ok()
                .map(|i| (series.values()[i], *p))
        })
        .unzip()
}
