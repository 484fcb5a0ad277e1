//! Select, backtest and forecast SARIMA models for a few zipcodes.
//!
//! Charts are written to stdout as JSON lines; logs go to stderr.
//!
//! ```sh
//! RUST_LOG=sarima_roi=debug cargo run --example zip_roi
//! ```

use chrono::{TimeZone, Utc};
use sarima_roi::core::TimeSeries;
use sarima_roi::evaluation::{
    evaluate_backtest, evaluate_forecast, plot_acf, plot_forecasts, plot_pacf, LabeledModel,
};
use sarima_roi::models::{SarimaFitter, SarimaModel};
use sarima_roi::plot::{JsonChartSink, RenderContext};
use sarima_roi::search::{best, GridSearch, SearchSpace};

/// Synthetic median home values: trend, yearly cycle and a slow wobble.
fn zipcode_series(label: &str, base: f64, growth: f64, phase: f64) -> sarima_roi::Result<TimeSeries> {
    let start = Utc
        .with_ymd_and_hms(2008, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| sarima_roi::ForecastError::TimestampError("bad start".to_string()))?;
    let values = (0..124)
        .map(|i| {
            let t = i as f64;
            base + growth * t
                + 0.015 * base * (2.0 * std::f64::consts::PI * t / 12.0 + phase).sin()
                + 0.004 * base * (t / 7.0).cos()
        })
        .collect();
    Ok(TimeSeries::monthly(start, values)?.with_label(label))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sarima_roi=info".parse()?),
        )
        .init();

    let zipcodes = [
        zipcode_series("Boston 02128", 420_000.0, 1_500.0, 0.0)?,
        zipcode_series("Denver 80205", 280_000.0, 1_100.0, 0.6)?,
        zipcode_series("Austin 78702", 240_000.0, 1_300.0, 1.1)?,
    ];

    let space: SearchSpace = serde_json::from_str(
        r#"{"p":[0,1],"d":[1],"q":[0,1],"seasonal_p":[0,1],"seasonal_d":[1],"seasonal_q":[0,1],"s":[12]}"#,
    )?;
    let engine = GridSearch::new(SarimaFitter::new()).retain_models(true);

    let stdout = std::io::stdout();
    let mut sink = JsonChartSink::new(stdout.lock());
    let mut ctx = RenderContext::new(&mut sink);

    let mut selected: Vec<(&TimeSeries, SarimaModel)> = Vec::new();
    for series in &zipcodes {
        let label = series.label().unwrap_or("series");
        plot_acf(series, None, &mut ctx)?;
        plot_pacf(series, Some(48), &mut ctx)?;

        let outcomes = engine.search(series, &space)?;
        let Some(top) = best(&outcomes) else {
            eprintln!("{label}: no combination could be fitted");
            continue;
        };
        eprintln!(
            "{label}: best {} x {} (AIC {:.2})",
            top.order,
            top.seasonal_order,
            top.score()
        );

        let Some(model) = top.model().cloned() else {
            continue;
        };
        let cutoff = series.timestamps()[series.len() - 24];
        let one_step = evaluate_backtest(series, &model, cutoff, false, &mut ctx)?;
        let dynamic = evaluate_backtest(series, &model, cutoff, true, &mut ctx)?;
        let roi = evaluate_forecast(series, &model, 24, Some(&mut ctx))?;
        eprintln!(
            "{label}: RMSE one-step {one_step:.0}, dynamic {dynamic:.0}; ROI 1yr {} 5yr {}",
            roi.roi_1yr, roi.roi_5yr
        );

        selected.push((series, model));
    }

    let entries: Vec<LabeledModel<'_>> = selected
        .iter()
        .map(|(series, model)| {
            LabeledModel::new(series.label().unwrap_or("series"), series, model)
        })
        .collect();
    plot_forecasts(&entries, 60, Some("Five-year forecasts"), &mut ctx)?;

    Ok(())
}
