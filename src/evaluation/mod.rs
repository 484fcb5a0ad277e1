//! Evaluation of a selected model: backtest accuracy, forward ROI, and
//! charts of predictions, forecasts and correlograms.

mod backtest;
mod correlogram;
mod overlay;
mod roi;

pub use backtest::evaluate_backtest;
pub use correlogram::{plot_acf, plot_pacf, DEFAULT_LAGS};
pub use overlay::{plot_forecasts, LabeledModel};
pub use roi::{evaluate_forecast, evaluate_forecast_with, round3, RoiHorizons, RoiSummary};
