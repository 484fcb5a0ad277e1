//! # sarima_roi
//!
//! Seasonal ARIMA model selection and evaluation for real estate price series.
//!
//! Grid-searches non-seasonal and seasonal orders with a failure-tolerant
//! sweep ranked by information criterion, backtests the chosen model
//! against held-out history, forecasts forward and derives 1-year and
//! 5-year return-on-investment figures. Charts are described as data and
//! handed to a caller-supplied sink.

#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod plot;
pub mod search;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Forecast, Frequency, TimeSeries};
    pub use crate::error::{ForecastError, Result};
    pub use crate::evaluation::{
        evaluate_backtest, evaluate_forecast, plot_acf, plot_forecasts, plot_pacf, LabeledModel,
        RoiHorizons, RoiSummary,
    };
    pub use crate::models::{FittedModel, Fitter, Order, SarimaConfig, SarimaFitter, SeasonalOrder};
    pub use crate::plot::{ChartRecorder, ChartSink, JsonChartSink, RenderContext};
    pub use crate::search::{best, search, FitOutcome, FitStatus, GridSearch, SearchSpace};
}
