//! Seams between the search/evaluation core and a model-fitting capability.

use crate::core::{Forecast, TimeSeries};
use crate::error::Result;
use crate::models::{Order, SeasonalOrder};
use chrono::{DateTime, Utc};

/// A model that has been fitted to one series.
///
/// This trait is object-safe and can be used as `&dyn FittedModel`.
pub trait FittedModel {
    /// Information criterion of the fit; lower is better.
    fn information_criterion(&self) -> f64;

    /// In-sample predictions from the first observation at or after `start`
    /// to the end of the training series.
    ///
    /// With `dynamic = false` each point conditions on the true prior
    /// observations; with `dynamic = true` points after `start` condition on
    /// earlier predictions.
    fn predict_in_sample(&self, start: DateTime<Utc>, dynamic: bool, level: f64)
        -> Result<Forecast>;

    /// Forecast `steps` periods past the end of the training series.
    fn forecast(&self, steps: usize, level: f64) -> Result<Forecast>;

    /// Get the model name.
    fn name(&self) -> &str;
}

/// The fitting capability consumed by the grid search.
pub trait Fitter {
    type Model: FittedModel;

    /// Fit one (order, seasonal order) combination to `series`.
    fn fit(
        &self,
        series: &TimeSeries,
        order: Order,
        seasonal_order: SeasonalOrder,
    ) -> Result<Self::Model>;
}

impl<F, M> Fitter for F
where
    F: Fn(&TimeSeries, Order, SeasonalOrder) -> Result<M>,
    M: FittedModel,
{
    type Model = M;

    fn fit(
        &self,
        series: &TimeSeries,
        order: Order,
        seasonal_order: SeasonalOrder,
    ) -> Result<M> {
        self(series, order, seasonal_order)
    }
}
