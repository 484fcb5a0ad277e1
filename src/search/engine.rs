//! Failure-tolerant sweep over a [`SearchSpace`].

use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::{FittedModel, Fitter, Order, SeasonalOrder};
use crate::search::{FitOutcome, FitStatus, SearchSpace, FAILURE_SCORE};
use tracing::{debug, info, warn};

/// Grid search over SARIMA orders using a [`Fitter`].
///
/// # Example
/// ```
/// use sarima_roi::core::TimeSeries;
/// use sarima_roi::models::SarimaFitter;
/// use sarima_roi::search::{GridSearch, SearchSpace};
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap();
/// let values: Vec<f64> = (0..60).map(|i| 200.0 + 2.0 * i as f64 + (i as f64).cos()).collect();
/// let series = TimeSeries::monthly(start, values).unwrap();
///
/// let space = SearchSpace::new(&[0, 1], &[1], &[0, 1], &[0], &[0], &[0], &[0]).unwrap();
/// let outcomes = GridSearch::new(SarimaFitter::new()).search(&series, &space).unwrap();
///
/// assert_eq!(outcomes.len(), 4);
/// assert!(outcomes.windows(2).all(|w| w[0].score() <= w[1].score()));
/// ```
#[derive(Debug, Clone)]
pub struct GridSearch<F> {
    fitter: F,
    retain_models: bool,
}

impl<F: Fitter> GridSearch<F> {
    pub fn new(fitter: F) -> Self {
        Self {
            fitter,
            retain_models: false,
        }
    }

    /// Keep fitted models in successful outcomes.
    pub fn retain_models(mut self, retain: bool) -> Self {
        self.retain_models = retain;
        self
    }

    /// Fit every combination in `space` and rank the outcomes.
    ///
    /// Only an invalid space is an error; per-combination failures become
    /// [`FitStatus::Failed`] entries.
    pub fn search(
        &self,
        series: &TimeSeries,
        space: &SearchSpace,
    ) -> Result<Vec<FitOutcome<F::Model>>> {
        space.validate()?;

        let combinations = space.combinations();
        info!("Total combinations to fit: {}", combinations.len());

        let mut outcomes: Vec<_> = combinations
            .into_iter()
            .map(|(order, seasonal_order)| self.attempt(series, order, seasonal_order))
            .collect();

        // Fits before failures, then by score; stable, so failures keep
        // enumeration order
        outcomes.sort_by(|a, b| {
            b.is_fitted()
                .cmp(&a.is_fitted())
                .then(a.score().total_cmp(&b.score()))
        });

        match outcomes.iter().find(|o| o.is_fitted()) {
            Some(best) => info!(
                "Best combination {} x {} with score {:.3}",
                best.order,
                best.seasonal_order,
                best.score()
            ),
            None => warn!("All {} combinations failed to fit", outcomes.len()),
        }

        Ok(outcomes)
    }

    fn attempt(
        &self,
        series: &TimeSeries,
        order: Order,
        seasonal_order: SeasonalOrder,
    ) -> FitOutcome<F::Model> {
        let fitted = self
            .fitter
            .fit(series, order, seasonal_order)
            .and_then(|model| {
                let score = model.information_criterion();
                if score.is_finite() {
                    Ok((score, model))
                } else {
                    Err(ForecastError::ComputationError(format!(
                        "non-finite information criterion {score}"
                    )))
                }
            });

        let status = match fitted {
            Ok((score, model)) => {
                if score >= FAILURE_SCORE {
                    warn!(
                        "Fit for {} x {} scored {:.3}, at or above the failure score",
                        order, seasonal_order, score
                    );
                }
                FitStatus::Fitted {
                    score,
                    model: self.retain_models.then_some(model),
                }
            }
            Err(error) => {
                debug!("Fit failed for {} x {}: {}", order, seasonal_order, error);
                FitStatus::Failed { error }
            }
        };

        FitOutcome {
            order,
            seasonal_order,
            status,
        }
    }
}

/// Sweep the cross product of the seven candidate sets with `fitter`.
///
/// Models are discarded; use [`GridSearch::retain_models`] to keep them.
#[allow(clippy::too_many_arguments)]
pub fn search<F: Fitter>(
    fitter: F,
    series: &TimeSeries,
    p: &[usize],
    d: &[usize],
    q: &[usize],
    sp: &[usize],
    sd: &[usize],
    sq: &[usize],
    s: &[usize],
) -> Result<Vec<FitOutcome<F::Model>>> {
    let space = SearchSpace::new(p, d, q, sp, sd, sq, s)?;
    GridSearch::new(fitter).search(series, &space)
}

/// First successful outcome of a ranked sweep.
pub fn best<M>(outcomes: &[FitOutcome<M>]) -> Option<&FitOutcome<M>> {
    outcomes.iter().find(|o| o.is_fitted())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Forecast;
    use chrono::{DateTime, TimeZone, Utc};

    struct Scored(f64);

    impl FittedModel for Scored {
        fn information_criterion(&self) -> f64 {
            self.0
        }

        fn predict_in_sample(&self, _: DateTime<Utc>, _: bool, _: f64) -> Result<Forecast> {
            Ok(Forecast::new())
        }

        fn forecast(&self, _: usize, _: f64) -> Result<Forecast> {
            Ok(Forecast::new())
        }

        fn name(&self) -> &str {
            "Scored"
        }
    }

    fn series() -> TimeSeries {
        let start = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap();
        TimeSeries::monthly(start, vec![1.0, 2.0, 3.0]).unwrap()
    }

    #[test]
    fn grid_search_retains_models_on_request() {
        let fitter = |_: &TimeSeries, order: Order, _: SeasonalOrder| -> Result<Scored> {
            Ok(Scored(order.p as f64))
        };
        let space = SearchSpace::new(&[2, 1], &[0], &[0], &[0], &[0], &[0], &[0]).unwrap();

        let dropped = GridSearch::new(fitter).search(&series(), &space).unwrap();
        assert!(dropped.iter().all(|o| o.model().is_none()));

        let kept = GridSearch::new(fitter)
            .retain_models(true)
            .search(&series(), &space)
            .unwrap();
        assert_eq!(kept[0].order.p, 1);
        assert_eq!(kept[0].model().map(|m| m.0), Some(1.0));
    }

    #[test]
    fn grid_search_treats_nan_criterion_as_failure() {
        let fitter = |_: &TimeSeries, _: Order, _: SeasonalOrder| -> Result<Scored> {
            Ok(Scored(f64::NAN))
        };
        let space = SearchSpace::new(&[0], &[0], &[0], &[0], &[0], &[0], &[0]).unwrap();

        let outcomes = GridSearch::new(fitter).search(&series(), &space).unwrap();
        assert!(matches!(
            outcomes[0].error(),
            Some(ForecastError::ComputationError(_))
        ));
        assert!(best(&outcomes).is_none());
    }

    #[test]
    fn grid_search_ranks_high_scoring_fits_ahead_of_failures() {
        let fitter = |_: &TimeSeries, order: Order, _: SeasonalOrder| -> Result<Scored> {
            match order.p {
                0 => Err(ForecastError::ComputationError("diverged".to_string())),
                1 => Ok(Scored(150_000.0)),
                _ => Ok(Scored(FAILURE_SCORE)),
            }
        };
        let space = SearchSpace::new(&[0, 1, 2], &[0], &[0], &[0], &[0], &[0], &[0]).unwrap();

        let outcomes = GridSearch::new(fitter).search(&series(), &space).unwrap();
        let fitted: Vec<bool> = outcomes.iter().map(|o| o.is_fitted()).collect();
        assert_eq!(fitted, vec![true, true, false]);
        assert_eq!(outcomes[0].order.p, 2);
        assert_eq!(outcomes[1].score(), 150_000.0);
        assert_eq!(best(&outcomes).map(|o| o.order.p), Some(2));
    }

    #[test]
    fn grid_search_rejects_invalid_space() {
        let fitter = |_: &TimeSeries, _: Order, _: SeasonalOrder| -> Result<Scored> { Ok(Scored(1.0)) };
        let space = SearchSpace {
            p: vec![],
            d: vec![0],
            q: vec![0],
            seasonal_p: vec![0],
            seasonal_d: vec![0],
            seasonal_q: vec![0],
            s: vec![0],
        };
        assert!(GridSearch::new(fitter).search(&series(), &space).is_err());
    }
}
