//! Property-based tests for the grid search and ROI arithmetic.
//!
//! Candidate sets and fitter failure patterns are generated randomly.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use sarima_roi::core::{Forecast, TimeSeries};
use sarima_roi::error::{ForecastError, Result};
use sarima_roi::evaluation::{evaluate_forecast, round3};
use sarima_roi::models::{FittedModel, Order, SeasonalOrder};
use sarima_roi::search::{GridSearch, SearchSpace, FAILURE_SCORE};

struct Fixed {
    score: f64,
    series: TimeSeries,
    level: f64,
}

impl FittedModel for Fixed {
    fn information_criterion(&self) -> f64 {
        self.score
    }

    fn predict_in_sample(&self, _: DateTime<Utc>, _: bool, _: f64) -> Result<Forecast> {
        Ok(Forecast::new())
    }

    fn forecast(&self, steps: usize, level: f64) -> Result<Forecast> {
        let mean = vec![self.level; steps];
        Forecast::with_intervals(
            self.series.future_timestamps(steps)?,
            mean.clone(),
            mean.clone(),
            mean,
            level,
        )
    }

    fn name(&self) -> &str {
        "Fixed"
    }
}

fn series_ending_at(last: f64) -> TimeSeries {
    let start = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    TimeSeries::monthly(start, vec![last * 0.9, last * 0.95, last]).unwrap()
}

/// Small non-empty candidate set.
fn candidates() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..3, 1..3)
}

fn space_strategy() -> impl Strategy<Value = SearchSpace> {
    (
        candidates(),
        candidates(),
        candidates(),
        candidates(),
        candidates(),
        candidates(),
        prop::collection::vec(prop::sample::select(vec![0usize, 4, 12]), 1..3),
    )
        .prop_map(|(p, d, q, sp, sd, sq, s)| SearchSpace {
            p,
            d,
            q,
            seasonal_p: sp,
            seasonal_d: sd,
            seasonal_q: sq,
            s,
        })
}

fn hash_order(order: Order, seasonal: SeasonalOrder, salt: u64) -> u64 {
    let raw = [
        order.p,
        order.d,
        order.q,
        seasonal.cap_p,
        seasonal.cap_d,
        seasonal.cap_q,
        seasonal.s,
    ];
    raw.iter()
        .fold(salt ^ 0x9e37_79b9, |h, &v| h.wrapping_mul(31).wrapping_add(v as u64 + 1))
}

proptest! {
    #[test]
    fn search_returns_one_outcome_per_combination(space in space_strategy(), salt in any::<u64>()) {
        let series = series_ending_at(100.0);
        let fitter = move |s: &TimeSeries, order: Order, seasonal: SeasonalOrder| -> Result<Fixed> {
            let h = hash_order(order, seasonal, salt);
            if h % 3 == 0 {
                return Err(ForecastError::ComputationError("unstable".to_string()));
            }
            Ok(Fixed { score: (h % 5000) as f64, series: s.clone(), level: 1.0 })
        };

        let outcomes = GridSearch::new(fitter).search(&series, &space).unwrap();

        prop_assert_eq!(outcomes.len(), space.total_combinations());
        prop_assert!(outcomes.windows(2).all(|w| w[0].score() <= w[1].score()));
        for outcome in &outcomes {
            if outcome.is_fitted() {
                prop_assert!(outcome.score() < FAILURE_SCORE);
            } else {
                prop_assert_eq!(outcome.score(), FAILURE_SCORE);
            }
        }
        // Every fit ranks ahead of every failure
        let first_failure = outcomes.iter().position(|o| !o.is_fitted()).unwrap_or(outcomes.len());
        prop_assert!(outcomes[first_failure..].iter().all(|o| !o.is_fitted()));
    }

    #[test]
    fn roi_matches_rounded_ratio(last in 1.0..1e6f64, growth in -0.5..2.0f64, steps in 1usize..90) {
        let series = series_ending_at(last);
        let model = Fixed { score: 0.0, series: series.clone(), level: last * (1.0 + growth) };

        let roi = evaluate_forecast(&series, &model, steps, None).unwrap();

        let expected = round3((model.level - last) / last);
        prop_assert_eq!(roi.roi_1yr, expected);
        prop_assert_eq!(roi.roi_5yr, expected);
        prop_assert_eq!(round3(roi.roi_1yr), roi.roi_1yr);
    }
}
