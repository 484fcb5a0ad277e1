//! Per-combination results of a sweep.

use crate::error::ForecastError;
use crate::models::{Order, SeasonalOrder};

/// Score assigned to failed combinations so they rank after every fit.
pub const FAILURE_SCORE: f64 = 99999.0;

/// What happened when one combination was fitted.
#[derive(Debug, Clone)]
pub enum FitStatus<M> {
    Fitted {
        /// Information criterion of the fit.
        score: f64,
        /// Fitted model, kept only when the search retains models.
        model: Option<M>,
    },
    Failed {
        error: ForecastError,
    },
}

/// One attempted (order, seasonal order) combination.
#[derive(Debug, Clone)]
pub struct FitOutcome<M> {
    pub order: Order,
    pub seasonal_order: SeasonalOrder,
    pub status: FitStatus<M>,
}

impl<M> FitOutcome<M> {
    /// Ranking score; [`FAILURE_SCORE`] for failed fits.
    pub fn score(&self) -> f64 {
        match &self.status {
            FitStatus::Fitted { score, .. } => *score,
            FitStatus::Failed { .. } => FAILURE_SCORE,
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.status, FitStatus::Fitted { .. })
    }

    pub fn model(&self) -> Option<&M> {
        match &self.status {
            FitStatus::Fitted { model, .. } => model.as_ref(),
            FitStatus::Failed { .. } => None,
        }
    }

    pub fn into_model(self) -> Option<M> {
        match self.status {
            FitStatus::Fitted { model, .. } => model,
            FitStatus::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ForecastError> {
        match &self.status {
            FitStatus::Failed { error } => Some(error),
            FitStatus::Fitted { .. } => None,
        }
    }
}
