//! Error types for the sarima_roi library.

use thiserror::Error;

/// Result type alias for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while fitting, evaluating or rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Missing values (NaN/Inf) detected in data.
    #[error("missing values detected in data")]
    MissingValues,

    /// Computation error (non-convergence, non-finite likelihood).
    #[error("computation error: {0}")]
    ComputationError(String),

    /// A forecast is too short to read the requested horizon.
    #[error("insufficient horizon: need {needed} forecast periods, got {got}")]
    InsufficientHorizon { needed: usize, got: usize },

    /// A chart sink failed to produce its artifact.
    #[error("render error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = ForecastError::InsufficientData { needed: 10, got: 5 };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 10, got 5"
        );

        let err = ForecastError::InsufficientHorizon { needed: 60, got: 30 };
        assert_eq!(
            err.to_string(),
            "insufficient horizon: need 60 forecast periods, got 30"
        );

        let err = ForecastError::Render("broken pipe".to_string());
        assert_eq!(err.to_string(), "render error: broken pipe");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = ForecastError::ComputationError("nan".to_string());
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
