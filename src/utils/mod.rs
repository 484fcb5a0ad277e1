//! Utility functions for fitting and evaluation.

pub mod metrics;
pub mod optimization;
pub mod stats;

pub use metrics::{mae, mse, rmse};
pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};
pub use stats::{acf, normal_critical_value, pacf};
