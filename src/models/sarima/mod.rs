//! Seasonal ARIMA(p, d, q)(P, D, Q)s estimated by conditional sum of squares.
//!
//! The model is `φ(B)Φ(B^s)(1-B)^d(1-B^s)^D (y_t - μ) = θ(B)Θ(B^s) e_t`, where
//! `μ` is only estimated for undifferenced models unless configured otherwise.

mod diff;
mod model;

pub use model::{Intercept, SarimaConfig, SarimaFitter, SarimaModel, SarimaParams};
