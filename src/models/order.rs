//! Non-seasonal and seasonal order tuples.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-seasonal order (p, d, q).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    /// Autoregressive order.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// Moving-average order.
    pub q: usize,
}

impl Order {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.p, self.d, self.q)
    }
}

/// Seasonal order (P, D, Q, s).
///
/// `s == 0` denotes no seasonality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SeasonalOrder {
    /// Seasonal AR order.
    pub cap_p: usize,
    /// Seasonal differencing order.
    pub cap_d: usize,
    /// Seasonal MA order.
    pub cap_q: usize,
    /// Seasonal period.
    pub s: usize,
}

impl SeasonalOrder {
    pub fn new(cap_p: usize, cap_d: usize, cap_q: usize, s: usize) -> Self {
        Self {
            cap_p,
            cap_d,
            cap_q,
            s,
        }
    }

    /// No seasonal component.
    pub fn none() -> Self {
        Self::default()
    }

    /// True when any seasonal AR, differencing or MA term is requested.
    pub fn has_terms(&self) -> bool {
        self.cap_p > 0 || self.cap_d > 0 || self.cap_q > 0
    }
}

impl fmt::Display for SeasonalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.cap_p, self.cap_d, self.cap_q, self.s
        )
    }
}
