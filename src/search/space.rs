//! Candidate sets for the order grid.

use crate::error::{ForecastError, Result};
use crate::models::{Order, SeasonalOrder};
use serde::{Deserialize, Serialize};

/// Candidate values for every order component.
///
/// Every combination of the seven sets is attempted exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSpace {
    pub p: Vec<usize>,
    pub d: Vec<usize>,
    pub q: Vec<usize>,
    pub seasonal_p: Vec<usize>,
    pub seasonal_d: Vec<usize>,
    pub seasonal_q: Vec<usize>,
    /// Seasonal periods; `0` means no seasonality.
    pub s: Vec<usize>,
}

impl SearchSpace {
    /// Build a search space, rejecting empty candidate sets.
    pub fn new(
        p: &[usize],
        d: &[usize],
        q: &[usize],
        seasonal_p: &[usize],
        seasonal_d: &[usize],
        seasonal_q: &[usize],
        s: &[usize],
    ) -> Result<Self> {
        let space = Self {
            p: p.to_vec(),
            d: d.to_vec(),
            q: q.to_vec(),
            seasonal_p: seasonal_p.to_vec(),
            seasonal_d: seasonal_d.to_vec(),
            seasonal_q: seasonal_q.to_vec(),
            s: s.to_vec(),
        };
        space.validate()?;
        Ok(space)
    }

    /// Check that no candidate set is empty.
    ///
    /// Spaces loaded through serde bypass [`SearchSpace::new`]; the engine
    /// calls this before sweeping.
    pub fn validate(&self) -> Result<()> {
        let sets = [
            ("p", &self.p),
            ("d", &self.d),
            ("q", &self.q),
            ("seasonal_p", &self.seasonal_p),
            ("seasonal_d", &self.seasonal_d),
            ("seasonal_q", &self.seasonal_q),
            ("s", &self.s),
        ];
        for (name, values) in sets {
            if values.is_empty() {
                return Err(ForecastError::InvalidParameter(format!(
                    "candidate set `{name}` is empty"
                )));
            }
        }
        Ok(())
    }

    pub fn total_combinations(&self) -> usize {
        self.p.len()
            * self.d.len()
            * self.q.len()
            * self.seasonal_p.len()
            * self.seasonal_d.len()
            * self.seasonal_q.len()
            * self.s.len()
    }

    /// All combinations, `p` varying slowest and `s` fastest.
    pub fn combinations(&self) -> Vec<(Order, SeasonalOrder)> {
        let mut out = Vec::with_capacity(self.total_combinations());
        for &p in &self.p {
            for &d in &self.d {
                for &q in &self.q {
                    for &sp in &self.seasonal_p {
                        for &sd in &self.seasonal_d {
                            for &sq in &self.seasonal_q {
                                for &s in &self.s {
                                    out.push((
                                        Order::new(p, d, q),
                                        SeasonalOrder::new(sp, sd, sq, s),
                                    ));
                                }
                            }
                        }
                    }
                }
            }
        }
        out
    }
}
