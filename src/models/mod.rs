//! Model orders, the fitting seam, and the bundled SARIMA fitter.

mod order;
mod traits;

pub mod sarima;

pub use order::{Order, SeasonalOrder};
pub use sarima::{Intercept, SarimaConfig, SarimaFitter, SarimaModel, SarimaParams};
pub use traits::{FittedModel, Fitter};
