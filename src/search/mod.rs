//! Grid search over non-seasonal and seasonal orders.
//!
//! Every combination of the candidate sets is fitted once. A fit that fails,
//! or reports a non-finite information criterion, is recorded as a failed
//! outcome scoring [`FAILURE_SCORE`]; the sweep itself never aborts on a
//! single combination. Successful fits are returned first, ascending by
//! score, followed by the failures in enumeration order.

mod engine;
mod outcome;
mod space;

pub use engine::{best, search, GridSearch};
pub use outcome::{FitOutcome, FitStatus, FAILURE_SCORE};
pub use space::SearchSpace;
