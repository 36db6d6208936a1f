//! The linear-solver trait.

use crate::error::SolverResult;
use nalgebra::{DMatrix, DVector};

/// Black-box solver for `A x = b`.
///
/// Implementations must not mutate `a` or `b`; the caller may reuse both
/// across steps. Takes `&self` so a single backend can serve a whole run.
pub trait LinearSolver {
    /// Solve `A x = b`, returning a vector with `b.len()` entries.
    fn solve(&self, a: &DMatrix<f64>, b: &DVector<f64>) -> SolverResult<DVector<f64>>;
}
