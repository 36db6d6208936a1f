//! Dense LU backend.

use crate::error::{SolverError, SolverResult};
use crate::solve::LinearSolver;
use nalgebra::{DMatrix, DVector};

/// Direct dense solver using nalgebra's LU decomposition.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenseLu;

impl LinearSolver for DenseLu {
    fn solve(&self, a: &DMatrix<f64>, b: &DVector<f64>) -> SolverResult<DVector<f64>> {
        if a.nrows() != a.ncols() || a.nrows() != b.len() {
            return Err(SolverError::Dimension {
                rows: a.nrows(),
                cols: a.ncols(),
                rhs_len: b.len(),
            });
        }
        a.clone().lu().solve(b).ok_or_else(|| SolverError::Singular {
            what: format!("LU solve failed for {}x{} system", a.nrows(), a.ncols()),
        })
    }
}
