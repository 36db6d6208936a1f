//! Error types for linear-solver operations.

use thiserror::Error;

/// Errors that can occur during a linear solve.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Singular system: {what}")]
    Singular { what: String },

    #[error("Dimension mismatch: matrix is {rows}x{cols}, rhs has {rhs_len} entries")]
    Dimension {
        rows: usize,
        cols: usize,
        rhs_len: usize,
    },
}

pub type SolverResult<T> = Result<T, SolverError>;
