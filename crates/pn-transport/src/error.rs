//! Error types for transient transport.

use pn_solver::SolverError;
use thiserror::Error;

/// Errors encountered while configuring or running a transient solve.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Configuration error: {what}")]
    Config { what: String },

    #[error("Dimension mismatch for {what}: expected {expected}, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Boundary condition error: {what}")]
    Bc { what: String },

    #[error("Linear solver error: {0}")]
    Solver(#[from] SolverError),
}

pub type TransportResult<T> = Result<T, TransportError>;
