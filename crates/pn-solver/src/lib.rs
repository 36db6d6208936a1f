//! Linear-solver seam for porenet.
//!
//! The transport core treats the linear solve as a black box behind the
//! [`LinearSolver`] trait: given `(A, b)` it returns a solution vector or a
//! solver-specific error. A dense LU implementation ships as the default
//! backend; alternative backends (iterative, sparse) plug in at the trait.

pub mod error;
pub mod lu;
pub mod solve;

pub use error::{SolverError, SolverResult};
pub use lu::DenseLu;
pub use solve::LinearSolver;
