//! Transient transport over pore networks.
//!
//! Advances a scalar field (concentration, temperature) in time by repeatedly
//! assembling and solving a linear system built from a cached steady-state
//! operator plus a mass term, under a generalized theta weighting that covers
//! fully implicit, Crank-Nicolson, and pure steady solves.
//!
//! Provides:
//! - scheme weights as a closed enum ([`TimeScheme`])
//! - pure system assembly ([`assemble`])
//! - boundary-condition injection seam ([`BoundaryConditions`])
//! - the time-march controller with snapshot export and residual-based
//!   early stop ([`TransientTransport`])

pub mod assemble;
pub mod bc;
pub mod error;
pub mod schedule;
pub mod scheme;
pub mod settings;
pub mod transient;

// Re-exports for public API
pub use bc::{BoundaryConditions, FixedValueBcs};
pub use error::{TransportError, TransportResult};
pub use schedule::OutputSchedule;
pub use scheme::{SchemeWeights, TimeScheme};
pub use settings::TransportSettings;
pub use transient::{InitialCondition, Outcome, TransientTransport};
