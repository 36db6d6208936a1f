//! Run configuration for transient transport.

use serde::{Deserialize, Serialize};

use crate::error::{TransportError, TransportResult};
use crate::scheme::TimeScheme;

/// Recognized options for a transient transport run.
///
/// Times are in seconds; `t_final` and `t_output` get normalized up to exact
/// multiples of `t_step` when marching begins, and the normalized values are
/// written back here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportSettings {
    /// Name of the field being solved (also the snapshot key prefix).
    pub quantity: String,
    /// Identifier of the phase providing the molar density.
    pub phase: String,
    /// Property key for molar density on that phase.
    pub molar_density: String,
    /// Time-integration scheme.
    pub t_scheme: TimeScheme,
    /// Time step.
    pub t_step: f64,
    /// Start time.
    pub t_initial: f64,
    /// End time.
    pub t_final: f64,
    /// Interval between field snapshots.
    pub t_output: f64,
    /// Relative-residual threshold for early stop.
    pub tolerance: f64,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            quantity: "pore.concentration".to_string(),
            phase: "phase".to_string(),
            molar_density: "pore.molar_density".to_string(),
            t_scheme: TimeScheme::Implicit,
            t_step: 1.0,
            t_initial: 0.0,
            t_final: 100.0,
            t_output: 10.0,
            tolerance: 1e-6,
        }
    }
}

impl TransportSettings {
    /// Check the schedule and keys before a run. All failures are fatal.
    pub fn validate(&self) -> TransportResult<()> {
        if self.quantity.is_empty() {
            return Err(config("quantity must not be empty"));
        }
        if self.molar_density.is_empty() {
            return Err(config("molar_density property key must not be empty"));
        }
        if !self.t_step.is_finite() || self.t_step <= 0.0 {
            return Err(config("t_step must be finite and positive"));
        }
        if !self.t_output.is_finite() || self.t_output <= 0.0 {
            return Err(config("t_output must be finite and positive"));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(config("tolerance must be finite and positive"));
        }
        if !self.t_initial.is_finite() || !self.t_final.is_finite() {
            return Err(config("t_initial and t_final must be finite"));
        }
        if self.t_final < self.t_initial {
            return Err(config("t_final must not precede t_initial"));
        }
        Ok(())
    }
}

fn config(what: &str) -> TransportError {
    TransportError::Config {
        what: what.to_string(),
    }
}
