//! Pore-network geometry container.

use pn_core::{ensure_finite, PnError, PnResult};

/// A discretized network of control volumes (pores).
///
/// Holds per-pore geometric data only. Connectivity and conductances live in
/// whatever assembles the steady operator; this container is the minimal
/// surface the transient solver needs.
#[derive(Clone, Debug)]
pub struct Network {
    pore_volumes: Vec<f64>,
}

impl Network {
    /// Create a network from per-pore volumes.
    ///
    /// Every volume must be finite and strictly positive.
    pub fn new(pore_volumes: Vec<f64>) -> PnResult<Self> {
        if pore_volumes.is_empty() {
            return Err(PnError::InvalidArg {
                what: "network must contain at least one pore",
            });
        }
        for &v in &pore_volumes {
            ensure_finite(v, "pore volume")?;
            if v <= 0.0 {
                return Err(PnError::InvalidArg {
                    what: "pore volume must be positive",
                });
            }
        }
        Ok(Self { pore_volumes })
    }

    /// Create a network of `np` pores with identical volume.
    pub fn uniform(np: usize, volume: f64) -> PnResult<Self> {
        Self::new(vec![volume; np])
    }

    /// Number of pores.
    pub fn np(&self) -> usize {
        self.pore_volumes.len()
    }

    /// Per-pore volume array, length `np()`.
    pub fn pore_volumes(&self) -> &[f64] {
        &self.pore_volumes
    }
}
