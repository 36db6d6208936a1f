//! Phase property container.

use std::collections::HashMap;

use pn_core::{ensure_finite, PnResult};

/// A fluid phase exposing named scalar properties.
///
/// Properties are single representative values applied uniformly across all
/// pores (e.g. `"pore.molar_density"`). Spatially varying properties are not
/// part of this container's contract.
#[derive(Clone, Debug, Default)]
pub struct Phase {
    name: String,
    properties: HashMap<String, f64>,
}

impl Phase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: HashMap::new(),
        }
    }

    /// Phase identifier, used by configuration to pick a phase.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a scalar property. Non-finite values are rejected.
    pub fn set_property(&mut self, key: impl Into<String>, value: f64) -> PnResult<()> {
        ensure_finite(value, "phase property")?;
        self.properties.insert(key.into(), value);
        Ok(())
    }

    /// Look up a scalar property by key.
    pub fn property(&self, key: &str) -> Option<f64> {
        self.properties.get(key).copied()
    }
}
