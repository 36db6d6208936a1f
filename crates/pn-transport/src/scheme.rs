//! Time-integration schemes and their theta weights.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// Weights applied when assembling the time-dependent system.
///
/// `f1` scales the steady operator's contribution, `f2` the mass /
/// time-derivative term, and `f3` the forcing term on the right-hand side
/// (zero forcing here, but the slot is what makes the steady solve a plain
/// operator solve).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SchemeWeights {
    pub f1: f64,
    pub f2: f64,
    pub f3: f64,
}

/// Closed set of supported time-integration schemes.
///
/// Adding a scheme means one enum variant plus one row in [`weights`].
///
/// [`weights`]: TimeScheme::weights
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeScheme {
    /// Fully implicit (backward Euler).
    Implicit,
    /// Half-weighted implicit/explicit blend.
    CrankNicolson,
    /// No time derivative: a single steady operator solve.
    Steady,
}

impl TimeScheme {
    /// Weight table for the generalized theta scheme.
    pub fn weights(self) -> SchemeWeights {
        match self {
            TimeScheme::Implicit => SchemeWeights {
                f1: 1.0,
                f2: 1.0,
                f3: 0.0,
            },
            TimeScheme::CrankNicolson => SchemeWeights {
                f1: 0.5,
                f2: 1.0,
                f3: 0.0,
            },
            TimeScheme::Steady => SchemeWeights {
                f1: 1.0,
                f2: 0.0,
                f3: 1.0,
            },
        }
    }
}

impl fmt::Display for TimeScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeScheme::Implicit => "implicit",
            TimeScheme::CrankNicolson => "cranknicolson",
            TimeScheme::Steady => "steady",
        };
        write!(f, "{name}")
    }
}

impl FromStr for TimeScheme {
    type Err = TransportError;

    /// Parse a scheme name. Unrecognized names are fatal, never a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "implicit" => Ok(TimeScheme::Implicit),
            "cranknicolson" => Ok(TimeScheme::CrankNicolson),
            "steady" => Ok(TimeScheme::Steady),
            other => Err(TransportError::Config {
                what: format!(
                    "unrecognized t_scheme '{other}' \
                     (expected implicit, cranknicolson, or steady)"
                ),
            }),
        }
    }
}
