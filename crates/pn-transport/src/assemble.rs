//! System assembly for the generalized theta scheme.
//!
//! Both builders are pure: every call allocates a fresh matrix or vector and
//! leaves the cached steady operator untouched. This is what protects the
//! steady baseline from corruption across rebuilds.

use nalgebra::{DMatrix, DVector};

use crate::error::{TransportError, TransportResult};
use crate::scheme::SchemeWeights;

/// Build the time-dependent system matrix
/// `A = (f2/dt) * diag(M) + f1 * A_steady`.
pub fn build_matrix(
    w: SchemeWeights,
    dt: f64,
    mass: &DVector<f64>,
    a_steady: &DMatrix<f64>,
) -> TransportResult<DMatrix<f64>> {
    let n = check_dims(dt, mass, a_steady, None)?;
    let mut a = a_steady * w.f1;
    for i in 0..n {
        a[(i, i)] += w.f2 / dt * mass[i];
    }
    Ok(a)
}

/// Build the right-hand side
/// `b = f2*(1-f1) * (-A_steady * x_old) + f2 * (M/dt) .* x_old + f3 * 0`.
///
/// For `steady` this degenerates to a zero vector, for `implicit` to
/// `(M/dt) .* x_old`, and for `cranknicolson` to the half-weighted blend.
pub fn build_rhs(
    w: SchemeWeights,
    dt: f64,
    mass: &DVector<f64>,
    a_steady: &DMatrix<f64>,
    x_old: &DVector<f64>,
) -> TransportResult<DVector<f64>> {
    let n = check_dims(dt, mass, a_steady, Some(x_old))?;
    let mut b = -(a_steady * x_old) * (w.f2 * (1.0 - w.f1));
    b += mass.component_mul(x_old) * (w.f2 / dt);
    // Zero forcing; the f3 slot is where a source term would enter.
    b += DVector::zeros(n) * w.f3;
    Ok(b)
}

fn check_dims(
    dt: f64,
    mass: &DVector<f64>,
    a_steady: &DMatrix<f64>,
    x_old: Option<&DVector<f64>>,
) -> TransportResult<usize> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(TransportError::Config {
            what: format!("t_step must be finite and positive, got {dt}"),
        });
    }
    let n = a_steady.nrows();
    if a_steady.ncols() != n {
        return Err(TransportError::DimensionMismatch {
            what: "steady operator columns",
            expected: n,
            got: a_steady.ncols(),
        });
    }
    if mass.len() != n {
        return Err(TransportError::DimensionMismatch {
            what: "mass term",
            expected: n,
            got: mass.len(),
        });
    }
    if let Some(x) = x_old {
        if x.len() != n {
            return Err(TransportError::DimensionMismatch {
                what: "previous field",
                expected: n,
                got: x.len(),
            });
        }
    }
    Ok(n)
}
