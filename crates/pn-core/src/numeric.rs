use crate::PnError;

/// Floating point type used throughout the engine.
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// True when `x` is an integer multiple of `step`, within `tol`.
///
/// Comparison happens in ratio space so large times and small steps
/// are treated uniformly.
pub fn is_multiple_of(x: Real, step: Real, tol: Tolerances) -> bool {
    if step <= 0.0 {
        return false;
    }
    let ratio = x / step;
    nearly_equal(ratio, ratio.round(), tol)
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PnError::NonFinite { what, value: v })
    }
}
