//! Boundary-condition injection seam.

use nalgebra::{DMatrix, DVector};

use crate::error::{TransportError, TransportResult};

/// Mutates a system `(A, b)` in place to enforce boundary conditions.
///
/// The transport core calls this after every rebuild of `A` or `b`;
/// implementations must therefore be idempotent on an already-injected
/// system. BC bookkeeping (which pores, which values) lives entirely on the
/// implementor's side.
pub trait BoundaryConditions {
    fn apply(&self, a: &mut DMatrix<f64>, b: &mut DVector<f64>) -> TransportResult<()>;
}

/// Prescribed-value (Dirichlet) boundary conditions.
///
/// Each constrained pore gets its matrix row replaced by the identity row and
/// its rhs entry set to the prescribed value.
#[derive(Clone, Debug, Default)]
pub struct FixedValueBcs {
    values: Vec<(usize, f64)>,
}

impl FixedValueBcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prescribe `value` at `pore`. Later calls for the same pore win.
    pub fn set(&mut self, pore: usize, value: f64) {
        self.values.push((pore, value));
    }

    /// Number of constrained pores (counting repeats once).
    pub fn len(&self) -> usize {
        let mut pores: Vec<usize> = self.values.iter().map(|&(i, _)| i).collect();
        pores.sort_unstable();
        pores.dedup();
        pores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl BoundaryConditions for FixedValueBcs {
    fn apply(&self, a: &mut DMatrix<f64>, b: &mut DVector<f64>) -> TransportResult<()> {
        let n = b.len();
        for &(pore, value) in &self.values {
            if pore >= n || pore >= a.nrows() {
                return Err(TransportError::Bc {
                    what: format!("prescribed value at pore {pore}, but system has {n} rows"),
                });
            }
            a.row_mut(pore).fill(0.0);
            a[(pore, pore)] = 1.0;
            b[pore] = value;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> (DMatrix<f64>, DVector<f64>) {
        let a = DMatrix::from_row_slice(3, 3, &[2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]);
        let b = DVector::from_vec(vec![0.5, 0.5, 0.5]);
        (a, b)
    }

    #[test]
    fn injects_identity_rows() {
        let mut bcs = FixedValueBcs::new();
        bcs.set(0, 1.0);
        bcs.set(2, 0.0);

        let (mut a, mut b) = system();
        bcs.apply(&mut a, &mut b).unwrap();

        assert_eq!(a.row(0).iter().copied().collect::<Vec<_>>(), [1.0, 0.0, 0.0]);
        assert_eq!(a.row(2).iter().copied().collect::<Vec<_>>(), [0.0, 0.0, 1.0]);
        assert_eq!(b[0], 1.0);
        assert_eq!(b[2], 0.0);
        // untouched interior row
        assert_eq!(a[(1, 1)], 2.0);
        assert_eq!(b[1], 0.5);
    }

    #[test]
    fn reapplication_is_idempotent() {
        let mut bcs = FixedValueBcs::new();
        bcs.set(1, 3.0);

        let (mut a, mut b) = system();
        bcs.apply(&mut a, &mut b).unwrap();
        let (a1, b1) = (a.clone(), b.clone());
        bcs.apply(&mut a, &mut b).unwrap();
        assert_eq!(a, a1);
        assert_eq!(b, b1);
    }

    #[test]
    fn rejects_out_of_range_pore() {
        let mut bcs = FixedValueBcs::new();
        bcs.set(7, 1.0);
        let (mut a, mut b) = system();
        let err = bcs.apply(&mut a, &mut b).unwrap_err();
        assert!(matches!(err, TransportError::Bc { .. }));
    }

    #[test]
    fn counts_distinct_pores() {
        let mut bcs = FixedValueBcs::new();
        bcs.set(0, 1.0);
        bcs.set(0, 2.0);
        bcs.set(2, 0.0);
        assert_eq!(bcs.len(), 2);
        assert!(!bcs.is_empty());
    }
}
