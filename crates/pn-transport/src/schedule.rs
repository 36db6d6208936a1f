//! Time-schedule normalization and output planning.
//!
//! Scheduling works in integer step counts, never by comparing accumulated
//! floating-point times for equality.

use pn_core::{is_multiple_of, Tolerances};

/// Round `x` up to the nearest integer multiple of `step`.
///
/// Values already on a multiple (within the default tolerance) are returned
/// as the exact multiple, e.g. `round_up_to_multiple(0.95, 0.1) == 1.0` but
/// `round_up_to_multiple(1.0, 0.1) == 1.0`.
pub fn round_up_to_multiple(x: f64, step: f64) -> f64 {
    let tol = Tolerances::default();
    let ratio = x / step;
    let n = if is_multiple_of(x, step, tol) {
        ratio.round()
    } else {
        ratio.ceil()
    };
    n * step
}

/// Number of whole steps of size `dt` from `t0` to `tf`.
///
/// A span that is within tolerance of a whole number of steps counts as
/// exactly that many; anything else truncates downward (partial trailing
/// steps are never taken).
pub fn steps_between(t0: f64, tf: f64, dt: f64) -> u64 {
    let span = tf - t0;
    if span <= 0.0 {
        return 0;
    }
    let ratio = span / dt;
    let n = if is_multiple_of(span, dt, Tolerances::default()) {
        ratio.round()
    } else {
        ratio.floor()
    };
    n as u64
}

/// Ordered snapshot plan for a transient run, built once before marching.
///
/// Holds the step numbers (1-based, relative to the start time) that get a
/// snapshot: every `output_every`-th step strictly before the final one, plus
/// the final step itself. A snapshot's output index is its position here.
#[derive(Clone, Debug)]
pub struct OutputSchedule {
    steps: Vec<u64>,
}

impl OutputSchedule {
    pub fn plan(n_steps: u64, output_every: u64) -> Self {
        let mut steps = Vec::new();
        if n_steps == 0 {
            return Self { steps };
        }
        if output_every > 0 {
            let mut s = output_every;
            while s < n_steps {
                steps.push(s);
                s += output_every;
            }
        }
        steps.push(n_steps);
        Self { steps }
    }

    /// Output index for a step, if that step is scheduled.
    pub fn index_of(&self, step: u64) -> Option<usize> {
        self.steps.binary_search(&step).ok()
    }

    /// Scheduled step numbers, ascending.
    pub fn steps(&self) -> &[u64] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
