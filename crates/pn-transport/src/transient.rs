//! Time-march controller for transient transport.

use std::collections::BTreeMap;

use nalgebra::{DMatrix, DVector};
use pn_network::{Network, Phase};
use pn_solver::LinearSolver;
use tracing::{debug, info};

use crate::assemble;
use crate::bc::BoundaryConditions;
use crate::error::{TransportError, TransportResult};
use crate::schedule::{self, OutputSchedule};
use crate::scheme::TimeScheme;
use crate::settings::TransportSettings;

/// Initial condition for the transported field.
#[derive(Clone, Debug)]
pub enum InitialCondition {
    /// One value broadcast to every pore.
    Uniform(f64),
    /// A full field, which must have one entry per pore.
    Field(DVector<f64>),
}

/// Terminal state of a run.
///
/// Reaching `t_final` without the residual dropping below tolerance is a
/// normal outcome, reported distinctly from early convergence. Kept as
/// explicit state so callers never infer the stop reason from loop counters.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Steady scheme: a single operator solve, no marching.
    SteadySolve,
    /// Residual dropped below tolerance before `t_final`.
    Converged { t: f64, residual: f64 },
    /// Marched all the way to (normalized) `t_final`.
    ReachedFinalTime { t: f64 },
}

/// Transient solver for a scalar field over a pore network.
///
/// Owns all mutable run state: the current field, the system `(A, b)`, the
/// steady-operator cache, and the snapshot store. The steady conductance
/// operator, boundary-condition injection, and the linear solve itself are
/// external collaborators.
///
/// Not safe for concurrent use; one instance drives one run at a time.
pub struct TransientTransport<'a> {
    settings: TransportSettings,
    /// Per-pore capacity: molar density x pore volume.
    mass: DVector<f64>,
    /// BC-free steady operator, as supplied by the steady assembler.
    operator: DMatrix<f64>,
    /// BC-injected steady operator, captured once during setup.
    a_steady: Option<DMatrix<f64>>,
    a: DMatrix<f64>,
    b: DVector<f64>,
    field: DVector<f64>,
    snapshots: BTreeMap<String, DVector<f64>>,
    solver: &'a dyn LinearSolver,
    bcs: &'a dyn BoundaryConditions,
}

impl std::fmt::Debug for TransientTransport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransientTransport")
            .field("settings", &self.settings)
            .field("mass", &self.mass)
            .field("operator", &self.operator)
            .field("a_steady", &self.a_steady)
            .field("a", &self.a)
            .field("b", &self.b)
            .field("field", &self.field)
            .field("snapshots", &self.snapshots)
            .finish_non_exhaustive()
    }
}

impl<'a> TransientTransport<'a> {
    /// Create a solver for `network`, reading molar density from `phase` and
    /// taking the BC-free steady operator from whatever assembled it.
    pub fn new(
        network: &Network,
        phase: &Phase,
        operator: DMatrix<f64>,
        settings: TransportSettings,
        solver: &'a dyn LinearSolver,
        bcs: &'a dyn BoundaryConditions,
    ) -> TransportResult<Self> {
        settings.validate()?;

        let np = network.np();
        if operator.nrows() != np || operator.ncols() != np {
            return Err(TransportError::DimensionMismatch {
                what: "steady operator",
                expected: np,
                got: operator.nrows().max(operator.ncols()),
            });
        }

        let md = phase
            .property(&settings.molar_density)
            .ok_or_else(|| TransportError::Config {
                what: format!(
                    "phase '{}' has no property '{}'",
                    phase.name(),
                    settings.molar_density
                ),
            })?;
        let mass = DVector::from_iterator(np, network.pore_volumes().iter().map(|&v| md * v));

        Ok(Self {
            settings,
            mass,
            operator,
            a_steady: None,
            a: DMatrix::zeros(np, np),
            b: DVector::zeros(np),
            field: DVector::zeros(np),
            snapshots: BTreeMap::new(),
            solver,
            bcs,
        })
    }

    /// Set the initial field. A mis-sized field is fatal.
    pub fn set_ic(&mut self, ic: InitialCondition) -> TransportResult<()> {
        let np = self.mass.len();
        match ic {
            InitialCondition::Uniform(value) => {
                self.field = DVector::from_element(np, value);
            }
            InitialCondition::Field(values) => {
                if values.len() != np {
                    return Err(TransportError::DimensionMismatch {
                        what: "initial condition",
                        expected: np,
                        got: values.len(),
                    });
                }
                self.field = values;
            }
        }
        Ok(())
    }

    /// Run the solver, starting at `t` (defaults to the configured
    /// `t_initial`). Performs setup, then marches to `t_final` unless the
    /// scheme is steady or the residual converges first.
    pub fn run(&mut self, t: Option<f64>) -> TransportResult<Outcome> {
        info!(scheme = %self.settings.t_scheme, "running transient transport");
        self.setup()?;
        let t0 = t.unwrap_or(self.settings.t_initial);
        self.march(t0)
    }

    /// Current field values, one per pore.
    pub fn field(&self) -> &DVector<f64> {
        &self.field
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    /// All exported snapshots, keyed `{quantity}_initial`,
    /// `{quantity}{output_index}`, and `{quantity}_steady`.
    pub fn snapshots(&self) -> &BTreeMap<String, DVector<f64>> {
        &self.snapshots
    }

    pub fn snapshot(&self, key: &str) -> Option<&DVector<f64>> {
        self.snapshots.get(key)
    }

    /// The cached steady operator, once setup has captured it.
    pub fn steady_operator(&self) -> Option<&DMatrix<f64>> {
        self.a_steady.as_ref()
    }

    /// Capture the steady operator and assemble the scheme-weighted system.
    ///
    /// BCs are baked into the cached operator exactly once (so the explicit
    /// `-A_steady * x_old` term stays BC-consistent), then reasserted on the
    /// weighted system, because rebuilding from the cache does not preserve
    /// BC rows.
    fn setup(&mut self) -> TransportResult<()> {
        // Scratch b seeded from the field so BC injection sizes correctly.
        let mut a = self.operator.clone();
        let mut b = self.field.clone();
        self.bcs.apply(&mut a, &mut b)?;
        self.a_steady = Some(a);

        let w = self.settings.t_scheme.weights();
        let dt = self.settings.t_step;
        let a_steady = self.cached_steady()?;
        let mut a = assemble::build_matrix(w, dt, &self.mass, a_steady)?;
        let mut b = assemble::build_rhs(w, dt, &self.mass, a_steady, &self.field)?;
        self.bcs.apply(&mut a, &mut b)?;
        self.a = a;
        self.b = b;
        Ok(())
    }

    /// Rebuild `b` from the current field and reassert BCs on `(A, b)`.
    fn rebuild_rhs(&mut self) -> TransportResult<()> {
        let w = self.settings.t_scheme.weights();
        let dt = self.settings.t_step;
        let a_steady = self.cached_steady()?;
        self.b = assemble::build_rhs(w, dt, &self.mass, a_steady, &self.field)?;
        self.bcs.apply(&mut self.a, &mut self.b)?;
        Ok(())
    }

    fn cached_steady(&self) -> TransportResult<&DMatrix<f64>> {
        self.a_steady.as_ref().ok_or_else(|| TransportError::Config {
            what: "steady operator not captured; setup must run before marching".to_string(),
        })
    }

    fn march(&mut self, t0: f64) -> TransportResult<Outcome> {
        let dt = self.settings.t_step;
        let quantity = self.settings.quantity.clone();

        // Normalize t_final and t_output up to multiples of dt; persist.
        let tf = schedule::round_up_to_multiple(self.settings.t_final, dt);
        let to = schedule::round_up_to_multiple(self.settings.t_output, dt);
        self.settings.t_final = tf;
        self.settings.t_output = to;

        self.snapshots
            .insert(format!("{quantity}_initial"), self.field.clone());

        if self.settings.t_scheme == TimeScheme::Steady {
            info!("steady scheme: single solve, no time marching");
            let x = self.solver.solve(&self.a, &self.b)?;
            self.field = x;
            return Ok(Outcome::SteadySolve);
        }

        let n_steps = schedule::steps_between(t0, tf, dt);
        let output_every = schedule::steps_between(0.0, to, dt);
        let plan = OutputSchedule::plan(n_steps, output_every);
        let tol = self.settings.tolerance;

        let mut outcome = Outcome::ReachedFinalTime {
            t: t0 + n_steps as f64 * dt,
        };
        for step in 1..=n_steps {
            let time = t0 + step as f64 * dt;
            let x_new = self.solver.solve(&self.a, &self.b)?;
            let res = relative_residual(&x_new, &self.field);
            debug!(time, residual = res, "time step");
            self.field = x_new;

            if let Some(idx) = plan.index_of(step) {
                let key = format!("{quantity}{idx}");
                info!(%key, time, "exporting snapshot");
                self.snapshots.insert(key, self.field.clone());
            }

            if res < tol {
                let key = format!("{quantity}_steady");
                info!(%key, time, residual = res, "converged before t_final");
                self.snapshots.insert(key, self.field.clone());
                outcome = Outcome::Converged { t: time, residual: res };
                break;
            }

            self.rebuild_rhs()?;
        }

        if let Outcome::ReachedFinalTime { t } = &outcome {
            info!(t = *t, "maximum time reached");
        }
        Ok(outcome)
    }
}

/// Max-norm relative change between consecutive fields.
///
/// Entries whose new value is exactly zero contribute the absolute
/// difference instead; a relative measure is undefined there, and silently
/// skipping them would let a zero-valued region fake convergence.
fn relative_residual(new: &DVector<f64>, old: &DVector<f64>) -> f64 {
    let mut res = 0.0_f64;
    for i in 0..new.len() {
        let d = (new[i] - old[i]).abs();
        let r = if new[i] != 0.0 { d / new[i].abs() } else { d };
        res = res.max(r);
    }
    res
}
