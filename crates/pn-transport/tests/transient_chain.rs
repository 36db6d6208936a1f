//! Integration test: transient diffusion along a 3-pore chain.
//!
//! Network: pore0 -- pore1 -- pore2, unit volumes, unit molar density,
//! fixed symmetric tridiagonal conductance operator, Dirichlet values at the
//! chain ends. Checks the hand-computed implicit system, snapshot keying,
//! residual-based early stop, and schedule normalization.

use std::cell::RefCell;

use nalgebra::{DMatrix, DVector};
use pn_network::{Network, Phase};
use pn_solver::{DenseLu, LinearSolver, SolverResult};
use pn_transport::{
    FixedValueBcs, InitialCondition, Outcome, TimeScheme, TransientTransport, TransportSettings,
};

fn chain_operator() -> DMatrix<f64> {
    DMatrix::from_row_slice(3, 3, &[1.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 1.0])
}

fn chain_parts() -> (Network, Phase) {
    let network = Network::uniform(3, 1.0).unwrap();
    let mut phase = Phase::new("phase");
    phase.set_property("pore.molar_density", 1.0).unwrap();
    (network, phase)
}

fn end_bcs() -> FixedValueBcs {
    let mut bcs = FixedValueBcs::new();
    bcs.set(0, 1.0);
    bcs.set(2, 0.0);
    bcs
}

/// Records every (A, b) pair handed to the solver and returns a fixed answer.
struct RecordingSolver {
    calls: RefCell<Vec<(DMatrix<f64>, DVector<f64>)>>,
    answer: DVector<f64>,
}

impl RecordingSolver {
    fn new(answer: DVector<f64>) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            answer,
        }
    }
}

impl LinearSolver for RecordingSolver {
    fn solve(&self, a: &DMatrix<f64>, b: &DVector<f64>) -> SolverResult<DVector<f64>> {
        self.calls.borrow_mut().push((a.clone(), b.clone()));
        Ok(self.answer.clone())
    }
}

#[test]
fn implicit_step_matches_hand_computation() {
    // f1 = f2 = 1, dt = 1, M = 1:
    //   captured steady operator (BCs baked in):
    //     [ 1  0  0 ]
    //     [-1  2 -1 ]
    //     [ 0  0  1 ]
    //   A = diag(M)/dt + A_steady, then Dirichlet rows reasserted:
    //     [ 1  0  0 ]
    //     [-1  3 -1 ]
    //     [ 0  0  1 ]
    //   b = (M/dt) .* x_old with BC rows forced: [1, 0, 0]
    let (network, phase) = chain_parts();
    let bcs = end_bcs();
    let solver = RecordingSolver::new(DVector::from_vec(vec![1.0, 1.0 / 3.0, 0.0]));

    let mut settings = TransportSettings::default();
    settings.quantity = "c".to_string();
    settings.t_scheme = TimeScheme::Implicit;
    settings.t_step = 1.0;
    settings.t_final = 1.0;
    settings.t_output = 1.0;
    settings.tolerance = 1e-12;

    let mut tr = TransientTransport::new(
        &network,
        &phase,
        chain_operator(),
        settings,
        &solver,
        &bcs,
    )
    .unwrap();
    tr.set_ic(InitialCondition::Field(DVector::from_vec(vec![1.0, 0.0, 0.0])))
        .unwrap();
    let outcome = tr.run(None).unwrap();

    let calls = solver.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (a, b) = &calls[0];
    let expected_a =
        DMatrix::from_row_slice(3, 3, &[1.0, 0.0, 0.0, -1.0, 3.0, -1.0, 0.0, 0.0, 1.0]);
    let expected_b = DVector::from_vec(vec![1.0, 0.0, 0.0]);
    assert_eq!(a, &expected_a);
    assert_eq!(b, &expected_b);

    // Returned vector became the current field.
    assert_eq!(tr.field(), &DVector::from_vec(vec![1.0, 1.0 / 3.0, 0.0]));
    assert_eq!(outcome, Outcome::ReachedFinalTime { t: 1.0 });
}

#[test]
fn snapshots_exist_exactly_at_scheduled_instants() {
    // t_initial=0, dt=1, t_output=2, t_final=5 -> output instants {2, 4, 5}
    let (network, phase) = chain_parts();
    let bcs = end_bcs();
    let solver = DenseLu;

    let mut settings = TransportSettings::default();
    settings.quantity = "c".to_string();
    settings.t_step = 1.0;
    settings.t_final = 5.0;
    settings.t_output = 2.0;
    settings.tolerance = 1e-12;

    let mut tr = TransientTransport::new(
        &network,
        &phase,
        chain_operator(),
        settings,
        &solver,
        &bcs,
    )
    .unwrap();
    tr.set_ic(InitialCondition::Uniform(0.0)).unwrap();
    let outcome = tr.run(None).unwrap();
    assert_eq!(outcome, Outcome::ReachedFinalTime { t: 5.0 });

    assert!(tr.snapshot("c_initial").is_some());
    assert!(tr.snapshot("c0").is_some()); // t = 2
    assert!(tr.snapshot("c1").is_some()); // t = 4
    assert!(tr.snapshot("c2").is_some()); // t = 5
    assert!(tr.snapshot("c3").is_none());
    assert!(tr.snapshot("c_steady").is_none());
    assert_eq!(tr.snapshots().len(), 4);

    // The initial snapshot is the field before any step.
    assert_eq!(tr.snapshot("c_initial").unwrap(), &DVector::zeros(3));
}

#[test]
fn residual_below_tolerance_stops_marching_early() {
    let (network, phase) = chain_parts();
    let bcs = end_bcs();
    let solver = DenseLu;

    let mut settings = TransportSettings::default();
    settings.quantity = "c".to_string();
    settings.t_step = 1.0;
    settings.t_final = 100.0;
    settings.t_output = 50.0;
    settings.tolerance = 1e-3;

    let mut tr = TransientTransport::new(
        &network,
        &phase,
        chain_operator(),
        settings,
        &solver,
        &bcs,
    )
    .unwrap();
    tr.set_ic(InitialCondition::Uniform(0.0)).unwrap();
    let outcome = tr.run(None).unwrap();

    match outcome {
        Outcome::Converged { t, residual } => {
            assert!(t < 100.0);
            assert!(residual < 1e-3);
        }
        other => panic!("expected early convergence, got {other:?}"),
    }

    let steady = tr.snapshot("c_steady").expect("steady snapshot");
    // Interior pore relaxes toward the average of the fixed ends.
    assert!((steady[1] - 0.5).abs() < 1e-2);
    assert_eq!(steady, tr.field());
}

#[test]
fn final_and_output_times_normalize_upward() {
    let (network, phase) = chain_parts();
    let bcs = end_bcs();
    let solver = DenseLu;

    let mut settings = TransportSettings::default();
    settings.t_step = 0.1;
    settings.t_final = 0.95;
    settings.t_output = 0.25;
    settings.tolerance = 1e-12;

    let mut tr = TransientTransport::new(
        &network,
        &phase,
        chain_operator(),
        settings,
        &solver,
        &bcs,
    )
    .unwrap();
    tr.set_ic(InitialCondition::Uniform(0.0)).unwrap();
    tr.run(None).unwrap();

    assert!((tr.settings().t_final - 1.0).abs() < 1e-12);
    assert!((tr.settings().t_output - 0.3).abs() < 1e-12);
}
