use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use nalgebra::DMatrix;
use pn_network::{Network, Phase};
use pn_solver::DenseLu;
use pn_transport::{
    FixedValueBcs, InitialCondition, Outcome, TimeScheme, TransientTransport, TransportSettings,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pn-cli")]
#[command(about = "Porenet CLI - transient pore-network transport demo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a settings JSON file
    Validate {
        /// Path to the settings JSON file
        settings_path: PathBuf,
    },
    /// Run transient diffusion along a 1-D chain of pores
    Run {
        /// Number of pores in the chain
        #[arg(long, default_value_t = 10)]
        pores: usize,
        /// Integration scheme: implicit, cranknicolson, or steady
        #[arg(long, default_value = "implicit")]
        scheme: String,
        /// Time step in seconds
        #[arg(long, default_value_t = 0.1)]
        dt: f64,
        /// End time in seconds
        #[arg(long, default_value_t = 10.0)]
        t_final: f64,
        /// Snapshot interval in seconds
        #[arg(long, default_value_t = 2.0)]
        t_output: f64,
        /// Relative-residual tolerance for early stop
        #[arg(long, default_value_t = 1e-6)]
        tolerance: f64,
        /// Fixed concentration at the first pore
        #[arg(long, default_value_t = 1.0)]
        inlet: f64,
        /// Fixed concentration at the last pore
        #[arg(long, default_value_t = 0.0)]
        outlet: f64,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { settings_path } => cmd_validate(&settings_path),
        Commands::Run {
            pores,
            scheme,
            dt,
            t_final,
            t_output,
            tolerance,
            inlet,
            outlet,
        } => cmd_run(pores, &scheme, dt, t_final, t_output, tolerance, inlet, outlet),
    }
}

fn cmd_validate(path: &Path) -> CliResult<()> {
    let text = fs::read_to_string(path)?;
    let settings: TransportSettings = serde_json::from_str(&text)?;
    settings.validate()?;
    println!("OK: {}", path.display());
    println!("  quantity:  {}", settings.quantity);
    println!("  t_scheme:  {}", settings.t_scheme);
    println!(
        "  schedule:  t = {}..{} step {} (output every {})",
        settings.t_initial, settings.t_final, settings.t_step, settings.t_output
    );
    println!("  tolerance: {}", settings.tolerance);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    pores: usize,
    scheme: &str,
    dt: f64,
    t_final: f64,
    t_output: f64,
    tolerance: f64,
    inlet: f64,
    outlet: f64,
) -> CliResult<()> {
    if pores < 2 {
        return Err("chain needs at least 2 pores".into());
    }

    let network = Network::uniform(pores, 1.0)?;
    let mut phase = Phase::new("phase");
    phase.set_property("pore.molar_density", 1.0)?;

    let mut settings = TransportSettings::default();
    settings.quantity = "c".to_string();
    settings.t_scheme = scheme.parse::<TimeScheme>()?;
    settings.t_step = dt;
    settings.t_final = t_final;
    settings.t_output = t_output;
    settings.tolerance = tolerance;

    let mut bcs = FixedValueBcs::new();
    bcs.set(0, inlet);
    bcs.set(pores - 1, outlet);

    let solver = DenseLu;
    let mut transport = TransientTransport::new(
        &network,
        &phase,
        chain_laplacian(pores),
        settings,
        &solver,
        &bcs,
    )?;
    transport.set_ic(InitialCondition::Uniform(outlet))?;

    let outcome = transport.run(None)?;
    match &outcome {
        Outcome::SteadySolve => println!("Steady solve complete"),
        Outcome::Converged { t, residual } => {
            println!("Converged at t = {t} s (residual {residual:.3e})")
        }
        Outcome::ReachedFinalTime { t } => println!("Reached t_final = {t} s"),
    }

    println!("{:<14} {:>10} {:>10} {:>10}", "snapshot", "min", "mean", "max");
    for (key, field) in transport.snapshots() {
        let min = field.min();
        let max = field.max();
        let mean = field.mean();
        println!("{key:<14} {min:>10.4} {mean:>10.4} {max:>10.4}");
    }
    Ok(())
}

/// Unit-conductance diffusion operator for a linear chain of pores.
///
/// Plays the role of the external steady assembler for this demo; real
/// networks get their operator from pore/throat geometry.
fn chain_laplacian(n: usize) -> DMatrix<f64> {
    let mut a = DMatrix::zeros(n, n);
    for i in 0..n {
        if i > 0 {
            a[(i, i - 1)] = -1.0;
            a[(i, i)] += 1.0;
        }
        if i + 1 < n {
            a[(i, i + 1)] = -1.0;
            a[(i, i)] += 1.0;
        }
    }
    a
}
