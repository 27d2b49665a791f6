//! R1CS witness solver CLI

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use p3_baby_bear::BabyBear;
use p3_mersenne_31::Mersenne31;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use r1cs_solver::{Assignment, R1cs, Solver, SolverConfig, SolverField};

#[derive(Parser)]
#[command(name = "r1cs-solver")]
#[command(about = "Witness solver for rank-1 constraint systems", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Field the constraint system is defined over
    #[arg(long, value_enum, default_value_t = FieldChoice::BabyBear, global = true)]
    field: FieldChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FieldChoice {
    BabyBear,
    Mersenne31,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a constraint system and write the witness as JSON
    Solve {
        /// Path to the constraint system (.json, or bincode otherwise)
        #[arg(short, long)]
        circuit: PathBuf,

        /// Path to the JSON input assignment
        #[arg(short, long)]
        inputs: PathBuf,

        /// Output path for the witness (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Solve and print tagged wires, and optionally the inputs, by name
    Inspect {
        /// Path to the constraint system (.json, or bincode otherwise)
        #[arg(short, long)]
        circuit: PathBuf,

        /// Path to the JSON input assignment
        #[arg(short, long)]
        inputs: PathBuf,

        /// Also list every input by name
        #[arg(long)]
        show_inputs: bool,
    },

    /// Show information about a constraint system
    Info {
        /// Path to the constraint system (.json, or bincode otherwise)
        #[arg(short, long)]
        circuit: PathBuf,
    },
}

/// Witness as decimal strings
#[derive(Serialize)]
struct WitnessReport {
    wire_values: Vec<String>,
    a: Vec<String>,
    b: Vec<String>,
    c: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.field {
        FieldChoice::BabyBear => run::<BabyBear>(cli.command),
        FieldChoice::Mersenne31 => run::<Mersenne31>(cli.command),
    }
}

fn run<F: SolverField>(command: Commands) -> Result<()> {
    match command {
        Commands::Solve {
            circuit,
            inputs,
            output,
        } => cmd_solve::<F>(&circuit, &inputs, output),
        Commands::Inspect {
            circuit,
            inputs,
            show_inputs,
        } => cmd_inspect::<F>(&circuit, &inputs, show_inputs),
        Commands::Info { circuit } => cmd_info::<F>(&circuit),
    }
}

fn load_circuit<F: SolverField>(path: &Path) -> Result<R1cs<F>> {
    info!("Loading constraint system from {:?}", path);
    let r1cs = R1cs::<F>::read(path)
        .with_context(|| format!("cannot load constraint system {}", path.display()))?;
    info!(
        "Loaded {} constraints over {} wires",
        r1cs.nb_constraints(),
        r1cs.nb_wires()
    );
    Ok(r1cs)
}

fn load_assignment(path: &Path) -> Result<Assignment> {
    let data = std::fs::read(path)
        .with_context(|| format!("cannot read assignment {}", path.display()))?;
    let assignment: Assignment = serde_json::from_slice(&data)
        .with_context(|| format!("malformed assignment {}", path.display()))?;
    Ok(assignment)
}

fn decimals<F: SolverField>(values: &[F]) -> Vec<String> {
    values.iter().map(SolverField::to_decimal).collect()
}

fn cmd_solve<F: SolverField>(circuit: &Path, inputs: &Path, output: Option<PathBuf>) -> Result<()> {
    // Loading already validated the system
    let r1cs = load_circuit::<F>(circuit)?;
    let assignment = load_assignment(inputs)?;

    let solver = Solver::unchecked(&r1cs, SolverConfig::default());
    let (witness, result) = solver.solve_to_witness(&assignment);

    if let Err(e) = result {
        warn!("Solving failed: {}", e);
        println!("Solve: FAILED - {}", e);
        std::process::exit(1);
    }

    let report = WitnessReport {
        wire_values: decimals(&witness.wire_values),
        a: decimals(&witness.a),
        b: decimals(&witness.b),
        c: decimals(&witness.c),
    };
    let json = serde_json::to_string_pretty(&report)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            info!("Witness saved to {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn cmd_inspect<F: SolverField>(circuit: &Path, inputs: &Path, show_inputs: bool) -> Result<()> {
    let r1cs = load_circuit::<F>(circuit)?;
    let assignment = load_assignment(inputs)?;

    let inspection = Solver::unchecked(&r1cs, SolverConfig::default())
        .inspect(&assignment, show_inputs)?;

    let named: BTreeMap<&str, String> = inspection
        .values()
        .iter()
        .map(|(name, value)| (name.as_str(), value.to_string()))
        .collect();
    println!("{}", serde_json::to_string_pretty(&named)?);

    if let Some(e) = inspection.solve_error() {
        println!("Solve: FAILED - {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_info<F: SolverField>(circuit: &Path) -> Result<()> {
    let r1cs = load_circuit::<F>(circuit)?;
    let wires = r1cs.wires();

    println!("Constraint System Information");
    println!("=============================");
    println!("Field order: {}", r1cs.field_order());
    println!("Size: {} bytes", r1cs.size_bytes());
    println!();
    println!("Constraints: {}", r1cs.nb_constraints());
    println!("  Computational: {}", r1cs.nb_computed());
    println!("Coefficients: {}", r1cs.nb_coefficients());
    println!("Wires: {}", r1cs.nb_wires());
    println!("  Internal: {}", wires.nb_internal);
    println!("  Secret: {:?}", wires.secret_names);
    println!("  Public: {:?}", wires.public_names);
    println!("Tags: {}", wires.tags.values().map(Vec::len).sum::<usize>());
    println!("Log entries: {}", r1cs.logs().len());

    Ok(())
}
