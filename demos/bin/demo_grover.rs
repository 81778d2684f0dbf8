//! Grover's Search Demo
//!
//! Searches a two-qubit register for a marked basis state on the statevector
//! simulator and prints the measured counts.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qsearch_adapter_sim::{Counts, SimulatorBackend, SimulatorConfig};
use qsearch_demos::{Report, shots_progress};
use qsearch_grover::{GroverSearch, Target};

/// Shots per progress-bar step in sequential mode.
const CHUNK: u32 = 256;

#[derive(Parser, Debug)]
#[command(name = "demo-grover")]
#[command(about = "Run Grover's search for a marked basis state")]
struct Args {
    /// Marked state as a bit string, highest qubit first (e.g. 01)
    #[arg(short, long, default_value = "11")]
    target: String,

    /// Number of shots
    #[arg(short, long, default_value = "1024")]
    shots: u32,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Number of Grover iterations (0 = optimal)
    #[arg(short, long, default_value = "0")]
    iterations: usize,

    /// Spread shots across threads
    #[arg(long)]
    parallel: bool,

    /// Simulator config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let target = Target::parse(&args.target).context("invalid --target")?;

    let mut search = GroverSearch::new(target);
    if args.iterations > 0 {
        search = search.with_iterations(args.iterations);
    }

    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SimulatorConfig::from_json(&json)?
        }
        None => SimulatorConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.parallel {
        config = config.with_parallel(true);
    }
    let backend = SimulatorBackend::from_config(config)?;

    let report = Report::stdout();
    report.header("Grover's Search Demo")?;

    report.section("Problem Setup")?;
    report.field("Qubits", target.num_qubits())?;
    report.field("Search space size", 1u64 << target.num_qubits())?;
    report.field("Marked state", format!("|{target}⟩ (index {})", target.index()))?;
    report.field("Grover iterations", search.iterations())?;

    let circuit = search.circuit()?;
    report.section("Circuit")?;
    report.field("Name", circuit.name())?;
    report.field("Gates", circuit.len())?;
    report.field("Depth", circuit.depth())?;
    report.field("Backend", backend.name())?;

    report.section("Execution")?;
    info!("running {} shots for target {}", args.shots, target);
    let (counts, elapsed_ms) = if backend.config().parallel {
        let result = backend.execute(&circuit, args.shots)?;
        (result.counts, result.execution_time_ms)
    } else {
        run_with_progress(&backend, &circuit, args.shots)?
    };
    report.field("Shots", counts.total())?;
    if let Some(ms) = elapsed_ms {
        report.field("Time", format!("{ms} ms"))?;
    }

    let marked = target.to_string();
    report.section("Counts")?;
    report.counts(&counts, &marked)?;

    report.section("Summary")?;
    let expected = search.expected_success_probability();
    let observed = counts.get(&marked) as f64 / counts.total().max(1) as f64;
    report.field("Expected success", format!("{:.1}%", expected * 100.0))?;
    report.field("Observed success", format!("{:.1}%", observed * 100.0))?;

    match counts.most_frequent() {
        Some((best, _)) if best == marked => report.found(&format!("Found |{best}⟩"))?,
        Some((best, _)) => report.missed(&format!("Most frequent outcome was |{best}⟩"))?,
        None => report.missed("No shots were run")?,
    }

    Ok(())
}

/// Run shots sequentially in chunks so the progress bar can advance.
fn run_with_progress(
    backend: &SimulatorBackend,
    circuit: &qsearch_ir::Circuit,
    shots: u32,
) -> anyhow::Result<(Counts, Option<u64>)> {
    let mut rng = match backend.config().seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let pb = shots_progress(shots);
    let mut counts = Counts::zeroed(circuit.num_clbits());
    let mut elapsed_ms = 0;
    let mut done = 0;
    while done < shots {
        let chunk = CHUNK.min(shots - done);
        let result = backend.execute_with_rng(circuit, chunk, &mut rng)?;
        counts = counts.merge(result.counts)?;
        elapsed_ms += result.execution_time_ms.unwrap_or(0);
        done += chunk;
        pb.inc(u64::from(chunk));
    }
    pb.finish_and_clear();

    Ok((counts, Some(elapsed_ms)))
}
