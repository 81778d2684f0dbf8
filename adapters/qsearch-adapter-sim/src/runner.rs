//! Shot execution: replay a circuit on fresh registers and tally outcomes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, instrument};

use qsearch_ir::{Circuit, QubitId};

use crate::config::check_norm_tolerance;
use crate::error::{SimError, SimResult};
use crate::result::{Counts, Outcome};
use crate::statevector::{DEFAULT_NORM_TOLERANCE, Statevector};

/// Hard ceiling on register width; 2^30 amplitudes is 16 GiB.
pub const MAX_QUBITS: usize = 30;

/// Run `shots` independent executions of `circuit`, drawing from `rng`.
///
/// Every shot starts from a fresh |0...0⟩ register, replays all gates and
/// samples the measurement directive once. The returned counts carry every
/// possible bit string. Identical `rng` sequences give identical counts.
pub fn run<R: Rng + ?Sized>(circuit: &Circuit, shots: u32, rng: &mut R) -> SimResult<Counts> {
    run_with_tolerance(circuit, shots, DEFAULT_NORM_TOLERANCE, rng)
}

/// [`run`] with an explicit normalization tolerance.
#[instrument(skip(circuit, rng), fields(circuit = circuit.name()))]
pub fn run_with_tolerance<R: Rng + ?Sized>(
    circuit: &Circuit,
    shots: u32,
    tolerance: f64,
    rng: &mut R,
) -> SimResult<Counts> {
    let start = Instant::now();
    let order = prepare(circuit, tolerance)?;
    debug!(
        "Starting simulation: {} qubits, {} gates, {} shots",
        circuit.num_qubits(),
        circuit.len(),
        shots
    );

    let mut counts = Counts::zeroed(order.len());
    for shot in 0..shots {
        let outcome = run_shot(circuit, &order, tolerance, rng)?;
        counts.record(&outcome)?;

        if shot > 0 && shot % 1000 == 0 {
            debug!("Completed {} shots", shot);
        }
    }

    debug!("Simulation completed in {:?}", start.elapsed());
    Ok(counts)
}

/// Run shots on the rayon pool.
///
/// Shot `i` draws from its own generator seeded from `(seed, i)`, so the
/// result depends only on `seed` and not on how shots are scheduled across
/// threads. Per-worker tallies are merged in a reduce step.
pub fn run_parallel(circuit: &Circuit, shots: u32, seed: u64) -> SimResult<Counts> {
    run_parallel_with_tolerance(circuit, shots, seed, DEFAULT_NORM_TOLERANCE)
}

/// [`run_parallel`] with an explicit normalization tolerance.
#[instrument(skip(circuit), fields(circuit = circuit.name()))]
pub fn run_parallel_with_tolerance(
    circuit: &Circuit,
    shots: u32,
    seed: u64,
    tolerance: f64,
) -> SimResult<Counts> {
    let start = Instant::now();
    let order = prepare(circuit, tolerance)?;
    let width = order.len();
    debug!(
        "Starting parallel simulation: {} qubits, {} shots, {} threads",
        circuit.num_qubits(),
        shots,
        rayon::current_num_threads()
    );

    let counts = (0..shots)
        .into_par_iter()
        .try_fold(
            || Counts::zeroed(width),
            |mut acc, shot| -> SimResult<Counts> {
                let mut rng = shot_rng(seed, shot);
                let outcome = run_shot(circuit, &order, tolerance, &mut rng)?;
                acc.record(&outcome)?;
                Ok(acc)
            },
        )
        .try_reduce(|| Counts::zeroed(width), Counts::merge)?;

    debug!("Parallel simulation completed in {:?}", start.elapsed());
    Ok(counts)
}

/// Deterministic per-shot generator for the parallel runner.
pub fn shot_rng(seed: u64, shot: u32) -> StdRng {
    StdRng::seed_from_u64(splitmix64(
        seed ^ u64::from(shot).wrapping_mul(0x9E37_79B9_7F4A_7C15),
    ))
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Checks shared by both runners; returns the measured qubits by clbit.
fn prepare(circuit: &Circuit, tolerance: f64) -> SimResult<Vec<QubitId>> {
    check_norm_tolerance(tolerance)?;
    if circuit.num_qubits() > MAX_QUBITS {
        return Err(SimError::CircuitTooLarge {
            num_qubits: circuit.num_qubits(),
            max_qubits: MAX_QUBITS,
        });
    }
    Ok(circuit.measurement_order()?)
}

fn run_shot<R: Rng + ?Sized>(
    circuit: &Circuit,
    order: &[QubitId],
    tolerance: f64,
    rng: &mut R,
) -> SimResult<Outcome> {
    let mut sv = Statevector::new(circuit.num_qubits()).with_norm_tolerance(tolerance);
    sv.apply_all(circuit.instructions())?;
    sv.sample(order, rng)
}
