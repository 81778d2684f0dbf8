//! qsearch Local Statevector Simulator
//!
//! Exact gate-level simulation of small registers: a complex amplitude vector
//! of size 2^n evolved in place by H, X, CX and CZ, and sampled by the Born
//! rule with an injected random source.
//!
//! # Features
//!
//! - **Exact Simulation**: full statevector, no approximation
//! - **Fail-fast Validation**: operands are checked before any amplitude moves
//! - **Reproducible Sampling**: every sampler takes an explicit `rand::Rng`
//! - **Parallel Shots**: optional rayon runner with per-shot seed streams
//!
//! # Memory
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 20 | ~16 MB |
//! | 30 | ~16 GB |
//!
//! # Example
//!
//! ```rust
//! use qsearch_adapter_sim::run;
//! use qsearch_ir::Circuit;
//! use rand::SeedableRng;
//!
//! let circuit = Circuit::bell().unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let counts = run(&circuit, 1000, &mut rng).unwrap();
//!
//! // Only |00⟩ and |11⟩ appear, but every key is reported.
//! assert_eq!(counts.get("00") + counts.get("11"), 1000);
//! assert_eq!(counts.get("01"), 0);
//! ```

mod config;
mod error;
mod result;
mod runner;
mod simulator;
mod statevector;

pub use config::SimulatorConfig;
pub use error::{SimError, SimResult};
pub use result::{Counts, ExecutionResult, Outcome};
pub use runner::{
    MAX_QUBITS, run, run_parallel, run_parallel_with_tolerance, run_with_tolerance, shot_rng,
};
pub use simulator::SimulatorBackend;
pub use statevector::{DEFAULT_NORM_TOLERANCE, Statevector};
