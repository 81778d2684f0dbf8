//! `qsearch-grover`: Grover search over a small register.
//!
//! Builds the oracle and diffusion gate sequences for a marked basis state,
//! assembles them into a measured [`Circuit`](qsearch_ir::Circuit), and runs
//! the circuit on the statevector simulator.
//!
//! One parameterized oracle covers every target; the marked state is given as
//! a bit string in the same order outcomes are printed (highest qubit first).
//!
//! # Quick start
//!
//! ```rust
//! use qsearch_grover::{Target, assemble, run};
//! use rand::SeedableRng;
//!
//! let target = Target::parse("11").unwrap();
//! let circuit = assemble(&target).unwrap();
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let counts = run(&circuit, 1024, &mut rng).unwrap();
//!
//! assert_eq!(counts.get("11"), 1024);
//! assert_eq!(counts.len(), 4);
//! ```

pub mod diffusion;
pub mod error;
mod network;
pub mod oracle;
pub mod search;
pub mod target;

pub use diffusion::{append_diffusion, build_diffusion};
pub use error::{GroverError, GroverResult};
pub use oracle::{append_oracle, build_oracle};
pub use qsearch_adapter_sim::{Counts, run, run_parallel};
pub use search::{
    GroverSearch, assemble, assemble_with_iterations, optimal_iterations, success_probability,
};
pub use target::Target;
