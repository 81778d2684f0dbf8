//! Circuit assembly and execution for a Grover search.

use rand::Rng;
use std::f64::consts::PI;
use tracing::{debug, instrument};

use qsearch_adapter_sim::{Counts, ExecutionResult, SimulatorBackend};
use qsearch_ir::{Circuit, Instruction};

use crate::diffusion::build_diffusion;
use crate::error::{GroverError, GroverResult};
use crate::network::layer;
use crate::oracle::build_oracle;
use crate::target::Target;

/// Assemble one Grover iteration for `target`.
///
/// Hadamard on every qubit, the oracle, the diffusion operator, then qubit
/// `i` measured into classical bit `i`. On two qubits a single iteration
/// drives the marked state to probability 1.
pub fn assemble(target: &Target) -> GroverResult<Circuit> {
    assemble_with_iterations(target, 1)
}

/// Assemble a Grover circuit with `iterations` oracle+diffusion rounds.
pub fn assemble_with_iterations(target: &Target, iterations: usize) -> GroverResult<Circuit> {
    let n = target.num_qubits();
    let width = u32::try_from(n).map_err(|_| GroverError::UnsupportedWidth(n))?;

    let oracle = build_oracle(target)?;
    let diffusion = build_diffusion(n)?;

    let mut circuit = Circuit::with_size(format!("grover_{target}"), width, width);
    circuit.extend(layer(n, Instruction::h))?;
    for _ in 0..iterations {
        circuit.extend(oracle.iter().cloned())?;
        circuit.extend(diffusion.iter().cloned())?;
    }
    circuit.measure_all()?;

    debug!(
        %target,
        iterations,
        gates = circuit.len(),
        depth = circuit.depth(),
        "assembled Grover circuit"
    );
    Ok(circuit)
}

/// Number of iterations maximizing the success probability for one marked
/// state among 2^n: ⌊π / 4θ⌋ with sin θ = 1/√(2^n), at least 1.
pub fn optimal_iterations(num_qubits: usize) -> usize {
    let theta = grover_angle(num_qubits);
    ((PI / (4.0 * theta)).floor() as usize).max(1)
}

/// Ideal probability of measuring the marked state after `iterations`
/// rounds: sin²((2k+1)θ).
pub fn success_probability(num_qubits: usize, iterations: usize) -> f64 {
    let theta = grover_angle(num_qubits);
    ((2 * iterations + 1) as f64 * theta).sin().powi(2)
}

fn grover_angle(num_qubits: usize) -> f64 {
    let n = 2f64.powi(num_qubits as i32);
    (1.0 / n.sqrt()).asin()
}

/// A configured search: target plus iteration count.
#[derive(Debug, Clone, PartialEq)]
pub struct GroverSearch {
    target: Target,
    iterations: usize,
}

impl GroverSearch {
    /// Search for `target` with the optimal iteration count.
    pub fn new(target: Target) -> Self {
        Self {
            iterations: optimal_iterations(target.num_qubits()),
            target,
        }
    }

    /// Override the number of iterations.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// The marked state.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Number of oracle+diffusion rounds.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Ideal success probability of this configuration.
    pub fn expected_success_probability(&self) -> f64 {
        success_probability(self.target.num_qubits(), self.iterations)
    }

    /// Build the circuit.
    pub fn circuit(&self) -> GroverResult<Circuit> {
        assemble_with_iterations(&self.target, self.iterations)
    }

    /// Run `shots` shots on the calling thread with `rng`.
    #[instrument(skip(self, rng), fields(target = %self.target))]
    pub fn run<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> GroverResult<Counts> {
        let circuit = self.circuit()?;
        Ok(qsearch_adapter_sim::run(&circuit, shots, rng)?)
    }

    /// Run `shots` shots on a configured backend.
    pub fn run_on(
        &self,
        backend: &SimulatorBackend,
        shots: u32,
    ) -> GroverResult<ExecutionResult> {
        let circuit = self.circuit()?;
        Ok(backend.execute(&circuit, shots)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_iterations() {
        assert_eq!(optimal_iterations(1), 1);
        assert_eq!(optimal_iterations(2), 1); // θ = π/6, π/(4θ) = 1.5
        assert_eq!(optimal_iterations(4), 3);
    }

    #[test]
    fn test_success_probability() {
        assert!((success_probability(2, 1) - 1.0).abs() < 1e-12);
        assert!((success_probability(2, 0) - 0.25).abs() < 1e-12);
        assert!((success_probability(2, 2) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_assemble_shape() {
        let circuit = assemble(&Target::parse("11").unwrap()).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.name(), "grover_11");
        // 2 H + 3 oracle + 9 diffusion
        assert_eq!(circuit.len(), 14);
        assert_eq!(circuit.measurements().len(), 2);
    }

    #[test]
    fn test_iterations_repeat_rounds() {
        let t = Target::parse("10").unwrap();
        let one = assemble_with_iterations(&t, 1).unwrap();
        let two = assemble_with_iterations(&t, 2).unwrap();
        let zero = assemble_with_iterations(&t, 0).unwrap();
        let round = one.len() - 2;
        assert_eq!(two.len(), 2 + 2 * round);
        assert_eq!(zero.len(), 2);
    }

    #[test]
    fn test_search_defaults() {
        let search = GroverSearch::new(Target::parse("01").unwrap());
        assert_eq!(search.iterations(), 1);
        assert!((search.expected_success_probability() - 1.0).abs() < 1e-12);
        assert_eq!(search.with_iterations(3).iterations(), 3);
    }

    #[test]
    fn test_unsupported_width() {
        let t = Target::parse("101").unwrap();
        assert!(matches!(assemble(&t), Err(GroverError::UnsupportedWidth(3))));
    }

    #[test]
    fn test_unsupported_width_regardless_of_iterations() {
        let t = Target::parse("101").unwrap();
        for k in [0, 1, 4] {
            assert!(matches!(
                assemble_with_iterations(&t, k),
                Err(GroverError::UnsupportedWidth(3))
            ));
        }
    }
}
