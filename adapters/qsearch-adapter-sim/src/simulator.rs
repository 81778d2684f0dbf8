//! Simulator backend implementation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::{Rng, RngCore};
use std::time::Instant;
use tracing::{debug, instrument};

use qsearch_ir::Circuit;

use crate::config::SimulatorConfig;
use crate::error::{SimError, SimResult};
use crate::result::ExecutionResult;
use crate::runner;

/// Local simulator backend.
///
/// Constructed once and passed by reference to every run. Holds no
/// per-run state: each execution builds its own registers.
#[derive(Debug, Clone, Default)]
pub struct SimulatorBackend {
    config: SimulatorConfig,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            config: SimulatorConfig::default().with_max_qubits(max_qubits),
        }
    }

    /// Create a backend from a validated configuration.
    pub fn from_config(config: SimulatorConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Backend name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Active configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Execute `circuit` for `shots` shots.
    ///
    /// Uses the configured seed when set and OS entropy otherwise, and the
    /// parallel runner when enabled.
    #[instrument(skip(self, circuit), fields(backend = %self.config.name))]
    pub fn execute(&self, circuit: &Circuit, shots: u32) -> SimResult<ExecutionResult> {
        self.check_size(circuit)?;

        if self.config.parallel {
            let seed = self
                .config
                .seed
                .unwrap_or_else(|| StdRng::from_entropy().next_u64());
            let start = Instant::now();
            let counts = runner::run_parallel_with_tolerance(
                circuit,
                shots,
                seed,
                self.config.norm_tolerance,
            )?;
            return Ok(ExecutionResult::new(counts, shots)
                .with_execution_time(start.elapsed().as_millis() as u64));
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.execute_with_rng(circuit, shots, &mut rng)
    }

    /// Execute `circuit` on the calling thread with a caller-supplied source.
    pub fn execute_with_rng<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        shots: u32,
        rng: &mut R,
    ) -> SimResult<ExecutionResult> {
        self.check_size(circuit)?;

        let start = Instant::now();
        let counts =
            runner::run_with_tolerance(circuit, shots, self.config.norm_tolerance, rng)?;
        let elapsed = start.elapsed();
        debug!("{} finished {} shots in {:?}", self.config.name, shots, elapsed);

        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }

    fn check_size(&self, circuit: &Circuit) -> SimResult<()> {
        let max_qubits = self.config.max_qubits as usize;
        if circuit.num_qubits() > max_qubits {
            return Err(SimError::CircuitTooLarge {
                num_qubits: circuit.num_qubits(),
                max_qubits,
            });
        }
        Ok(())
    }
}
