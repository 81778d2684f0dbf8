//! Simulator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::runner::MAX_QUBITS;
use crate::statevector::DEFAULT_NORM_TOLERANCE;

/// Configuration for a [`SimulatorBackend`](crate::SimulatorBackend).
///
/// Every field has a default, so a partial JSON object such as
/// `{"seed": 7}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Backend name, used in logs.
    pub name: String,
    /// Widest circuit the backend accepts.
    pub max_qubits: u32,
    /// Allowed deviation of total probability from 1 before sampling.
    pub norm_tolerance: f64,
    /// Fixed seed for reproducible runs. `None` draws from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Run shots on the rayon pool.
    pub parallel: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            name: "statevector".into(),
            max_qubits: 20,
            norm_tolerance: DEFAULT_NORM_TOLERANCE,
            seed: None,
            parallel: false,
        }
    }
}

impl SimulatorConfig {
    /// Create a configuration with the given name and default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> SimResult<Self> {
        serde_json::from_str(json).map_err(|e| SimError::InvalidConfig(e.to_string()))
    }

    /// Set the qubit limit.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the normalization tolerance.
    #[must_use]
    pub fn with_norm_tolerance(mut self, tolerance: f64) -> Self {
        self.norm_tolerance = tolerance;
        self
    }

    /// Fix the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable the parallel shot runner.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the settings are usable.
    pub fn validate(&self) -> SimResult<()> {
        if self.max_qubits == 0 || self.max_qubits as usize > MAX_QUBITS {
            return Err(SimError::InvalidConfig(format!(
                "max_qubits must be in 1..={MAX_QUBITS}, got {}",
                self.max_qubits
            )));
        }
        check_norm_tolerance(self.norm_tolerance)
    }
}

/// A normalization tolerance must be finite and positive.
pub(crate) fn check_norm_tolerance(tolerance: f64) -> SimResult<()> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(SimError::InvalidConfig(format!(
            "norm_tolerance must be finite and positive, got {tolerance}"
        )));
    }
    Ok(())
}
