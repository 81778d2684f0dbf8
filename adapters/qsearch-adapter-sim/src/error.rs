//! Error types for the simulator crate.

use qsearch_ir::{IrError, QubitId};
use thiserror::Error;

/// Errors raised while evolving or sampling a register.
///
/// None of these are expected at runtime: each one points at a bug in circuit
/// assembly or gate application, so callers abort the run and report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A gate or measurement operand is outside the register.
    #[error("Qubit {qubit} is out of range for a {num_qubits}-qubit register")]
    InvalidGateTarget {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the register.
        num_qubits: usize,
    },

    /// Total probability drifted away from 1 before sampling.
    #[error("State is not normalized: total probability {norm}")]
    UnnormalizedState {
        /// Sum of squared amplitude magnitudes.
        norm: f64,
    },

    /// A gate was applied to a register that has already been measured.
    #[error("Register has already been measured")]
    RegisterAlreadyMeasured,

    /// Gate received the wrong number of operands.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: usize,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// The same qubit appears twice in one operation or measurement.
    #[error("Duplicate qubit {0} in operation")]
    DuplicateQubit(QubitId),

    /// Circuit is wider than the simulator accepts.
    #[error("Circuit has {num_qubits} qubits but simulator only supports {max_qubits}")]
    CircuitTooLarge {
        /// Width of the circuit.
        num_qubits: usize,
        /// Configured limit.
        max_qubits: usize,
    },

    /// Counts with keys outside the bit strings of one register width.
    #[error("Invalid counts: {0}")]
    InvalidCounts(String),

    /// Simulator configuration is invalid.
    #[error("Invalid simulator configuration: {0}")]
    InvalidConfig(String),

    /// The circuit itself is malformed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
