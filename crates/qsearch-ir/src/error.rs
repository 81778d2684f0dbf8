//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// An operand refers to a qubit outside the register.
    #[error("Qubit {qubit} is out of range for a {num_qubits}-qubit register")]
    InvalidGateTarget {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the register.
        num_qubits: u32,
    },

    /// A measurement refers to a classical bit outside the classical register.
    #[error("Classical bit {clbit} is out of range for a {num_clbits}-bit register")]
    InvalidClbit {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Width of the classical register.
        num_clbits: u32,
    },

    /// Gate requires a different number of operands.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in '{gate_name}'")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the gate.
        gate_name: String,
    },

    /// The measurement directive is malformed.
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
