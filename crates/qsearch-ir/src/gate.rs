//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The gates the simulator understands.
///
/// Controlled gates take their operands control first, target second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::H | StandardGate::X => 1,
            StandardGate::CX | StandardGate::CZ => 2,
        }
    }

    /// Check if this gate has a control operand.
    #[inline]
    pub fn is_controlled(&self) -> bool {
        self.num_qubits() == 2
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
