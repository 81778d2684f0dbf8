//! Gate operations combining a gate with its operands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// A gate applied to specific qubits.
///
/// Immutable once built; a circuit shares its instructions read-only across
/// every shot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate to apply.
    pub gate: StandardGate,
    /// Operands, control first for controlled gates.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Hadamard on `qubit`.
    pub fn h(qubit: QubitId) -> Self {
        Self::gate(StandardGate::H, [qubit])
    }

    /// Pauli-X on `qubit`.
    pub fn x(qubit: QubitId) -> Self {
        Self::gate(StandardGate::X, [qubit])
    }

    /// Controlled-X with `control` and `target`.
    pub fn cx(control: QubitId, target: QubitId) -> Self {
        Self::gate(StandardGate::CX, [control, target])
    }

    /// Controlled-Z with `control` and `target`.
    pub fn cz(control: QubitId, target: QubitId) -> Self {
        Self::gate(StandardGate::CZ, [control, target])
    }

    /// Get the name of the gate.
    pub fn name(&self) -> &'static str {
        self.gate.name()
    }

    /// Check that the operands fit a register of `num_qubits` qubits.
    ///
    /// Arity is checked first, then every operand's range, then duplicates.
    pub fn validate(&self, num_qubits: u32) -> IrResult<()> {
        let expected = self.gate.num_qubits();
        if self.qubits.len() != expected as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: self.name().to_string(),
                expected,
                got: self.qubits.len() as u32,
            });
        }

        if let Some(&qubit) = self.qubits.iter().find(|q| q.0 >= num_qubits) {
            return Err(IrError::InvalidGateTarget { qubit, num_qubits });
        }

        if let [a, b] = self.qubits.as_slice() {
            if a == b {
                return Err(IrError::DuplicateQubit {
                    qubit: *a,
                    gate_name: self.name().to_string(),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate)?;
        for (i, q) in self.qubits.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{q}")?;
        }
        Ok(())
    }
}
