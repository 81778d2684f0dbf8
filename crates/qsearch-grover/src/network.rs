//! Phase flip of the all-ones basis state with the available gates.

use qsearch_ir::{Instruction, QubitId};

use crate::error::{GroverError, GroverResult};

/// How the two-qubit controlled-Z is realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PhaseNetwork {
    /// Hadamards around a CX on the highest qubit.
    CxSandwich,
    /// A native CZ gate.
    Cz,
}

/// Gates that negate the amplitude of |1...1⟩ on qubits `0..num_qubits`.
///
/// One qubit uses Z = H·X·H. Wider registers would need a multi-controlled
/// phase, which the gate set does not provide.
pub(crate) fn phase_flip_all_ones(
    num_qubits: usize,
    network: PhaseNetwork,
) -> GroverResult<Vec<Instruction>> {
    let q0 = QubitId(0);
    let q1 = QubitId(1);
    match (num_qubits, network) {
        (1, _) => Ok(vec![Instruction::h(q0), Instruction::x(q0), Instruction::h(q0)]),
        (2, PhaseNetwork::CxSandwich) => Ok(vec![
            Instruction::h(q1),
            Instruction::cx(q0, q1),
            Instruction::h(q1),
        ]),
        (2, PhaseNetwork::Cz) => Ok(vec![Instruction::cz(q0, q1)]),
        (n, _) => Err(GroverError::UnsupportedWidth(n)),
    }
}

/// One single-qubit gate per qubit.
pub(crate) fn layer(
    num_qubits: usize,
    gate: fn(QubitId) -> Instruction,
) -> impl Iterator<Item = Instruction> {
    (0..num_qubits as u32).map(move |q| gate(QubitId(q)))
}
