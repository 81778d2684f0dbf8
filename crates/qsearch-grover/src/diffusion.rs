//! Grover diffusion operator (inversion about the mean).

use qsearch_ir::{Circuit, Instruction};

use crate::error::GroverResult;
use crate::network::{PhaseNetwork, layer, phase_flip_all_ones};

/// Gate sequence for the diffusion operator on `num_qubits` qubits.
///
/// H and X on every qubit, a CZ marking what was |0...0⟩, then X and H again.
/// The result equals 2|s⟩⟨s| − I up to a global phase of −1, where |s⟩ is the
/// uniform superposition. The sequence is its own inverse.
pub fn build_diffusion(num_qubits: usize) -> GroverResult<Vec<Instruction>> {
    let network = phase_flip_all_ones(num_qubits, PhaseNetwork::Cz)?;

    let mut seq: Vec<_> = layer(num_qubits, Instruction::h)
        .chain(layer(num_qubits, Instruction::x))
        .collect();
    seq.extend(network);
    seq.extend(layer(num_qubits, Instruction::x));
    seq.extend(layer(num_qubits, Instruction::h));
    Ok(seq)
}

/// Append the diffusion operator to `circuit`.
pub fn append_diffusion(circuit: &mut Circuit, num_qubits: usize) -> GroverResult<()> {
    circuit.extend(build_diffusion(num_qubits)?)?;
    Ok(())
}
