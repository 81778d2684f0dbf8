//! Phase oracle marking a single basis state.
//!
//! The oracle flips the sign of the target amplitude and leaves every other
//! amplitude alone: X on each qubit whose target bit is 0 maps the target to
//! |1...1⟩, a controlled-Z network negates |1...1⟩, and the X layer is undone.

use qsearch_ir::{Circuit, Instruction, QubitId};
use tracing::debug;

use crate::error::GroverResult;
use crate::network::{PhaseNetwork, phase_flip_all_ones};
use crate::target::Target;

/// Gate sequence negating the amplitude of `target`.
///
/// On two qubits the controlled-Z is realized as H–CX–H on qubit 1.
pub fn build_oracle(target: &Target) -> GroverResult<Vec<Instruction>> {
    let n = target.num_qubits();
    let network = phase_flip_all_ones(n, PhaseNetwork::CxSandwich)?;
    let flips: Vec<_> = (0..n)
        .filter(|&q| !target.bit(q))
        .map(|q| Instruction::x(QubitId(q as u32)))
        .collect();

    let mut seq = flips.clone();
    seq.extend(network);
    seq.extend(flips);

    debug!(%target, gates = seq.len(), "built oracle");
    Ok(seq)
}

/// Append the oracle for `target` to `circuit`.
///
/// Nothing is appended if any gate falls outside the circuit.
pub fn append_oracle(circuit: &mut Circuit, target: &Target) -> GroverResult<()> {
    circuit.extend(build_oracle(target)?)?;
    Ok(())
}
