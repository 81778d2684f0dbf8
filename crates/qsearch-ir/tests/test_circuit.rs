//! Property tests for circuit construction.

use proptest::prelude::*;
use qsearch_ir::{Circuit, Instruction, IrError, QubitId, StandardGate};

fn gate_strategy() -> impl Strategy<Value = StandardGate> {
    prop_oneof![
        Just(StandardGate::H),
        Just(StandardGate::X),
        Just(StandardGate::CX),
        Just(StandardGate::CZ),
    ]
}

fn instruction_strategy(max_qubit: u32) -> impl Strategy<Value = Instruction> {
    (gate_strategy(), 0..max_qubit, 0..max_qubit).prop_map(|(gate, a, b)| {
        if gate.is_controlled() {
            Instruction::gate(gate, [QubitId(a), QubitId(b)])
        } else {
            Instruction::gate(gate, [QubitId(a)])
        }
    })
}

proptest! {
    #[test]
    fn accepted_instructions_stay_in_range(
        width in 1u32..5,
        seq in prop::collection::vec(instruction_strategy(6), 0..20),
    ) {
        let mut circuit = Circuit::with_size("prop", width, 0);
        for inst in seq {
            let _ = circuit.apply(inst);
        }
        for inst in circuit.instructions() {
            prop_assert!(inst.qubits.iter().all(|q| q.0 < width));
            if let [a, b] = inst.qubits.as_slice() {
                prop_assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn rejected_extend_leaves_circuit_unchanged(
        seq in prop::collection::vec(instruction_strategy(2), 1..10),
    ) {
        let mut circuit = Circuit::with_size("prop", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        let before = circuit.clone();

        let mut bad = seq;
        bad.push(Instruction::x(QubitId(2)));
        let err = circuit.extend(bad).unwrap_err();

        prop_assert!(
            matches!(
                err,
                IrError::InvalidGateTarget { .. } | IrError::DuplicateQubit { .. }
            ),
            "unexpected error: {:?}",
            err
        );
        prop_assert_eq!(circuit, before);
    }
}

#[test]
fn depth_counts_parallel_gates_once() {
    let mut circuit = Circuit::with_size("layers", 2, 0);
    circuit
        .h(QubitId(0))
        .unwrap()
        .h(QubitId(1))
        .unwrap()
        .cz(QubitId(0), QubitId(1))
        .unwrap();
    assert_eq!(circuit.depth(), 2);
}
