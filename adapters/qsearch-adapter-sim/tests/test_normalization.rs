//! Property tests: every gate keeps the register normalized.

use proptest::prelude::*;
use qsearch_adapter_sim::{SimError, Statevector};
use qsearch_ir::{Instruction, QubitId, StandardGate};
use rand::SeedableRng;
use rand::rngs::StdRng;

const NUM_QUBITS: u32 = 3;

fn instruction_strategy() -> impl Strategy<Value = Instruction> {
    let gate = prop_oneof![
        Just(StandardGate::H),
        Just(StandardGate::X),
        Just(StandardGate::CX),
        Just(StandardGate::CZ),
    ];
    (gate, 0..NUM_QUBITS, 1..NUM_QUBITS).prop_map(|(gate, a, offset)| {
        if gate.is_controlled() {
            let b = (a + offset) % NUM_QUBITS;
            Instruction::gate(gate, [QubitId(a), QubitId(b)])
        } else {
            Instruction::gate(gate, [QubitId(a)])
        }
    })
}

/// Prepare basis state `index` using X gates only.
fn basis_state(index: usize) -> Statevector {
    let mut sv = Statevector::new(NUM_QUBITS as usize);
    for q in 0..NUM_QUBITS {
        if (index >> q) & 1 == 1 {
            sv.apply(&Instruction::x(QubitId(q))).unwrap();
        }
    }
    sv
}

proptest! {
    #[test]
    fn norm_is_preserved_after_every_gate(
        start in 0usize..(1 << NUM_QUBITS),
        seq in prop::collection::vec(instruction_strategy(), 0..40),
    ) {
        let mut sv = basis_state(start);
        for inst in &seq {
            sv.apply(inst).unwrap();
            prop_assert!((sv.norm_sqr() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn sampling_any_evolved_state_succeeds(
        seq in prop::collection::vec(instruction_strategy(), 0..40),
        seed in any::<u64>(),
    ) {
        let mut sv = Statevector::new(NUM_QUBITS as usize);
        sv.apply_all(&seq).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = sv
            .sample(&[QubitId(0), QubitId(1), QubitId(2)], &mut rng)
            .unwrap();
        // A state with zero probability is never drawn.
        prop_assert!(sv.probabilities()[outcome.value() as usize] > 0.0);
    }

    #[test]
    fn out_of_range_operand_never_mutates(
        seq in prop::collection::vec(instruction_strategy(), 0..10),
        bad in NUM_QUBITS..8,
    ) {
        let mut sv = Statevector::new(NUM_QUBITS as usize);
        sv.apply_all(&seq).unwrap();
        let before = sv.amplitudes().to_vec();

        let err = sv.apply(&Instruction::h(QubitId(bad))).unwrap_err();
        let is_invalid_target = matches!(err, SimError::InvalidGateTarget { .. });
        prop_assert!(is_invalid_target);
        prop_assert_eq!(sv.amplitudes(), before.as_slice());
    }
}

#[test]
fn sampling_frequencies_follow_born_rule() {
    // H on qubit 0 of |0⟩: 50/50 between "0" and "1".
    let mut rng = StdRng::seed_from_u64(2024);
    let mut ones = 0;
    for _ in 0..10_000 {
        let mut sv = Statevector::new(1);
        sv.apply(&Instruction::h(QubitId(0))).unwrap();
        ones += sv.sample(&[QubitId(0)], &mut rng).unwrap().value();
    }
    assert!((4_700..=5_300).contains(&ones), "ones = {ones}");
}
