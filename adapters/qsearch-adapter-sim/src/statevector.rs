//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::FRAC_1_SQRT_2;
use tracing::trace;

use qsearch_ir::{Instruction, QubitId, StandardGate};

use crate::error::{SimError, SimResult};
use crate::result::Outcome;

/// Default tolerance on total probability before sampling.
pub const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// A statevector representing a quantum register.
///
/// Lifecycle: created in |0...0⟩, evolved by any number of [`apply`] calls,
/// then [`sample`]d. Once sampled the register is measured and refuses
/// further gates.
///
/// [`apply`]: Statevector::apply
/// [`sample`]: Statevector::sample
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
    /// Allowed deviation of the total probability from 1.
    norm_tolerance: f64,
    /// Set by the first measurement.
    measured: bool,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
            norm_tolerance: DEFAULT_NORM_TOLERANCE,
            measured: false,
        }
    }

    /// Override the normalization tolerance checked before sampling.
    #[must_use]
    pub fn with_norm_tolerance(mut self, tolerance: f64) -> Self {
        self.norm_tolerance = tolerance;
        self
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The raw amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Whether the register has been measured.
    pub fn is_measured(&self) -> bool {
        self.measured
    }

    /// Sum of squared amplitude magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Distribution over the outcomes of measuring `qubits`.
    ///
    /// Entry `v` is the probability that the classical register reads `v`,
    /// where element `k` of `qubits` writes bit `k`.
    pub fn marginal_probabilities(&self, qubits: &[QubitId]) -> SimResult<Vec<f64>> {
        self.check_qubits(qubits)?;
        let mut marginal = vec![0.0; 1 << qubits.len()];
        for (index, amp) in self.amplitudes.iter().enumerate() {
            marginal[project(index, qubits)] += amp.norm_sqr();
        }
        Ok(marginal)
    }

    /// Apply an instruction to the statevector.
    ///
    /// Operands are validated before any amplitude is touched, so a failed
    /// call leaves the register as it was.
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        if self.measured {
            return Err(SimError::RegisterAlreadyMeasured);
        }
        self.check_instruction(instruction)?;
        self.apply_unchecked(instruction);
        Ok(())
    }

    /// Apply a gate sequence in order.
    ///
    /// Every instruction is validated first; on error nothing is applied.
    pub fn apply_all(&mut self, instructions: &[Instruction]) -> SimResult<()> {
        if self.measured {
            return Err(SimError::RegisterAlreadyMeasured);
        }
        for inst in instructions {
            self.check_instruction(inst)?;
        }
        for inst in instructions {
            self.apply_unchecked(inst);
        }
        Ok(())
    }

    fn apply_unchecked(&mut self, instruction: &Instruction) {
        trace!(%instruction, "applying gate");
        let q = &instruction.qubits;
        match instruction.gate {
            StandardGate::H => self.apply_h(q[0].index()),
            StandardGate::X => self.apply_x(q[0].index()),
            StandardGate::CX => self.apply_cx(q[0].index(), q[1].index()),
            StandardGate::CZ => self.apply_cz(q[0].index(), q[1].index()),
        }
    }

    fn check_instruction(&self, instruction: &Instruction) -> SimResult<()> {
        let expected = instruction.gate.num_qubits() as usize;
        if instruction.qubits.len() != expected {
            return Err(SimError::QubitCountMismatch {
                gate_name: instruction.name().to_string(),
                expected,
                got: instruction.qubits.len(),
            });
        }
        self.check_qubits(&instruction.qubits)
    }

    fn check_qubits(&self, qubits: &[QubitId]) -> SimResult<()> {
        for (i, &qubit) in qubits.iter().enumerate() {
            if qubit.index() >= self.num_qubits {
                return Err(SimError::InvalidGateTarget {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
            if qubits[..i].contains(&qubit) {
                return Err(SimError::DuplicateQubit(qubit));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = FRAC_1_SQRT_2 * (a + b);
                self.amplitudes[j] = FRAC_1_SQRT_2 * (a - b);
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let mask = (1 << control) | (1 << target);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *amp = -*amp;
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Sample one measurement outcome of `qubits` using `rng`.
    ///
    /// Basis state `i` is drawn with probability `|a_i|²`, then projected onto
    /// the measured qubits (element `k` of `qubits` becomes classical bit `k`).
    /// Amplitudes are not modified; the register is marked as measured.
    pub fn sample<R: Rng + ?Sized>(
        &mut self,
        qubits: &[QubitId],
        rng: &mut R,
    ) -> SimResult<Outcome> {
        self.check_qubits(qubits)?;

        let norm = self.norm_sqr();
        let drift = (norm - 1.0).abs();
        if drift.is_nan() || self.norm_tolerance.is_nan() || drift > self.norm_tolerance {
            return Err(SimError::UnnormalizedState { norm });
        }

        let r: f64 = rng.r#gen::<f64>() * norm;
        let mut cumulative = 0.0;
        let mut chosen = None;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p == 0.0 {
                continue;
            }
            cumulative += p;
            chosen = Some(i);
            if r < cumulative {
                break;
            }
        }

        // Rounding can leave r just above the final cumulative sum; the last
        // state with non-zero probability absorbs it.
        let index = chosen.unwrap_or(0);
        self.measured = true;

        Ok(Outcome::new(project(index, qubits) as u64, qubits.len()))
    }
}

/// Gather the bits of `index` selected by `qubits` into a classical value.
fn project(index: usize, qubits: &[QubitId]) -> usize {
    qubits
        .iter()
        .enumerate()
        .fold(0, |acc, (k, q)| acc | (((index >> q.index()) & 1) << k))
}
