//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// One entry of the measurement directive: read `qubit` into `clbit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// The measured qubit.
    pub qubit: QubitId,
    /// The classical bit receiving the result.
    pub clbit: ClbitId,
}

/// A quantum circuit.
///
/// An ordered gate sequence over a fixed-width register followed by a
/// measurement directive. The first instruction is applied first. Every
/// operand is checked against the register width when it is added, so a
/// built circuit never refers to a qubit it does not own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// Gate operations in application order.
    instructions: Vec<Instruction>,
    /// Measurement directive, in insertion order.
    measurements: Vec<Measurement>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_size(name, 0, 0)
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
            measurements: vec![],
        }
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::h(qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::x(qubit))
    }

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::cx(control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::cz(control, target))
    }

    /// Append a single instruction.
    ///
    /// Fails if an operand is out of range or if it touches a qubit that has
    /// already been measured.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append a gate sequence.
    ///
    /// The whole sequence is validated before anything is pushed; on error the
    /// circuit is unchanged.
    pub fn extend(
        &mut self,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<&mut Self> {
        let instructions: Vec<_> = instructions.into_iter().collect();
        for inst in &instructions {
            self.check(inst)?;
        }
        self.instructions.extend(instructions);
        Ok(self)
    }

    fn check(&self, instruction: &Instruction) -> IrResult<()> {
        instruction.validate(self.num_qubits)?;
        if let Some(&qubit) = instruction
            .qubits
            .iter()
            .find(|q| self.measurements.iter().any(|m| m.qubit == **q))
        {
            return Err(IrError::InvalidMeasurement(format!(
                "gate '{}' on {qubit} follows its measurement",
                instruction.name()
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.check_measurement(qubit, clbit)?;
        self.measurements.push(Measurement { qubit, clbit });
        Ok(self)
    }

    /// Measure qubit `i` into classical bit `i` for every qubit.
    ///
    /// Requires at least as many classical bits as qubits. Every pair is
    /// checked first; on error no measurement is added.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        if self.num_clbits < self.num_qubits {
            return Err(IrError::InvalidMeasurement(format!(
                "measure_all: {} qubits but only {} classical bits",
                self.num_qubits, self.num_clbits
            )));
        }
        for i in 0..self.num_qubits {
            self.check_measurement(QubitId(i), ClbitId(i))?;
        }
        let all = (0..self.num_qubits).map(|i| Measurement {
            qubit: QubitId(i),
            clbit: ClbitId(i),
        });
        self.measurements.extend(all);
        Ok(self)
    }

    fn check_measurement(&self, qubit: QubitId, clbit: ClbitId) -> IrResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(IrError::InvalidGateTarget {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        if clbit.0 >= self.num_clbits {
            return Err(IrError::InvalidClbit {
                clbit,
                num_clbits: self.num_clbits,
            });
        }
        if self.measurements.iter().any(|m| m.qubit == qubit) {
            return Err(IrError::InvalidMeasurement(format!(
                "{qubit} is already measured"
            )));
        }
        if self.measurements.iter().any(|m| m.clbit == clbit) {
            return Err(IrError::InvalidMeasurement(format!(
                "{clbit} is already written by another measurement"
            )));
        }
        Ok(())
    }

    /// Measured qubits ordered by classical bit position.
    ///
    /// Element `k` is the qubit read into classical bit `k`. The measured
    /// classical bits must be exactly `0..m`. A circuit without any
    /// measurement reads every qubit into the matching classical position.
    pub fn measurement_order(&self) -> IrResult<Vec<QubitId>> {
        if self.measurements.is_empty() {
            return Ok((0..self.num_qubits).map(QubitId).collect());
        }

        let mut sorted = self.measurements.clone();
        sorted.sort_by_key(|m| m.clbit);
        for (k, m) in sorted.iter().enumerate() {
            if m.clbit.index() != k {
                return Err(IrError::InvalidMeasurement(format!(
                    "classical bits must be contiguous from c0, found gap before {}",
                    m.clbit
                )));
            }
        }
        Ok(sorted.into_iter().map(|m| m.qubit).collect())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Gate operations in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// The measurement directive.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Number of gate operations.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Circuit depth: the longest chain of gates sharing a qubit, plus one
    /// layer when the circuit measures.
    pub fn depth(&self) -> usize {
        let mut layer = vec![0usize; self.num_qubits()];
        for inst in &self.instructions {
            let next = inst
                .qubits
                .iter()
                .map(|q| layer[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                layer[q.index()] = next;
            }
        }
        let gates = layer.into_iter().max().unwrap_or(0);
        gates + usize::from(!self.measurements.is_empty())
    }

    /// Serialize the circuit to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        let q0 = QubitId(0);
        let q1 = QubitId(1);

        circuit
            .h(q0)?
            .cx(q0, q1)?
            .measure(q0, ClbitId(0))?
            .measure(q1, ClbitId(1))?;

        Ok(circuit)
    }
}
