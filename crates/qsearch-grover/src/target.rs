//! The marked basis state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GroverError, GroverResult};

/// A marked basis state, written the same way outcomes are printed: the
/// left-most character is the highest qubit.
///
/// `"01"` therefore marks basis index 1 (qubit 0 set, qubit 1 clear).
/// Serialized as that bit string, and deserialization goes through
/// [`Target::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Target {
    index: u64,
    num_qubits: usize,
}

impl Target {
    /// Parse a bit string such as `"11"`.
    pub fn parse(bits: &str) -> GroverResult<Self> {
        if bits.is_empty() || bits.len() > 63 || !bits.chars().all(|c| c == '0' || c == '1') {
            return Err(GroverError::InvalidTarget(bits.to_string()));
        }
        let index = u64::from_str_radix(bits, 2)
            .map_err(|_| GroverError::InvalidTarget(bits.to_string()))?;
        Ok(Self {
            index,
            num_qubits: bits.len(),
        })
    }

    /// Build a target from a basis index and register width.
    pub fn from_index(index: u64, num_qubits: usize) -> GroverResult<Self> {
        if num_qubits == 0 || num_qubits > 63 || index >> num_qubits != 0 {
            return Err(GroverError::InvalidTarget(format!(
                "index {index} on {num_qubits} qubits"
            )));
        }
        Ok(Self { index, num_qubits })
    }

    /// Basis index of the marked state.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Register width.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Value of the target on `qubit`.
    pub fn bit(&self, qubit: usize) -> bool {
        qubit < self.num_qubits && (self.index >> qubit) & 1 == 1
    }
}

impl TryFrom<String> for Target {
    type Error = GroverError;

    fn try_from(bits: String) -> GroverResult<Self> {
        Self::parse(&bits)
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        target.to_string()
    }
}

impl FromStr for Target {
    type Err = GroverError;

    fn from_str(s: &str) -> GroverResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.index, width = self.num_qubits)
    }
}
