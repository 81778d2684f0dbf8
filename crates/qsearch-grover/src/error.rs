//! Error types for the grover crate.

use thiserror::Error;

/// Errors produced while building or running a Grover search.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GroverError {
    /// Target is empty or contains characters other than `0` and `1`.
    #[error("Invalid target '{0}': expected a non-empty string of 0s and 1s")]
    InvalidTarget(String),

    /// The register width needs a multi-controlled phase outside the gate set.
    #[error("Grover search on {0} qubits is not supported (widths 1 and 2 only)")]
    UnsupportedWidth(usize),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qsearch_ir::IrError),

    /// Simulation failed.
    #[error("Simulation error: {0}")]
    Sim(#[from] qsearch_adapter_sim::SimError),
}

/// Result type for Grover operations.
pub type GroverResult<T> = Result<T, GroverError>;
