//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit:?} not found in circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit not found in circuit.
    #[error("Classical bit {clbit:?} not found in circuit{}", format_gate_context(.gate_name))]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit:?} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Operation on a qubit whose register has been retired.
    #[error("Qubit {qubit:?} has been retired{}", format_gate_context(.gate_name))]
    RetiredQubit {
        /// The retired qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Measurement with mismatched qubit and classical bit counts.
    #[error("Measurement maps {qubits} qubits onto {clbits} classical bits")]
    MeasureArity {
        /// Number of measured qubits.
        qubits: usize,
        /// Number of target classical bits.
        clbits: usize,
    },

    /// A conditional block with nothing to test.
    #[error("Classical condition must test at least one bit")]
    EmptyCondition,

    /// Register length outside what an operation supports.
    #[error("Register '{register}' has {got} slots; {operation} supports {supported}")]
    UnsupportedLength {
        /// Register (or slice) name.
        register: String,
        /// Operation that rejected it.
        operation: &'static str,
        /// Human-readable supported range.
        supported: &'static str,
        /// Actual length.
        got: usize,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
