//! Error types for the DQI subsystem.

use dqi_hal::HalError;
use dqi_ir::IrError;
use thiserror::Error;

/// Errors raised while building or loading a solver configuration.
///
/// All of these surface before any circuit is assembled.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// Parity-check matrix does not match the fixed register widths.
    #[error("Parity-check matrix must be {expected}x{expected}, got {rows}x{cols}")]
    InvalidDimensions {
        /// Required number of rows and columns.
        expected: usize,
        /// Number of rows supplied.
        rows: usize,
        /// Number of columns in the first offending row.
        cols: usize,
    },

    /// Matrix entry other than 0 or 1.
    #[error("Matrix entry ({row}, {col}) is {value}; entries must be 0 or 1")]
    NonBinaryEntry {
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        col: usize,
        /// Offending value.
        value: u8,
    },

    /// Phase vector of the wrong length.
    #[error("Phase vector must have {expected} entries, got {got}")]
    PhaseLength {
        /// Required length.
        expected: usize,
        /// Supplied length.
        got: usize,
    },

    /// Shot count outside the accepted range.
    #[error("Shot count must be at least 1, got {0}")]
    InvalidShots(u32),

    /// Configuration file could not be read.
    #[error("IO error: {0}")]
    IoError(String),

    /// Configuration file could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Any other rejected value.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Errors raised while decoding backend bitstrings into solutions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolutionError {
    /// Bitstring has fewer characters than the solution register.
    #[error("Bitstring '{key}' has {len} characters; need at least {need}")]
    TooShort {
        /// The offending key.
        key: String,
        /// Its length.
        len: usize,
        /// Minimum length.
        need: usize,
    },

    /// Bitstring contains something other than '0' or '1'.
    #[error("Bitstring '{0}' is not binary")]
    NonBinary(String),
}

/// Top-level error for the solver facade.
#[derive(Debug, Error)]
pub enum DqiError {
    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),

    /// Configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The backend failed.
    #[error("Backend error: {0}")]
    Hal(#[from] HalError),

    /// Backend output could not be aggregated.
    #[error("Solution error: {0}")]
    Solution(#[from] SolutionError),
}

/// Result type for solver operations.
pub type DqiResult<T> = Result<T, DqiError>;
