//! DQI circuit assembly for Max-XORSAT.
//!
//! The solver builds one fixed-shape dynamic circuit per parity-check
//! matrix:
//!
//! ```text
//!  count ─ ry/x/cx ─┐
//!                   UnaryEncoder ─ copy ─→ vector ─ SymmetricStatePreparer ─ Z phase
//!                                                 │
//!                   LinearTransformNetwork ←──────┘
//!                                │
//!                            transform ─ measure ─ SyndromeCorrector ─→ vector
//!                                │
//!                                H ─ measure        vector ─ measure
//! ```
//!
//! | Component | Module |
//! |-----------|--------|
//! | [`ParityCheckMatrix`] | [`matrix`] |
//! | [`SyndromeTable`] | [`decoder`] |
//! | [`UnaryEncoder`] | [`unary`] |
//! | [`SymmetricStatePreparer`] | [`dicke`] |
//! | [`LinearTransformNetwork`] | [`network`] |
//! | [`SyndromeCorrector`] | [`corrector`] |
//! | [`CircuitAssembler`] | [`assembler`] |
//!
//! # Example
//!
//! ```
//! use dqi_xorsat::{CorrectionMode, DqiConfig, DqiMaxXorsat};
//!
//! let config = DqiConfig {
//!     correction: CorrectionMode::FullMatch,
//!     ..DqiConfig::default()
//! };
//! let solver = DqiMaxXorsat::new(config).unwrap();
//! assert_eq!(solver.table().len(), 22);
//!
//! let circuit = solver.assemble().unwrap();
//! assert_eq!(circuit.num_qubits(), 21);
//! ```

pub mod assembler;
pub mod config;
pub mod corrector;
pub mod decoder;
pub mod dicke;
pub mod error;
pub mod matrix;
pub mod network;
pub mod solution;
pub mod unary;

pub use assembler::CircuitAssembler;
pub use config::DqiConfig;
pub use corrector::{CorrectionMode, SyndromeCorrector};
pub use decoder::SyndromeTable;
pub use dicke::SymmetricStatePreparer;
pub use error::{ConfigError, DqiError, DqiResult, SolutionError};
pub use matrix::ParityCheckMatrix;
pub use network::LinearTransformNetwork;
pub use solution::SolutionCounts;
pub use unary::{OneHotAncilla, UnaryEncoder};

use dqi_hal::Backend;
use dqi_ir::{Circuit, IrError, IrResult, QuantumRegister};
use tracing::{info, instrument};

use crate::matrix::WIDTH;

/// Reject a register whose length an operation does not support.
pub(crate) fn check_len(
    reg: &QuantumRegister,
    want: usize,
    operation: &'static str,
    supported: &'static str,
) -> IrResult<()> {
    if reg.len() == want {
        Ok(())
    } else {
        Err(IrError::UnsupportedLength {
            register: reg.name().to_string(),
            operation,
            supported,
            got: reg.len(),
        })
    }
}

/// Solver facade: owns the configuration and the syndrome table.
#[derive(Debug, Clone)]
pub struct DqiMaxXorsat {
    config: DqiConfig,
    table: SyndromeTable,
    phase: [f64; WIDTH],
}

impl DqiMaxXorsat {
    /// Validate `config` and build the syndrome table.
    pub fn new(config: DqiConfig) -> DqiResult<Self> {
        config.validate()?;
        let phase = config.phase_array()?;
        let table = SyndromeTable::build(&config.matrix);
        Ok(Self {
            config,
            table,
            phase,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &DqiConfig {
        &self.config
    }

    /// The parity-check matrix.
    pub fn matrix(&self) -> &ParityCheckMatrix {
        &self.config.matrix
    }

    /// The syndrome table built from the matrix.
    pub fn table(&self) -> &SyndromeTable {
        &self.table
    }

    /// An assembler configured like this solver.
    pub fn assembler(&self) -> CircuitAssembler<'_> {
        CircuitAssembler::new(&self.config.matrix, &self.table)
            .with_phase(self.phase)
            .with_correction(self.config.correction)
    }

    /// Assemble a fresh circuit.
    pub fn assemble(&self) -> DqiResult<Circuit> {
        Ok(self.assembler().assemble()?)
    }

    /// Assemble, execute [`DqiConfig::shots`] times on `backend`, and
    /// aggregate.
    ///
    /// Sampling belongs to the backend, so [`DqiConfig::seed`] only takes
    /// effect if the caller builds `backend` from it.
    pub async fn run(&self, backend: &dyn Backend) -> DqiResult<SolutionCounts> {
        self.run_with_shots(backend, self.config.shots).await
    }

    /// Like [`run`](Self::run), overriding the configured shot count.
    #[instrument(skip(self, backend), fields(backend_name = backend.name()))]
    pub async fn run_with_shots(
        &self,
        backend: &dyn Backend,
        shots: u32,
    ) -> DqiResult<SolutionCounts> {
        let circuit = self.assemble()?;
        let job = backend.submit(&circuit, shots).await?;
        let result = backend.wait(&job).await?;

        let solutions = SolutionCounts::from_counts(&result.counts)?;
        if let Some((best, count)) = solutions.best() {
            info!(best, count, distinct = solutions.len(), "run finished");
        }
        Ok(solutions)
    }
}
