//! Full DQI circuit assembly.

use dqi_ir::{Circuit, IrResult};
use tracing::{info, instrument};

use crate::corrector::{CorrectionMode, SyndromeCorrector};
use crate::decoder::SyndromeTable;
use crate::dicke::SymmetricStatePreparer;
use crate::matrix::{ParityCheckMatrix, WIDTH};
use crate::network::LinearTransformNetwork;
use crate::unary::UnaryEncoder;

/// Quantum register holding the 2-bit count.
pub const COUNT_REG: &str = "count";
/// Quantum register holding the unary code.
pub const UNARY_REG: &str = "unary";
/// Quantum register holding the candidate error pattern.
pub const VECTOR_REG: &str = "vector";
/// Quantum register receiving the parity transform.
pub const TRANSFORM_REG: &str = "transform";
/// Classical capture of the vector register.
pub const VECTOR_MEAS_REG: &str = "vector_meas";
/// Classical capture of the transform register.
pub const TRANSFORM_MEAS_REG: &str = "transform_meas";

/// Phase weights used when none are configured.
pub const DEFAULT_PHASE: [f64; WIDTH] = [1.0; WIDTH];

/// Builds the fixed DQI circuit for one matrix.
///
/// Assembly is deterministic: the same inputs always produce the same
/// instruction list.
#[derive(Debug, Clone)]
pub struct CircuitAssembler<'a> {
    table: &'a SyndromeTable,
    network: LinearTransformNetwork,
    phase: [f64; WIDTH],
    correction: CorrectionMode,
}

impl<'a> CircuitAssembler<'a> {
    /// Assembler for `matrix` and its precomputed `table`.
    pub fn new(matrix: &ParityCheckMatrix, table: &'a SyndromeTable) -> Self {
        Self {
            table,
            network: LinearTransformNetwork::from_matrix(matrix),
            phase: DEFAULT_PHASE,
            correction: CorrectionMode::default(),
        }
    }

    /// Set the phase weights. Only their sign is used.
    #[must_use]
    pub fn with_phase(mut self, phase: [f64; WIDTH]) -> Self {
        self.phase = phase;
        self
    }

    /// Set the correction mode.
    #[must_use]
    pub fn with_correction(mut self, correction: CorrectionMode) -> Self {
        self.correction = correction;
        self
    }

    /// Emit the whole program.
    #[instrument(skip(self), fields(correction = %self.correction))]
    pub fn assemble(&self) -> IrResult<Circuit> {
        let mut circuit = Circuit::new("dqi_max_xorsat");

        let count = circuit.add_qreg(COUNT_REG, 2);
        let unary = circuit.add_qreg(UNARY_REG, 3);
        let vector = circuit.add_qreg(VECTOR_REG, WIDTH as u32);
        let transform = circuit.add_qreg(TRANSFORM_REG, WIDTH as u32);
        let vector_meas = circuit.add_creg(VECTOR_MEAS_REG, WIDTH as u32);
        let transform_meas = circuit.add_creg(TRANSFORM_MEAS_REG, WIDTH as u32);

        // count = 2 with amplitude cos(π/6), count = 1 with sin(π/6)
        circuit
            .ry(0.5f64.acos(), count[0])?
            .x(count[1])?
            .cx(count[0], count[1])?;

        UnaryEncoder.encode(&mut circuit, &count, &unary)?;

        for i in 0..unary.len() {
            circuit.cx(unary[i], vector[i])?;
        }

        SymmetricStatePreparer.prepare(&mut circuit, vector.qubits())?;

        for (i, &weight) in self.phase.iter().enumerate() {
            if weight > 0.0 {
                circuit.z(vector[i])?;
            }
        }

        self.network.apply(&mut circuit, &vector, &transform)?;

        SyndromeCorrector::new(self.correction).correct(
            &mut circuit,
            &transform,
            &vector,
            self.table,
        )?;

        for q in transform.iter() {
            circuit.h(q)?;
        }

        circuit.measure_register(&vector, &vector_meas)?;
        circuit.measure_register(&transform, &transform_meas)?;

        info!(
            qubits = circuit.num_qubits(),
            clbits = circuit.num_clbits(),
            size = circuit.size(),
            depth = circuit.depth(),
            "assembled DQI circuit"
        );
        Ok(circuit)
    }
}
