//! CX network computing `out = H · in (mod 2)`.

use dqi_ir::{Circuit, IrResult, QuantumRegister};

use crate::check_len;
use crate::matrix::{ParityCheckMatrix, WIDTH};

/// Fixed parity wiring derived from a matrix.
///
/// Output slot `r` receives one CX from every input slot `c` with
/// `H[r][c] = 1`. No measurement, no branching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearTransformNetwork {
    wiring: Vec<(usize, Vec<usize>)>,
}

impl LinearTransformNetwork {
    /// Derive the wiring from `matrix`.
    pub fn from_matrix(matrix: &ParityCheckMatrix) -> Self {
        let wiring = (0..matrix.rows())
            .map(|r| (r, matrix.row_support(r)))
            .collect();
        Self { wiring }
    }

    /// `(output, inputs)` incidence, one entry per output slot.
    pub fn wiring(&self) -> &[(usize, Vec<usize>)] {
        &self.wiring
    }

    /// Number of CX gates [`apply`](Self::apply) emits.
    pub fn num_gates(&self) -> usize {
        self.wiring.iter().map(|(_, inputs)| inputs.len()).sum()
    }

    /// Emit the wiring from `input` into `output`.
    pub fn apply(
        &self,
        circuit: &mut Circuit,
        input: &QuantumRegister,
        output: &QuantumRegister,
    ) -> IrResult<()> {
        check_len(input, WIDTH, "LinearTransformNetwork", "6")?;
        check_len(output, WIDTH, "LinearTransformNetwork", "6")?;

        for (r, inputs) in &self.wiring {
            for &c in inputs {
                circuit.cx(input[c], output[*r])?;
            }
        }
        Ok(())
    }

    /// Classical mirror of the wiring on an MSB-first input.
    pub fn evaluate(&self, input: u32) -> u32 {
        self.wiring.iter().fold(0, |acc, (r, inputs)| {
            let parity = inputs
                .iter()
                .fold(0, |p, &c| p ^ ((input >> (WIDTH - 1 - c)) & 1));
            acc | (parity << (WIDTH - 1 - r))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wiring() {
        let net = LinearTransformNetwork::from_matrix(&ParityCheckMatrix::default());
        let expected: Vec<(usize, Vec<usize>)> = vec![
            (0, vec![0, 1]),
            (1, vec![0, 2]),
            (2, vec![2, 3]),
            (3, vec![3, 4]),
            (4, vec![1, 5]),
            (5, vec![4, 5]),
        ];
        assert_eq!(net.wiring(), expected.as_slice());
        assert_eq!(net.num_gates(), 12);
    }

    #[test]
    fn test_evaluate_agrees_with_syndrome() {
        let matrix = ParityCheckMatrix::default();
        let net = LinearTransformNetwork::from_matrix(&matrix);
        for input in 0..64 {
            assert_eq!(net.evaluate(input), matrix.syndrome(input));
        }
    }

    #[test]
    fn test_apply_emits_only_cx() {
        let net = LinearTransformNetwork::from_matrix(&ParityCheckMatrix::default());
        let mut circuit = Circuit::new("net");
        let input = circuit.add_qreg("vector", 6);
        let output = circuit.add_qreg("transform", 6);
        net.apply(&mut circuit, &input, &output).unwrap();

        assert_eq!(circuit.count_ops().get("cx"), Some(&12));
        assert_eq!(circuit.size(), 12);
        assert!(circuit.instructions().iter().all(|i| i.clbits.is_empty()));
    }
}
