//! Dicke-state preparation by split-and-cyclic-shift.
//!
//! Given a slice whose `w ≤ 2` set slots are the lowest ones, each step
//! moves amplitude from slot 0 into slot 1 (and slot 2) with controlled
//! rotations bracketed by CX pairs, then recurses on the tail. Every step
//! conserves Hamming weight, so the result is the uniform superposition
//! over all `C(L, w)` weight-`w` patterns.

use dqi_ir::{Circuit, IrError, IrResult, QubitId};
use tracing::debug;

/// Longest slice the angle table covers.
pub const MAX_LEN: usize = 6;

/// `(θ1, θ2)` for slice lengths 2 through 6, with
/// `θl = 2·arccos(√(l / n))`.
const SHIFT_ANGLES: [(f64, Option<f64>); MAX_LEN - 1] = [
    (std::f64::consts::FRAC_PI_2, None),
    (1.910_633_236_249_018_6, Some(1.230_959_417_340_774_7)),
    (2.094_395_102_393_195_7, Some(1.570_796_326_794_896_8)),
    (2.214_297_435_588_181, Some(1.772_154_247_585_227_4)),
    (2.300_523_983_021_863, Some(1.910_633_236_249_018_6)),
];

/// Rotation angles used for a slice of length `n`, if `2 ≤ n ≤ 6`.
pub fn shift_angles(n: usize) -> Option<(f64, Option<f64>)> {
    n.checked_sub(2).and_then(|i| SHIFT_ANGLES.get(i)).copied()
}

/// Prepares weight-preserving symmetric superpositions on up to six slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymmetricStatePreparer;

impl SymmetricStatePreparer {
    /// Emit the preparation over `qubits`.
    pub fn prepare(&self, circuit: &mut Circuit, qubits: &[QubitId]) -> IrResult<()> {
        if qubits.is_empty() || qubits.len() > MAX_LEN {
            return Err(IrError::UnsupportedLength {
                register: "qubits".into(),
                operation: "SymmetricStatePreparer",
                supported: "1..=6",
                got: qubits.len(),
            });
        }
        debug!(len = qubits.len(), "preparing symmetric state");
        self.shift(circuit, qubits)
    }

    fn shift(&self, circuit: &mut Circuit, s: &[QubitId]) -> IrResult<()> {
        let Some((theta1, theta2)) = shift_angles(s.len()) else {
            return Ok(());
        };

        circuit
            .cx(s[1], s[0])?
            .cry(theta1, s[0], s[1])?
            .cx(s[1], s[0])?;

        if let Some(theta2) = theta2 {
            circuit
                .cx(s[2], s[0])?
                .ccry(theta2, s[0], s[1], s[2])?
                .cx(s[2], s[0])?;
        }

        self.shift(circuit, &s[1..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_table_matches_closed_form() {
        for n in 2..=MAX_LEN {
            let (theta1, theta2) = shift_angles(n).unwrap();
            let expected = |l: f64| 2.0 * (l / n as f64).sqrt().acos();
            assert!((theta1 - expected(1.0)).abs() < 1e-12, "theta1 for n={n}");
            match theta2 {
                Some(t) => assert!((t - expected(2.0)).abs() < 1e-12, "theta2 for n={n}"),
                None => assert_eq!(n, 2),
            }
        }
        assert!(shift_angles(1).is_none());
        assert!(shift_angles(0).is_none());
        assert!(shift_angles(7).is_none());
    }

    #[test]
    fn test_gate_counts() {
        let mut circuit = Circuit::new("dicke");
        let q = circuit.add_qreg("vector", 6);
        SymmetricStatePreparer
            .prepare(&mut circuit, q.qubits())
            .unwrap();

        let ops = circuit.count_ops();
        // Lengths 6..=2 each emit one CRy; lengths 6..=3 also one CCRy.
        assert_eq!(ops.get("cry"), Some(&5));
        assert_eq!(ops.get("ccry"), Some(&4));
        assert_eq!(ops.get("cx"), Some(&18));
        assert_eq!(circuit.size(), 27);
    }

    #[test]
    fn test_single_slot_is_identity() {
        let mut circuit = Circuit::new("dicke");
        let q = circuit.add_qreg("q", 1);
        SymmetricStatePreparer
            .prepare(&mut circuit, q.qubits())
            .unwrap();
        assert!(circuit.instructions().is_empty());
    }

    #[test]
    fn test_rejects_unsupported_lengths() {
        let mut circuit = Circuit::new("dicke");
        let q = circuit.add_qreg("q", 7);
        assert!(matches!(
            SymmetricStatePreparer.prepare(&mut circuit, q.qubits()),
            Err(IrError::UnsupportedLength { got: 7, .. })
        ));
        assert!(matches!(
            SymmetricStatePreparer.prepare(&mut circuit, &[]),
            Err(IrError::UnsupportedLength { got: 0, .. })
        ));
    }
}
