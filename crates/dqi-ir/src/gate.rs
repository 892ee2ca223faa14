//! Quantum gate types.
//!
//! Only the gate set the DQI assembly emits is modelled. Rotation angles are
//! concrete `f64` values; nothing in the pipeline is symbolic.

use serde::{Deserialize, Serialize};

/// Gates with known semantics.
///
/// Operand order for controlled gates is controls first, target last.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit gates
    /// Pauli-X gate.
    X,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// Rotation around Y axis.
    Ry(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// SWAP gate.
    Swap,
    /// Controlled rotation around Y.
    CRy(f64),

    // Three-qubit gates
    /// Doubly-controlled rotation around Y.
    CCRy(f64),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::Ry(_) => "ry",
            StandardGate::CX => "cx",
            StandardGate::Swap => "swap",
            StandardGate::CRy(_) => "cry",
            StandardGate::CCRy(_) => "ccry",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X | StandardGate::Z | StandardGate::H | StandardGate::Ry(_) => 1,
            StandardGate::CX | StandardGate::Swap | StandardGate::CRy(_) => 2,
            StandardGate::CCRy(_) => 3,
        }
    }

    /// Rotation angle, for the parameterized gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Ry(t) | StandardGate::CRy(t) | StandardGate::CCRy(t) => Some(*t),
            _ => None,
        }
    }

    /// Number of leading control operands.
    pub fn num_controls(&self) -> u32 {
        match self {
            StandardGate::CX | StandardGate::CRy(_) => 1,
            StandardGate::CCRy(_) => 2,
            _ => 0,
        }
    }
}

/// A gate with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The gate itself.
    pub kind: StandardGate,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: gate,
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CRy(FRAC_PI_2).num_qubits(), 2);
        assert_eq!(StandardGate::CCRy(FRAC_PI_2).num_qubits(), 3);
        assert_eq!(StandardGate::CCRy(FRAC_PI_2).num_controls(), 2);
        assert_eq!(StandardGate::Swap.num_controls(), 0);
    }

    #[test]
    fn test_angle() {
        assert_eq!(StandardGate::Ry(0.5).angle(), Some(0.5));
        assert_eq!(StandardGate::CX.angle(), None);
    }

    #[test]
    fn test_names_cover_assembled_gate_set() {
        let names: Vec<_> = [
            StandardGate::X,
            StandardGate::Z,
            StandardGate::H,
            StandardGate::Ry(0.1),
            StandardGate::CX,
            StandardGate::Swap,
            StandardGate::CRy(0.1),
            StandardGate::CCRy(0.1),
        ]
        .iter()
        .map(StandardGate::name)
        .collect();
        assert_eq!(names, ["x", "z", "h", "ry", "cx", "swap", "cry", "ccry"]);
    }

    #[test]
    fn test_gate_creation() {
        let h = Gate::standard(StandardGate::H);
        assert_eq!(h.name(), "h");
        assert_eq!(h.num_qubits(), 1);
        assert!(h.label.is_none());

        let labeled = Gate::from(StandardGate::CCRy(1.0)).with_label("dicke_pair");
        assert_eq!(labeled.name(), "ccry");
        assert_eq!(labeled.label.as_deref(), Some("dicke_pair"));
    }
}
