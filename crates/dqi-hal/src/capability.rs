//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

/// What a backend can execute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set.
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags, e.g. `"mid_circuit_measurement"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Capabilities of a local simulator that runs dynamic circuits.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::dqi(),
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec![
                "statevector".into(),
                "mid_circuit_measurement".into(),
                "reset".into(),
                "classical_control".into(),
            ],
        }
    }

    /// Whether a named feature flag is present.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Gate names a backend accepts, grouped by arity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
    /// Three-qubit gates supported.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub three_qubit: Vec<String>,
}

impl GateSet {
    /// Every gate the DQI IR can express.
    pub fn dqi() -> Self {
        let names = |v: &[&str]| v.iter().map(|s| (*s).to_string()).collect();
        Self {
            single_qubit: names(&["x", "z", "h", "ry"]),
            two_qubit: names(&["cx", "swap", "cry"]),
            three_qubit: names(&["ccry"]),
        }
    }

    /// Check if a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit.iter().any(|g| g == gate)
            || self.two_qubit.iter().any(|g| g == gate)
            || self.three_qubit.iter().any(|g| g == gate)
    }
}
