//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::qubit::{ClbitId, QubitId};

/// A conjunction of classical bit tests, resolved at execution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalCondition {
    tests: Vec<(ClbitId, bool)>,
}

impl ClassicalCondition {
    /// Condition on a single bit.
    pub fn bit(clbit: ClbitId, value: bool) -> Self {
        Self {
            tests: vec![(clbit, value)],
        }
    }

    /// Condition on several bits at once.
    ///
    /// Returns [`IrError::EmptyCondition`] if `tests` is empty.
    pub fn all(tests: impl IntoIterator<Item = (ClbitId, bool)>) -> IrResult<Self> {
        let tests: Vec<_> = tests.into_iter().collect();
        if tests.is_empty() {
            return Err(IrError::EmptyCondition);
        }
        Ok(Self { tests })
    }

    /// Add another test to the conjunction.
    #[must_use]
    pub fn and(mut self, clbit: ClbitId, value: bool) -> Self {
        self.tests.push((clbit, value));
        self
    }

    /// The `(clbit, expected)` pairs.
    pub fn tests(&self) -> &[(ClbitId, bool)] {
        &self.tests
    }

    /// Classical bits the condition reads.
    pub fn clbits(&self) -> impl Iterator<Item = ClbitId> + '_ {
        self.tests.iter().map(|(c, _)| *c)
    }

    /// Evaluate against a classical memory indexed by [`ClbitId::index`].
    ///
    /// Bits beyond the end of `memory` read as `false`.
    pub fn evaluate(&self, memory: &[bool]) -> bool {
        self.tests
            .iter()
            .all(|(c, want)| memory.get(c.index()).copied().unwrap_or(false) == *want)
    }
}

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(Gate),
    /// Measurement operation.
    Measure,
    /// Reset qubit to |0⟩.
    Reset,
    /// A block that runs only when its condition holds.
    Conditional {
        /// Condition on previously measured bits.
        on: ClassicalCondition,
        /// Body, executed in order.
        then: Vec<Instruction>,
    },
}

/// A complete instruction with operands.
///
/// For a conditional block, `qubits` is the set of qubits the body touches
/// and `clbits` is the set of bits the condition reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction operates on.
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a multi-qubit measurement instruction.
    ///
    /// Returns an error if the number of qubits and classical bits do not match.
    pub fn measure_all(
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        let clbits: Vec<_> = clbits.into_iter().collect();
        if qubits.len() != clbits.len() {
            return Err(IrError::MeasureArity {
                qubits: qubits.len(),
                clbits: clbits.len(),
            });
        }
        Ok(Self {
            kind: InstructionKind::Measure,
            qubits,
            clbits,
        })
    }

    /// Create a reset instruction.
    pub fn reset(qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Reset,
            qubits: vec![qubit],
            clbits: vec![],
        }
    }

    /// Create a conditional block around `then`.
    pub fn conditional(on: ClassicalCondition, then: Vec<Instruction>) -> Self {
        let mut qubits: Vec<QubitId> = Vec::new();
        for inst in &then {
            for q in &inst.qubits {
                if !qubits.contains(q) {
                    qubits.push(*q);
                }
            }
        }
        let mut clbits: Vec<ClbitId> = Vec::new();
        for c in on.clbits() {
            if !clbits.contains(&c) {
                clbits.push(c);
            }
        }
        Self {
            kind: InstructionKind::Conditional { on, then },
            qubits,
            clbits,
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a reset.
    pub fn is_reset(&self) -> bool {
        matches!(self.kind, InstructionKind::Reset)
    }

    /// Check if this is a conditional block.
    pub fn is_conditional(&self) -> bool {
        matches!(self.kind, InstructionKind::Conditional { .. })
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the condition and body if this is a conditional block.
    pub fn as_conditional(&self) -> Option<(&ClassicalCondition, &[Instruction])> {
        match &self.kind {
            InstructionKind::Conditional { on, then } => Some((on, then.as_slice())),
            _ => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Conditional { .. } => "if",
        }
    }
}
