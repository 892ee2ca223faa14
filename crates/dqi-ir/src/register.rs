//! Named, fixed-length registers.
//!
//! Registers are handed out by [`Circuit::add_qreg`](crate::Circuit::add_qreg)
//! and [`Circuit::add_creg`](crate::Circuit::add_creg) and never change size
//! afterwards. Slot 0 is the least significant position.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::qubit::{ClbitId, QubitId};

/// A named run of qubits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumRegister {
    name: String,
    qubits: Vec<QubitId>,
}

impl QuantumRegister {
    pub(crate) fn new(name: String, qubits: Vec<QubitId>) -> Self {
        Self { name, qubits }
    }

    /// Register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Whether the register has no slots.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// The qubits, slot 0 first.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Qubit at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<QubitId> {
        self.qubits.get(index).copied()
    }

    /// Iterate over the qubits.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.qubits.iter().copied()
    }
}

impl Index<usize> for QuantumRegister {
    type Output = QubitId;

    fn index(&self, index: usize) -> &QubitId {
        &self.qubits[index]
    }
}

impl<'a> IntoIterator for &'a QuantumRegister {
    type Item = &'a QubitId;
    type IntoIter = std::slice::Iter<'a, QubitId>;

    fn into_iter(self) -> Self::IntoIter {
        self.qubits.iter()
    }
}

/// A named run of classical bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    name: String,
    clbits: Vec<ClbitId>,
}

impl ClassicalRegister {
    pub(crate) fn new(name: String, clbits: Vec<ClbitId>) -> Self {
        Self { name, clbits }
    }

    /// Register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.clbits.len()
    }

    /// Whether the register has no slots.
    pub fn is_empty(&self) -> bool {
        self.clbits.is_empty()
    }

    /// The classical bits, slot 0 first.
    pub fn clbits(&self) -> &[ClbitId] {
        &self.clbits
    }

    /// Iterate over the classical bits.
    pub fn iter(&self) -> impl Iterator<Item = ClbitId> + '_ {
        self.clbits.iter().copied()
    }
}

impl Index<usize> for ClassicalRegister {
    type Output = ClbitId;

    fn index(&self, index: usize) -> &ClbitId {
        &self.clbits[index]
    }
}
