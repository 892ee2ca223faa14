//! Qubit and classical bit identifiers.
//!
//! Every slot in a DQI circuit lives in exactly one named register, so the
//! slot descriptors carry their register membership unconditionally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Position of this qubit in a basis-state index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Unique identifier for a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl ClbitId {
    /// Position of this bit in the classical memory.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// A declared qubit and the register slot it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    /// The unique identifier.
    pub id: QubitId,
    /// Owning register.
    pub register: String,
    /// Index within the register.
    pub index: u32,
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register, self.index)
    }
}

/// A declared classical bit and the register slot it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clbit {
    /// The unique identifier.
    pub id: ClbitId,
    /// Owning register.
    pub register: String,
    /// Index within the register.
    pub index: u32,
}

impl fmt::Display for Clbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(QubitId(3).to_string(), "q3");
        assert_eq!(ClbitId(7).to_string(), "c7");
    }

    #[test]
    fn test_slot_display() {
        let q = Qubit {
            id: QubitId(4),
            register: "vector".into(),
            index: 2,
        };
        assert_eq!(q.to_string(), "vector[2]");

        let c = Clbit {
            id: ClbitId(0),
            register: "syndrome_meas".into(),
            index: 0,
        };
        assert_eq!(c.to_string(), "syndrome_meas[0]");
    }
}
