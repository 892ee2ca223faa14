//! Binary count to unary (thermometer) encoding.
//!
//! The 2-bit count is first spread into a 4-slot one-hot ancilla, folded
//! back down into thermometer form, and copied out. The ancilla lives only
//! for the duration of one [`UnaryEncoder::encode`] call; afterwards its
//! qubits are retired on the circuit and reject any further instruction.

use dqi_ir::{
    Circuit, ClassicalCondition, ClassicalRegister, ClbitId, IrResult, QuantumRegister, QubitId,
};
use tracing::debug;

use crate::check_len;

/// Name of the transient one-hot ancilla register.
pub const ONE_HOT_REG: &str = "one_hot";
/// Name of the classical bit holding the mid-circuit branch flag.
pub const ONE_HOT_FLAG_REG: &str = "one_hot_flag";

const ONE_HOT_SLOTS: u32 = 4;

/// The scratch register used by one encoder call.
///
/// Consumed by [`OneHotAncilla::retire`], which also retires the slots on
/// the circuit. The register stays visible in the layout, but no later
/// instruction may name one of its qubits.
#[derive(Debug)]
pub struct OneHotAncilla {
    slots: QuantumRegister,
    flag: ClassicalRegister,
}

impl OneHotAncilla {
    /// Allocate the ancilla and its flag bit on `circuit`.
    pub fn allocate(circuit: &mut Circuit) -> Self {
        let slots = circuit.add_qreg(ONE_HOT_REG, ONE_HOT_SLOTS);
        let flag = circuit.add_creg(ONE_HOT_FLAG_REG, 1);
        Self { slots, flag }
    }

    /// Slot `i` of the one-hot register.
    pub fn slot(&self, i: usize) -> QubitId {
        self.slots[i]
    }

    /// The branch flag.
    pub fn flag(&self) -> ClbitId {
        self.flag[0]
    }

    /// Give the ancilla up for good.
    pub fn retire(self, circuit: &mut Circuit) -> IrResult<()> {
        circuit.retire_qreg(&self.slots)?;
        debug!(register = self.slots.name(), "one-hot ancilla retired");
        Ok(())
    }
}

/// Converts a 2-slot little-endian count into a 3-slot thermometer code.
///
/// | count | unary (slot 0 first) |
/// |-------|----------------------|
/// | 0 | `000` |
/// | 1 | `100` |
/// | 2 | `110` |
#[derive(Debug, Clone, Copy, Default)]
pub struct UnaryEncoder;

impl UnaryEncoder {
    /// Emit the encoder from `source` (2 slots) into `unary` (3 slots).
    pub fn encode(
        &self,
        circuit: &mut Circuit,
        source: &QuantumRegister,
        unary: &QuantumRegister,
    ) -> IrResult<()> {
        check_len(source, 2, "UnaryEncoder", "2")?;
        check_len(unary, 3, "UnaryEncoder", "3")?;

        let ancilla = OneHotAncilla::allocate(circuit);
        let oh = |i: usize| ancilla.slot(i);

        // Binary to one-hot.
        circuit
            .cx(source[0], oh(1))?
            .cx(source[1], oh(2))?
            .x(oh(0))?;
        circuit.cx(oh(1), oh(0))?.cx(oh(2), oh(0))?;

        // Spare slot decides the branch.
        circuit.measure(oh(3), ancilla.flag())?;
        circuit.conditional(ClassicalCondition::bit(ancilla.flag(), true), |branch| {
            branch.swap(oh(0), oh(2))?;
            Ok(())
        })?;
        circuit.reset(oh(3))?;

        // One-hot to thermometer.
        circuit
            .cx(oh(3), oh(2))?
            .cx(oh(2), oh(1))?
            .cx(oh(1), oh(0))?
            .x(oh(0))?;

        for i in 0..unary.len() {
            circuit.cx(oh(i + 1), unary[i])?;
        }

        ancilla.retire(circuit)
    }
}
