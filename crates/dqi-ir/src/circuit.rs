//! High-level circuit builder API.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::{ClassicalCondition, Instruction, InstructionKind};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};
use crate::register::{ClassicalRegister, QuantumRegister};

/// A quantum circuit.
///
/// Instructions are kept in program order and executed strictly in that
/// order. Every qubit and classical bit belongs to a named register; ids are
/// handed out densely in allocation order, so a [`QubitId`] doubles as the
/// bit position in a basis-state index.
///
/// A retired qubit stays in the layout but rejects every further
/// instruction that names it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Classical bits in the circuit.
    clbits: Vec<Clbit>,
    /// Quantum registers in allocation order.
    qregs: Vec<QuantumRegister>,
    /// Classical registers in allocation order.
    cregs: Vec<ClassicalRegister>,
    /// Top-level program.
    instructions: Vec<Instruction>,
    /// Qubits no later instruction may touch.
    #[serde(default)]
    retired: FxHashSet<QubitId>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            qregs: vec![],
            cregs: vec![],
            instructions: vec![],
            retired: FxHashSet::default(),
        }
    }

    /// Add a quantum register with `size` fresh qubits.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> QuantumRegister {
        let name = name.into();
        let mut ids = Vec::with_capacity(size as usize);
        for i in 0..size {
            let id = QubitId(self.qubits.len() as u32);
            self.qubits.push(Qubit {
                id,
                register: name.clone(),
                index: i,
            });
            ids.push(id);
        }
        let reg = QuantumRegister::new(name, ids);
        self.qregs.push(reg.clone());
        reg
    }

    /// Add a classical register with `size` fresh bits.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> ClassicalRegister {
        let name = name.into();
        let mut ids = Vec::with_capacity(size as usize);
        for i in 0..size {
            let id = ClbitId(self.clbits.len() as u32);
            self.clbits.push(Clbit {
                id,
                register: name.clone(),
                index: i,
            });
            ids.push(id);
        }
        let reg = ClassicalRegister::new(name, ids);
        self.cregs.push(reg.clone());
        reg
    }

    /// Validate and append an instruction.
    #[allow(clippy::cast_possible_truncation)]
    fn apply(&mut self, instruction: Instruction) -> IrResult<()> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => Some(gate.name().to_string()),
            _ => None,
        };

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits() as usize;
            let got = instruction.qubits.len();
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: expected as u32,
                    got: got as u32,
                });
            }
        }

        if let InstructionKind::Measure = &instruction.kind {
            if instruction.qubits.len() != instruction.clbits.len() {
                return Err(IrError::MeasureArity {
                    qubits: instruction.qubits.len(),
                    clbits: instruction.clbits.len(),
                });
            }
        }

        if let InstructionKind::Conditional { on, .. } = &instruction.kind {
            if on.tests().is_empty() {
                return Err(IrError::EmptyCondition);
            }
        }

        for &qubit in &instruction.qubits {
            if qubit.index() >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        for &clbit in &instruction.clbits {
            if clbit.index() >= self.clbits.len() {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        for &qubit in &instruction.qubits {
            if self.retired.contains(&qubit) {
                return Err(IrError::RetiredQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        self.instructions.push(instruction);
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))?;
        Ok(self)
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))?;
        Ok(self)
    }

    /// Apply controlled-Ry gate.
    pub fn cry(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CRy(theta),
            control,
            target,
        ))?;
        Ok(self)
    }

    // =========================================================================
    // Three-qubit gates
    // =========================================================================

    /// Apply doubly-controlled Ry gate.
    pub fn ccry(
        &mut self,
        theta: f64,
        c1: QubitId,
        c2: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CCRy(theta), [c1, c2, target]))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Measure every slot of `qreg` into the matching slot of `creg`.
    pub fn measure_register(
        &mut self,
        qreg: &QuantumRegister,
        creg: &ClassicalRegister,
    ) -> IrResult<&mut Self> {
        if qreg.len() != creg.len() {
            return Err(IrError::MeasureArity {
                qubits: qreg.len(),
                clbits: creg.len(),
            });
        }
        for (q, c) in qreg.iter().zip(creg.iter()) {
            self.apply(Instruction::measure(q, c))?;
        }
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::reset(qubit))?;
        Ok(self)
    }

    /// Retire every qubit of `reg`.
    ///
    /// The register keeps its place in the layout, so qubit ids and
    /// counts keys do not shift, but any instruction naming one of its
    /// qubits is rejected from now on.
    pub fn retire_qreg(&mut self, reg: &QuantumRegister) -> IrResult<&mut Self> {
        for q in reg.iter() {
            if q.index() >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit: q,
                    gate_name: None,
                });
            }
        }
        self.retired.extend(reg.iter());
        Ok(self)
    }

    /// Emit a conditional block.
    ///
    /// `body` builds the block's contents on this same circuit; whatever it
    /// appends becomes the body instead of top-level program. Blocks nest.
    ///
    /// ```
    /// use dqi_ir::{Circuit, ClassicalCondition};
    ///
    /// let mut circuit = Circuit::new("branch");
    /// let q = circuit.add_qreg("q", 2);
    /// let c = circuit.add_creg("c", 1);
    /// circuit.measure(q[0], c[0]).unwrap();
    /// circuit
    ///     .conditional(ClassicalCondition::bit(c[0], true), |body| {
    ///         body.x(q[1])?;
    ///         Ok(())
    ///     })
    ///     .unwrap();
    /// assert_eq!(circuit.instructions().len(), 2);
    /// ```
    pub fn conditional<F>(&mut self, on: ClassicalCondition, body: F) -> IrResult<&mut Self>
    where
        F: FnOnce(&mut Self) -> IrResult<()>,
    {
        let outer = std::mem::take(&mut self.instructions);
        let built = body(self);
        let then = std::mem::replace(&mut self.instructions, outer);
        built?;
        self.apply(Instruction::conditional(on, then))?;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Whether `qubit` has been retired.
    pub fn is_retired(&self, qubit: QubitId) -> bool {
        self.retired.contains(&qubit)
    }

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Quantum registers in allocation order.
    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    /// Classical registers in allocation order.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Look up a quantum register by name.
    pub fn qreg(&self, name: &str) -> Option<&QuantumRegister> {
        self.qregs.iter().find(|r| r.name() == name)
    }

    /// Look up a classical register by name.
    pub fn creg(&self, name: &str) -> Option<&ClassicalRegister> {
        self.cregs.iter().find(|r| r.name() == name)
    }

    /// Top-level instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Total number of operations, counting the contents of conditional
    /// blocks as well as the blocks themselves.
    pub fn size(&self) -> usize {
        fn walk(insts: &[Instruction]) -> usize {
            insts
                .iter()
                .map(|i| match &i.kind {
                    InstructionKind::Conditional { then, .. } => 1 + walk(then),
                    _ => 1,
                })
                .sum()
        }
        walk(&self.instructions)
    }

    /// Operation counts by name, descending into conditional blocks.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        fn walk(insts: &[Instruction], acc: &mut BTreeMap<String, usize>) {
            for inst in insts {
                *acc.entry(inst.name().to_string()).or_insert(0) += 1;
                if let InstructionKind::Conditional { then, .. } = &inst.kind {
                    walk(then, acc);
                }
            }
        }
        let mut acc = BTreeMap::new();
        walk(&self.instructions, &mut acc);
        acc
    }

    /// Get the circuit depth.
    ///
    /// Each top-level instruction occupies one layer on every qubit and
    /// classical bit it touches; a conditional block counts as a single
    /// layer.
    pub fn depth(&self) -> usize {
        let mut qfront = vec![0usize; self.qubits.len()];
        let mut cfront = vec![0usize; self.clbits.len()];
        let mut max_depth = 0;

        for inst in &self.instructions {
            let start = inst
                .qubits
                .iter()
                .map(|q| qfront[q.index()])
                .chain(inst.clbits.iter().map(|c| cfront[c.index()]))
                .max()
                .unwrap_or(0);
            let layer = start + 1;
            for q in &inst.qubits {
                qfront[q.index()] = layer;
            }
            for c in &inst.clbits {
                cfront[c.index()] = layer;
            }
            max_depth = max_depth.max(layer);
        }

        max_depth
    }
}
