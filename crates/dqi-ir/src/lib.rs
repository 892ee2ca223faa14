//! DQI Circuit Intermediate Representation
//!
//! Core data structures for the dynamic circuits the DQI Max-XORSAT
//! assembler emits: named registers, a small fixed gate set, mid-circuit
//! measurement and reset, and classically conditioned blocks.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered instruction list. Instructions execute
//! strictly in program order; a [`InstructionKind::Conditional`] block runs
//! its body only when its [`ClassicalCondition`] holds against the classical
//! bits measured so far.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Registers**: [`QuantumRegister`], [`ClassicalRegister`]
//! - **Gates**: [`StandardGate`], wrapped with metadata in [`Gate`]
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder API
//!
//! # Example: Measure-and-branch
//!
//! ```rust
//! use dqi_ir::{Circuit, ClassicalCondition};
//!
//! let mut circuit = Circuit::new("branch");
//! let q = circuit.add_qreg("q", 2);
//! let flag = circuit.add_creg("flag", 1);
//!
//! circuit.h(q[0]).unwrap();
//! circuit.measure(q[0], flag[0]).unwrap();
//! circuit
//!     .conditional(ClassicalCondition::bit(flag[0], true), |then| {
//!         then.x(q[1])?;
//!         Ok(())
//!     })
//!     .unwrap();
//! circuit.reset(q[0]).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Z` | 1 | Pauli gates |
//! | `Ry` | 1 | Y rotation |
//! | `CX` | 2 | Controlled-NOT |
//! | `Swap` | 2 | SWAP gate |
//! | `CRy` | 2 | Controlled Y rotation |
//! | `CCRy` | 3 | Doubly-controlled Y rotation |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod register;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, StandardGate};
pub use instruction::{ClassicalCondition, Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
pub use register::{ClassicalRegister, QuantumRegister};
