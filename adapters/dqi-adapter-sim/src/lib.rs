//! DQI Local Simulator
//!
//! A sparse statevector backend for the dynamic circuits produced by the DQI
//! assembler. Each shot is an independent trajectory: measurements collapse
//! the state and record a classical bit, resets measure and flip, and
//! conditional blocks are resolved against the bits recorded so far.
//!
//! Memory scales with the number of live branches, not with `2^n`, so the
//! 21-qubit DQI program simulates comfortably.
//!
//! # Example
//!
//! ```ignore
//! use dqi_adapter_sim::SimulatorBackend;
//! use dqi_hal::Backend;
//!
//! let backend = SimulatorBackend::new().with_seed(7);
//! let job_id = backend.submit(&circuit, 1024).await?;
//! let result = backend.wait(&job_id).await?;
//! println!("{:?}", result.counts.most_frequent());
//! ```

mod simulator;
pub mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend};
pub use statevector::SparseStatevector;
