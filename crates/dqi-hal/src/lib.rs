//! DQI Hardware Abstraction Layer
//!
//! A small async interface for running DQI circuits on an execution target
//! and collecting measurement histograms.
//!
//! - [`Backend`]: job submission, polling and retrieval
//! - [`Capabilities`]: qubit budget, gate set and feature flags
//! - [`ExecutionResult`] and [`Counts`]: what a finished job returns
//!
//! # Implementing a Backend
//!
//! ```ignore
//! use dqi_hal::{
//!     Backend, BackendAvailability, Capabilities, ExecutionResult, HalResult, JobId,
//!     JobStatus, ValidationResult,
//! };
//! use dqi_ir::Circuit;
//! use async_trait::async_trait;
//!
//! struct MyBackend {
//!     capabilities: Capabilities,
//! }
//!
//! #[async_trait]
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     async fn availability(&self) -> HalResult<BackendAvailability> {
//!         Ok(BackendAvailability::always_available())
//!     }
//!
//!     async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
//!         Ok(ValidationResult::check(circuit, &self.capabilities))
//!     }
//!
//!     async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
//!         # todo!()
//!     }
//!
//!     async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
//!         # todo!()
//!     }
//!
//!     async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
//!         # todo!()
//!     }
//!
//!     async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
