//! Backend trait.
//!
//! ```text
//!   capabilities() ──→ validate() ──→ submit() ──→ status() ──→ result()
//!    (sync, &ref)       (async)       (async)      (async)      (async)
//! ```
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `capabilities()` | sync | yes | `&Capabilities` |
//! | `availability()` | async | yes | `HalResult<BackendAvailability>` |
//! | `validate()` | async | yes | `HalResult<ValidationResult>` |
//! | `submit()` | async | yes | `HalResult<JobId>` |
//! | `status()` | async | yes | `HalResult<JobStatus>` |
//! | `result()` | async | yes | `HalResult<ExecutionResult>` |
//! | `cancel()` | async | yes | `HalResult<()>` |
//! | `wait()` | async | provided | `HalResult<ExecutionResult>` |

use std::time::Duration;

use async_trait::async_trait;
use dqi_ir::{Circuit, Instruction, InstructionKind};

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Polling interval used by [`Backend::wait`].
pub const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Maximum number of polls before [`Backend::wait`] gives up.
pub const WAIT_MAX_POLLS: u32 = 6_000;

/// A target that executes circuits and returns measurement histograms.
///
/// - `capabilities()` is synchronous and cached at construction.
/// - `submit()` returns a job that starts out `Queued`.
/// - `result()` is only meaningful once `status()` reports `Completed`.
/// - A backend may forget a job once `result()` has reported on it; later
///   calls for that id then fail with `JobNotFound`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Check whether the backend currently accepts jobs.
    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Validate a circuit against backend constraints.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    /// Submit a circuit for `shots` executions.
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Get the result of a completed job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Cancel a job.
    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Poll until the job reaches a terminal state and return its result.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        for _ in 0..WAIT_MAX_POLLS {
            match self.status(job_id).await? {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => {
                    tokio::time::sleep(WAIT_POLL_INTERVAL).await;
                }
            }
        }

        Err(HalError::Timeout(job_id.0.clone()))
    }
}

/// Backend availability information.
#[derive(Debug, Clone)]
pub struct BackendAvailability {
    /// Whether the backend is currently accepting jobs.
    pub is_available: bool,
    /// Number of jobs currently in queue (if known).
    pub queue_depth: Option<u32>,
    /// Human-readable status message.
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// Availability of a backend that never queues.
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            queue_depth: Some(0),
            status_message: None,
        }
    }

    /// Availability of an offline backend.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            queue_depth: None,
            status_message: Some(reason.into()),
        }
    }
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit can be submitted as-is.
    Valid,
    /// Circuit cannot run on this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Check `circuit` against a capability description.
    ///
    /// Looks at the qubit budget, the gate set (including gates nested in
    /// conditional blocks) and whether dynamic-circuit features are offered
    /// when the circuit needs them.
    pub fn check(circuit: &Circuit, caps: &Capabilities) -> Self {
        let mut reasons = Vec::new();

        if circuit.num_qubits() > caps.num_qubits as usize {
            reasons.push(format!(
                "circuit uses {} qubits, backend offers {}",
                circuit.num_qubits(),
                caps.num_qubits
            ));
        }

        let mut unsupported: Vec<String> = Vec::new();
        let mut dynamic = false;
        scan(circuit.instructions(), caps, &mut unsupported, &mut dynamic);
        for gate in unsupported {
            reasons.push(format!("gate '{gate}' is not supported"));
        }
        if dynamic && !caps.has_feature("classical_control") {
            reasons.push("circuit needs classical control flow".into());
        }

        if reasons.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid { reasons }
        }
    }
}

fn scan(
    insts: &[Instruction],
    caps: &Capabilities,
    unsupported: &mut Vec<String>,
    dynamic: &mut bool,
) {
    for inst in insts {
        match &inst.kind {
            InstructionKind::Gate(g) => {
                if !caps.gate_set.contains(g.name()) && !unsupported.iter().any(|u| u == g.name())
                {
                    unsupported.push(g.name().to_string());
                }
            }
            InstructionKind::Conditional { then, .. } => {
                *dynamic = true;
                scan(then, caps, unsupported, dynamic);
            }
            InstructionKind::Measure | InstructionKind::Reset => {}
        }
    }
}
