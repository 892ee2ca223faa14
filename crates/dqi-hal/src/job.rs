//! Job lifecycle types.
//!
//! ```text
//!   submit() ──→ Queued ──→ Running ──→ Completed
//!                  │           │
//!                  │           ├──→ Failed(reason)
//!                  │           │
//!                  └───────────┴──→ Cancelled
//! ```
//!
//! Transitions only move forward, and the three terminal states are final.
//! [`Job::advance`] enforces both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Job is waiting in queue.
    Queued,
    /// Job is currently running.
    Running,
    /// Job completed successfully.
    Completed,
    /// Job failed with an error message.
    Failed(String),
    /// Job was cancelled.
    Cancelled,
}

impl JobStatus {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed(_) | JobStatus::Cancelled
        )
    }

    /// Check if the job is still pending (queued or running).
    pub fn is_pending(&self) -> bool {
        matches!(self, JobStatus::Queued | JobStatus::Running)
    }

    /// Check if the job completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Completed)
    }

    fn rank(&self) -> u8 {
        match self {
            JobStatus::Queued => 0,
            JobStatus::Running => 1,
            _ => 2,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "Queued"),
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Completed => write!(f, "Completed"),
            JobStatus::Failed(msg) => write!(f, "Failed: {msg}"),
            JobStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A job with bookkeeping timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// The job identifier.
    pub id: JobId,
    /// Current status.
    pub status: JobStatus,
    /// Number of shots requested.
    pub shots: u32,
    /// Name of the submitted circuit.
    pub circuit: String,
    /// Backend the job was submitted to.
    pub backend: String,
    /// Time the job was created.
    pub created_at: DateTime<Utc>,
    /// Time the job started running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Time the job finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Create a queued job.
    pub fn new(
        id: impl Into<JobId>,
        shots: u32,
        circuit: impl Into<String>,
        backend: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Queued,
            shots,
            circuit: circuit.into(),
            backend: backend.into(),
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    /// Move the job to `status`, stamping start and finish times.
    ///
    /// Returns `false` and leaves the job untouched when the move would go
    /// backwards or leave a terminal state.
    pub fn advance(&mut self, status: JobStatus) -> bool {
        if self.status.is_terminal() || status.rank() < self.status.rank() {
            return false;
        }
        if matches!(status, JobStatus::Running) && self.started_at.is_none() {
            self.started_at = Some(Utc::now());
        }
        if status.is_terminal() {
            self.finished_at = Some(Utc::now());
        }
        self.status = status;
        true
    }
}
