//! Tests for the provided `Backend::wait` polling loop.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use dqi_hal::{
    Backend, BackendAvailability, Capabilities, Counts, ExecutionResult, HalError, HalResult,
    JobId, JobStatus, ValidationResult,
};
use dqi_ir::Circuit;

/// Backend whose job reaches `terminal` after `polls_needed` status calls.
struct ScriptedBackend {
    caps: Capabilities,
    polls: AtomicU32,
    polls_needed: u32,
    terminal: Mutex<JobStatus>,
}

impl ScriptedBackend {
    fn new(polls_needed: u32, terminal: JobStatus) -> Self {
        Self {
            caps: Capabilities::simulator(4),
            polls: AtomicU32::new(0),
            polls_needed,
            terminal: Mutex::new(terminal),
        }
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(ValidationResult::check(circuit, &self.caps))
    }

    async fn submit(&self, _circuit: &Circuit, _shots: u32) -> HalResult<JobId> {
        Ok(JobId::new("job-1"))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        if job_id.0 != "job-1" {
            return Err(HalError::JobNotFound(job_id.0.clone()));
        }
        let n = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        if n < self.polls_needed {
            Ok(JobStatus::Running)
        } else {
            Ok(self.terminal.lock().unwrap().clone())
        }
    }

    async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
        Ok(ExecutionResult::new(
            Counts::from_pairs([("000000", 8)]),
            8,
        ))
    }

    async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
        *self.terminal.lock().unwrap() = JobStatus::Cancelled;
        Ok(())
    }
}

// ============================================================================
// Terminal states
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_wait_returns_result_after_polling() {
    let backend = ScriptedBackend::new(4, JobStatus::Completed);
    let job = backend.submit(&Circuit::new("c"), 8).await.unwrap();

    let result = backend.wait(&job).await.unwrap();
    assert_eq!(result.counts.get("000000"), 8);
    assert_eq!(backend.polls.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn test_wait_surfaces_failure() {
    let backend = ScriptedBackend::new(2, JobStatus::Failed("decoder crashed".into()));
    let job = backend.submit(&Circuit::new("c"), 8).await.unwrap();

    match backend.wait(&job).await {
        Err(HalError::JobFailed(msg)) => assert_eq!(msg, "decoder crashed"),
        other => panic!("Expected JobFailed, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_wait_after_cancel() {
    let backend = ScriptedBackend::new(1, JobStatus::Completed);
    let job = backend.submit(&Circuit::new("c"), 8).await.unwrap();
    backend.cancel(&job).await.unwrap();

    assert!(matches!(backend.wait(&job).await, Err(HalError::JobCancelled)));
}

#[tokio::test(start_paused = true)]
async fn test_wait_unknown_job() {
    let backend = ScriptedBackend::new(1, JobStatus::Completed);
    assert!(matches!(
        backend.wait(&JobId::new("nope")).await,
        Err(HalError::JobNotFound(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_wait_times_out() {
    let backend = ScriptedBackend::new(u32::MAX, JobStatus::Completed);
    let job = backend.submit(&Circuit::new("c"), 8).await.unwrap();

    assert!(matches!(backend.wait(&job).await, Err(HalError::Timeout(_))));
}
