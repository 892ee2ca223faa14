//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use dqi_hal::{
    Backend, BackendAvailability, Capabilities, Counts, ExecutionResult, HalError, HalResult, Job,
    JobId, JobStatus, ValidationResult,
};
use dqi_ir::Circuit;

use crate::statevector::SparseStatevector;

/// Default qubit budget.
pub const DEFAULT_MAX_QUBITS: u32 = 24;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local simulator backend.
///
/// Every shot is simulated as an independent trajectory over a sparse
/// statevector, so mid-circuit measurement, reset and classically
/// conditioned blocks behave as they would on hardware. Jobs run to
/// completion inside [`Backend::submit`]. A job is forgotten once
/// [`Backend::result`] has reported its terminal state, so the job table
/// only holds results nobody has collected yet.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with a custom qubit budget.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            seed: None,
        }
    }

    /// Make every submission reproducible from `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn jobs(&self) -> MutexGuard<'_, FxHashMap<String, SimJob>> {
        self.jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Run all shots synchronously.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();
        let num_qubits = circuit.num_qubits();
        let num_clbits = circuit.num_clbits();
        debug!(num_qubits, num_clbits, "starting simulation");

        let mut rng = self.rng();
        let mut counts = Counts::new();

        for shot in 0..shots {
            let mut sv = SparseStatevector::new(num_qubits);
            let mut memory = vec![false; num_clbits];
            sv.execute(circuit.instructions(), &mut memory, &mut rng);

            let bitstring = if num_clbits > 0 {
                memory_to_bitstring(&memory)
            } else {
                format!("{:0width$b}", sv.sample(&mut rng), width = num_qubits)
            };
            counts.insert(bitstring, 1);

            if shot > 0 && shot % 1000 == 0 {
                debug!("completed {} shots", shot);
            }
        }

        let elapsed = start.elapsed();
        debug!(distinct = counts.len(), ?elapsed, "simulation completed");

        ExecutionResult::new(counts, shots)
            .with_execution_time(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Render classical memory with the highest bit leftmost.
fn memory_to_bitstring(memory: &[bool]) -> String {
    memory
        .iter()
        .rev()
        .map(|&b| if b { '1' } else { '0' })
        .collect()
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(ValidationResult::check(circuit, &self.capabilities))
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} exceeds the limit of {}",
                self.capabilities.max_shots
            )));
        }
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        if let ValidationResult::Invalid { reasons } =
            ValidationResult::check(circuit, &self.capabilities)
        {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let mut job = Job::new(job_id.clone(), shots, circuit.name(), self.name());
        job.advance(JobStatus::Running);
        self.jobs().insert(
            job_id.0.clone(),
            SimJob {
                job,
                result: None,
            },
        );
        debug!("submitted job {}", job_id);

        let result = self.run_simulation(circuit, shots);
        info!(
            job = %job_id,
            shots,
            distinct = result.counts.len(),
            "job completed"
        );

        if let Some(sim_job) = self.jobs().get_mut(&job_id.0) {
            if sim_job.job.advance(JobStatus::Completed) {
                sim_job.result = Some(result);
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.jobs()
            .get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let mut jobs = self.jobs();
        let status = jobs
            .get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        if !status.is_terminal() {
            return Err(HalError::ResultNotReady(job_id.0.clone()));
        }

        let sim_job = jobs.remove(&job_id.0);
        debug!("job {} collected", job_id);
        match (status, sim_job.and_then(|j| j.result)) {
            (JobStatus::Completed, Some(result)) => Ok(result),
            (JobStatus::Cancelled, _) => Err(HalError::JobCancelled),
            (JobStatus::Failed(msg), _) => Err(HalError::JobFailed(msg)),
            _ => Err(HalError::ResultNotReady(job_id.0.clone())),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.jobs();
        let sim_job = jobs
            .get_mut(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        if !sim_job.job.advance(JobStatus::Cancelled) {
            debug!("job {} already {}, cancel ignored", job_id, sim_job.job.status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqi_ir::ClassicalCondition;

    fn bell() -> Circuit {
        let mut circuit = Circuit::new("bell");
        let q = circuit.add_qreg("q", 2);
        let c = circuit.add_creg("c", 2);
        circuit.h(q[0]).unwrap().cx(q[0], q[1]).unwrap();
        circuit.measure_register(&q, &c).unwrap();
        circuit
    }

    #[tokio::test]
    async fn test_simulator_capabilities() {
        let backend = SimulatorBackend::new();
        let caps = backend.capabilities();

        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, DEFAULT_MAX_QUBITS);
        assert!(backend.availability().await.unwrap().is_available);
    }

    #[tokio::test]
    async fn test_simulator_bell_state() {
        let backend = SimulatorBackend::new().with_seed(1);

        let job_id = backend.submit(&bell(), 1000).await.unwrap();
        assert!(backend.status(&job_id).await.unwrap().is_success());

        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.shots, 1000);

        let counts = &result.counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
        assert!(counts.get("00") > 0 && counts.get("11") > 0);
    }

    #[tokio::test]
    async fn test_feed_forward() {
        // x; measure; if set, flip the second qubit: always "11".
        let mut circuit = Circuit::new("feed_forward");
        let q = circuit.add_qreg("q", 2);
        let c = circuit.add_creg("c", 2);
        circuit.x(q[0]).unwrap().measure(q[0], c[0]).unwrap();
        circuit
            .conditional(ClassicalCondition::bit(c[0], true), |b| {
                b.x(q[1])?;
                Ok(())
            })
            .unwrap();
        circuit.measure(q[1], c[1]).unwrap();

        let backend = SimulatorBackend::new();
        let job_id = backend.submit(&circuit, 50).await.unwrap();
        let result = backend.wait(&job_id).await.unwrap();
        assert_eq!(result.counts.get("11"), 50);
    }

    #[tokio::test]
    async fn test_reset_mid_circuit() {
        let mut circuit = Circuit::new("reset");
        let q = circuit.add_qreg("q", 1);
        let c = circuit.add_creg("c", 1);
        circuit.h(q[0]).unwrap().reset(q[0]).unwrap();
        circuit.measure(q[0], c[0]).unwrap();

        let backend = SimulatorBackend::new();
        let job_id = backend.submit(&circuit, 100).await.unwrap();
        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.counts.get("0"), 100);
    }

    #[tokio::test]
    async fn test_bitstring_highest_clbit_leftmost() {
        let mut circuit = Circuit::new("order");
        let q = circuit.add_qreg("q", 3);
        let c = circuit.add_creg("c", 3);
        circuit.x(q[0]).unwrap();
        circuit.measure_register(&q, &c).unwrap();

        let backend = SimulatorBackend::new();
        let job_id = backend.submit(&circuit, 5).await.unwrap();
        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.counts.get("001"), 5);
    }

    #[tokio::test]
    async fn test_no_clbits_samples_all_qubits() {
        let mut circuit = Circuit::new("unmeasured");
        let q = circuit.add_qreg("q", 3);
        circuit.x(q[1]).unwrap();

        let backend = SimulatorBackend::new();
        let job_id = backend.submit(&circuit, 10).await.unwrap();
        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.counts.get("010"), 10);
    }

    #[tokio::test]
    async fn test_seed_is_reproducible() {
        let a = SimulatorBackend::new().with_seed(42);
        let b = SimulatorBackend::new().with_seed(42);

        let ra = a.wait(&a.submit(&bell(), 256).await.unwrap()).await.unwrap();
        let rb = b.wait(&b.submit(&bell(), 256).await.unwrap()).await.unwrap();
        assert_eq!(ra.counts, rb.counts);
    }

    #[tokio::test]
    async fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_max_qubits(5);

        let mut circuit = Circuit::new("wide");
        circuit.add_qreg("q", 10);
        let result = backend.submit(&circuit, 100).await;

        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));
    }

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let backend = SimulatorBackend::new();
        assert!(matches!(
            backend.submit(&bell(), 0).await,
            Err(HalError::InvalidShots(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_job_and_late_cancel() {
        let backend = SimulatorBackend::new();
        let missing = JobId::new("missing");
        assert!(matches!(
            backend.status(&missing).await,
            Err(HalError::JobNotFound(_))
        ));

        let job_id = backend.submit(&bell(), 4).await.unwrap();
        backend.cancel(&job_id).await.unwrap();
        // Completed jobs stay completed.
        assert!(backend.status(&job_id).await.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_result_is_collected_once() {
        let backend = SimulatorBackend::new().with_seed(3);
        let first = backend.submit(&bell(), 8).await.unwrap();
        let second = backend.submit(&bell(), 8).await.unwrap();
        assert_eq!(backend.jobs().len(), 2);

        assert_eq!(backend.result(&first).await.unwrap().shots, 8);
        assert_eq!(backend.jobs().len(), 1);
        assert!(matches!(
            backend.result(&first).await,
            Err(HalError::JobNotFound(_))
        ));
        assert!(matches!(
            backend.status(&first).await,
            Err(HalError::JobNotFound(_))
        ));

        // Uncollected jobs are untouched.
        assert!(backend.status(&second).await.unwrap().is_success());
        backend.wait(&second).await.unwrap();
        assert!(backend.jobs().is_empty());
    }

    #[test]
    fn test_memory_to_bitstring() {
        assert_eq!(memory_to_bitstring(&[true, false, false]), "001");
        assert_eq!(memory_to_bitstring(&[]), "");
    }
}
