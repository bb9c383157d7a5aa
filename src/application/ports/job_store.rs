use async_trait::async_trait;

use crate::domain::{Job, JobId, JobOutcome, JobStatus, JobSummary, StoragePath};

/// Requested state change for a job.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Processing,
    Finish(JobOutcome),
}

impl Transition {
    pub fn target(&self) -> JobStatus {
        match self {
            Transition::Processing => JobStatus::Processing,
            Transition::Finish(outcome) => outcome.status(),
        }
    }
}

/// Single source of truth for job existence and lifecycle state.
///
/// Implementations must be safe to call concurrently from request handlers and
/// worker tasks, and must never hand out a live reference to a stored job.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn insert(&self, job: Job) -> Result<(), JobStoreError>;

    async fn get(&self, id: JobId) -> Option<Job>;

    /// Summaries in insertion order.
    async fn list(&self) -> Vec<JobSummary>;

    /// Applies a checked lifecycle transition and returns the updated snapshot.
    async fn transition(&self, id: JobId, transition: Transition) -> Result<Job, JobStoreError>;

    /// Removes a job. Only used to roll back an upload whose enqueue failed.
    async fn remove(&self, id: JobId) -> Option<Job>;

    async fn create(
        &self,
        file_path: StoragePath,
        original_name: String,
    ) -> Result<JobId, JobStoreError> {
        let job = Job::new(JobId::new(), file_path, original_name);
        let id = job.id;
        self.insert(job).await?;
        Ok(id)
    }

    async fn mark_processing(&self, id: JobId) -> Result<Job, JobStoreError> {
        self.transition(id, Transition::Processing).await
    }

    /// Records a terminal outcome. Returns `false` without mutating anything
    /// when the job is unknown or already terminal.
    async fn complete(&self, id: JobId, outcome: JobOutcome) -> bool {
        self.transition(id, Transition::Finish(outcome)).await.is_ok()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobStoreError {
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("job already exists: {0}")]
    DuplicateId(JobId),
    #[error("invalid transition for job {id}: {from} -> {to}")]
    InvalidTransition {
        id: JobId,
        from: JobStatus,
        to: JobStatus,
    },
}
