use std::sync::Arc;

use crate::application::ports::{JobStore, JobStoreError, Transition};
use crate::domain::{Job, JobId, JobOutcome};

/// The only path through which a terminal outcome reaches the job store.
///
/// Called from worker tasks and from the HTTP completion endpoint.
#[derive(Clone)]
pub struct CompletionCallback {
    job_store: Arc<dyn JobStore>,
}

impl CompletionCallback {
    pub fn new(job_store: Arc<dyn JobStore>) -> Self {
        Self { job_store }
    }

    /// Returns whether the transition was applied.
    pub async fn report_outcome(&self, job_id: JobId, outcome: JobOutcome) -> bool {
        self.report(job_id, outcome).await.is_ok()
    }

    #[tracing::instrument(skip_all, fields(job_id = %job_id.as_uuid(), status = %outcome.status()))]
    pub async fn report(&self, job_id: JobId, outcome: JobOutcome) -> Result<Job, JobStoreError> {
        match self
            .job_store
            .transition(job_id, Transition::Finish(outcome))
            .await
        {
            Ok(job) => {
                tracing::info!("Job outcome recorded");
                Ok(job)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Job outcome rejected");
                Err(e)
            }
        }
    }
}
