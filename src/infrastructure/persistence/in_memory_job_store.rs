use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{JobStore, JobStoreError, Transition};
use crate::domain::{Job, JobId, JobSummary};

#[derive(Default)]
struct JobTable {
    jobs: HashMap<JobId, Job>,
    order: Vec<JobId>,
}

/// Process-memory job store.
///
/// Jobs are kept for the lifetime of the process; nothing is evicted.
#[derive(Default)]
pub struct InMemoryJobStore {
    table: RwLock<JobTable>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.jobs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn insert(&self, job: Job) -> Result<(), JobStoreError> {
        let mut table = self.table.write().await;
        if table.jobs.contains_key(&job.id) {
            return Err(JobStoreError::DuplicateId(job.id));
        }
        table.order.push(job.id);
        table.jobs.insert(job.id, job);
        Ok(())
    }

    async fn get(&self, id: JobId) -> Option<Job> {
        self.table.read().await.jobs.get(&id).cloned()
    }

    async fn list(&self) -> Vec<JobSummary> {
        let table = self.table.read().await;
        table
            .order
            .iter()
            .filter_map(|id| table.jobs.get(id))
            .map(Job::summary)
            .collect()
    }

    #[instrument(skip(self, transition), fields(job_id = %id, to = %transition.target()))]
    async fn transition(&self, id: JobId, transition: Transition) -> Result<Job, JobStoreError> {
        let mut table = self.table.write().await;
        let job = table.jobs.get_mut(&id).ok_or(JobStoreError::NotFound(id))?;

        let target = transition.target();
        if !job.status.can_transition_to(target) {
            return Err(JobStoreError::InvalidTransition {
                id,
                from: job.status,
                to: target,
            });
        }

        match transition {
            Transition::Processing => job.mark_processing(),
            Transition::Finish(outcome) => job.apply_outcome(outcome),
        }
        Ok(job.clone())
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn remove(&self, id: JobId) -> Option<Job> {
        let mut table = self.table.write().await;
        let removed = table.jobs.remove(&id)?;
        table.order.retain(|existing| *existing != id);
        Some(removed)
    }
}
