use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::application::ports::{
    JobQueue, JobStore, JobStoreError, QueueError, StagingStore, StagingStoreError,
};
use crate::domain::{Job, JobId, StoragePath};

/// Turns an uploaded byte stream into a stored artifact plus a queued job.
pub struct IngestionService {
    job_store: Arc<dyn JobStore>,
    staging_store: Arc<dyn StagingStore>,
    job_queue: Arc<dyn JobQueue>,
}

impl IngestionService {
    pub fn new(
        job_store: Arc<dyn JobStore>,
        staging_store: Arc<dyn StagingStore>,
        job_queue: Arc<dyn JobQueue>,
    ) -> Self {
        Self {
            job_store,
            staging_store,
            job_queue,
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn ingest(
        &self,
        original_name: String,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<JobId, IngestionError> {
        let job_id = JobId::new();
        let storage_path = StoragePath::new(&job_id, &original_name);

        let size = self
            .staging_store
            .store(&storage_path, stream)
            .await
            .map_err(IngestionError::Storage)?;
        tracing::debug!(bytes = size, path = %storage_path, "Upload staged");

        let job = Job::new(job_id, storage_path.clone(), original_name);
        if let Err(e) = self.job_store.insert(job).await {
            self.discard_artifact(&storage_path).await;
            return Err(IngestionError::Registration(e));
        }

        if let Err(e) = self.job_queue.enqueue(job_id).await {
            // A job without queued work must never stay visible.
            self.job_store.remove(job_id).await;
            self.discard_artifact(&storage_path).await;
            tracing::error!(job_id = %job_id, error = %e, "Enqueue failed, job rolled back");
            return Err(IngestionError::Queue(e));
        }

        tracing::info!(job_id = %job_id, bytes = size, "Job queued");
        Ok(job_id)
    }

    async fn discard_artifact(&self, path: &StoragePath) {
        if let Err(e) = self.staging_store.delete(path).await {
            tracing::warn!(error = %e, path = %path, "Failed to delete orphaned upload");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("storage: {0}")]
    Storage(StagingStoreError),
    #[error("job registration: {0}")]
    Registration(JobStoreError),
    #[error("queue: {0}")]
    Queue(QueueError),
}
