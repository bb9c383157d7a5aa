use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::ports::{JobProcessor, ProcessingError, StagingStore};
use crate::domain::Job;

/// Stand-in for real PDF analysis: waits a fixed delay, checks the upload is
/// still staged and returns a canned result.
pub struct SimulatedPdfProcessor {
    staging_store: Arc<dyn StagingStore>,
    delay: Duration,
}

impl SimulatedPdfProcessor {
    pub fn new(staging_store: Arc<dyn StagingStore>, delay: Duration) -> Self {
        Self {
            staging_store,
            delay,
        }
    }
}

#[async_trait]
impl JobProcessor for SimulatedPdfProcessor {
    async fn process(&self, job: &Job) -> Result<Value, ProcessingError> {
        tracing::info!(file_path = %job.file_path, "Processing upload");

        let size = self
            .staging_store
            .head(&job.file_path)
            .await
            .map_err(|e| ProcessingError::ArtifactUnavailable(e.to_string()))?;

        tokio::time::sleep(self.delay).await;

        Ok(json!({
            "success": true,
            "jobId": job.id.to_string(),
            "sizeBytes": size,
        }))
    }
}
