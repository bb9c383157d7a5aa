use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Job;

#[async_trait]
pub trait JobProcessor: Send + Sync {
    async fn process(&self, job: &Job) -> Result<Value, ProcessingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("artifact unavailable: {0}")]
    ArtifactUnavailable(String),
    #[error("processing failed: {0}")]
    Failed(String),
}
