use async_trait::async_trait;

use crate::domain::JobId;

/// Hands job ids to an asynchronous execution facility.
///
/// `enqueue` must return without waiting for the job to run. Failing to reach
/// the facility is reported synchronously so the caller can roll back.
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, id: JobId) -> Result<(), QueueError>;
}

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("queue is full")]
    Full,
    #[error("queue unavailable: {0}")]
    Unavailable(String),
}
