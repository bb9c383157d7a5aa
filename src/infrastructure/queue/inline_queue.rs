use async_trait::async_trait;

use crate::application::ports::{JobQueue, QueueError};
use crate::application::services::JobRunner;
use crate::domain::JobId;

/// Runs each job to completion inside `enqueue`. Test double only: it makes
/// upload-to-terminal-state flows deterministic.
pub struct InlineJobQueue {
    runner: JobRunner,
}

impl InlineJobQueue {
    pub fn new(runner: JobRunner) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl JobQueue for InlineJobQueue {
    async fn enqueue(&self, id: JobId) -> Result<(), QueueError> {
        self.runner.run(id).await;
        Ok(())
    }
}
