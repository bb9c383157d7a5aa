use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{JobQueue, QueueError};
use crate::domain::JobId;

/// Records enqueued ids. Built with [`MockJobQueue::unavailable`] every
/// enqueue fails.
#[derive(Default)]
pub struct MockJobQueue {
    enqueued: Mutex<Vec<JobId>>,
    fail: bool,
}

impl MockJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            enqueued: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn enqueued(&self) -> Vec<JobId> {
        self.enqueued
            .lock()
            .map(|ids| ids.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl JobQueue for MockJobQueue {
    async fn enqueue(&self, id: JobId) -> Result<(), QueueError> {
        if self.fail {
            return Err(QueueError::Unavailable("mock queue offline".to_string()));
        }
        let mut ids = self
            .enqueued
            .lock()
            .map_err(|e| QueueError::Unavailable(e.to_string()))?;
        ids.push(id);
        Ok(())
    }
}
