use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::application::ports::{JobQueue, QueueError};
use crate::domain::JobId;

/// Bounded in-process queue feeding a [`JobWorker`](crate::application::services::JobWorker).
#[derive(Clone)]
pub struct ChannelJobQueue {
    sender: mpsc::Sender<JobId>,
}

impl ChannelJobQueue {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<JobId>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl JobQueue for ChannelJobQueue {
    async fn enqueue(&self, id: JobId) -> Result<(), QueueError> {
        self.sender.try_send(id).map_err(|e| match e {
            TrySendError::Full(_) => QueueError::Full,
            TrySendError::Closed(_) => QueueError::Unavailable("worker stopped".to_string()),
        })
    }
}
