mod job_processor;
mod job_queue;
mod job_store;
mod staging_store;

pub use job_processor::{JobProcessor, ProcessingError};
pub use job_queue::{JobQueue, QueueError};
pub use job_store::{JobStore, JobStoreError, Transition};
pub use staging_store::{StagingStore, StagingStoreError, StoredObject};
