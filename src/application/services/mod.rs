mod completion_callback;
mod ingestion_service;
mod job_worker;

pub use completion_callback::CompletionCallback;
pub use ingestion_service::{IngestionError, IngestionService};
pub use job_worker::{JobRunner, JobWorker};
