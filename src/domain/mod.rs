mod job;
mod job_id;
mod job_outcome;
mod job_status;
mod storage_path;

pub use job::{Job, JobSummary};
pub use job_id::JobId;
pub use job_outcome::JobOutcome;
pub use job_status::JobStatus;
pub use storage_path::{DEFAULT_EXTENSION, StoragePath};
