use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use super::{JobId, JobOutcome, JobStatus, StoragePath};

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub file_path: StoragePath,
    pub original_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl Job {
    pub fn new(id: JobId, file_path: StoragePath, original_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: JobStatus::Queued,
            file_path,
            original_name,
            created_at: now,
            updated_at: now,
            result: None,
            error: None,
        }
    }

    pub fn mark_processing(&mut self) {
        self.status = JobStatus::Processing;
        self.touch();
    }

    pub fn apply_outcome(&mut self, outcome: JobOutcome) {
        self.status = outcome.status();
        match outcome {
            JobOutcome::Completed(result) => {
                self.result = result;
                self.error = None;
            }
            JobOutcome::Failed(error) => {
                self.result = None;
                self.error = error;
            }
        }
        self.touch();
    }

    pub fn summary(&self) -> JobSummary {
        JobSummary {
            id: self.id,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    // updated_at strictly increases at millisecond resolution.
    fn touch(&mut self) {
        let floor = self.updated_at + Duration::milliseconds(1);
        self.updated_at = Utc::now().max(floor);
    }
}

/// Listing view of a job. Carries no file path, result or error.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    pub id: JobId,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
