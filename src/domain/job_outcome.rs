use serde_json::Value;

use super::JobStatus;

/// Terminal result reported for a job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Completed(Option<Value>),
    Failed(Option<String>),
}

impl JobOutcome {
    pub fn completed(result: Value) -> Self {
        Self::Completed(Some(result))
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed(Some(error.into()))
    }

    /// Builds an outcome from the loose `{status, result, error}` shape used by
    /// external callers. Returns `None` for a non-terminal status.
    pub fn from_parts(
        status: JobStatus,
        result: Option<Value>,
        error: Option<String>,
    ) -> Option<Self> {
        match status {
            JobStatus::Completed => Some(Self::Completed(result)),
            JobStatus::Failed => Some(Self::Failed(error)),
            JobStatus::Queued | JobStatus::Processing => None,
        }
    }

    pub fn status(&self) -> JobStatus {
        match self {
            Self::Completed(_) => JobStatus::Completed,
            Self::Failed(_) => JobStatus::Failed,
        }
    }
}
