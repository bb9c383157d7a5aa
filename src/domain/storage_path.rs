use std::fmt;
use std::path::Path;

use super::JobId;

pub const DEFAULT_EXTENSION: &str = ".pdf";

/// Storage key of an uploaded artifact: `<job id><extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    /// The extension is taken from the user-supplied name and falls back to
    /// `.pdf` when missing or not purely alphanumeric.
    pub fn new(job_id: &JobId, original_name: &str) -> Self {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{}", ext))
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        Self(format!("{}{}", job_id, extension))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
