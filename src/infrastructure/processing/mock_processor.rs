use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::{JobProcessor, ProcessingError};
use crate::domain::Job;

/// Scripted processor for tests.
pub enum MockJobProcessor {
    Succeed(Value),
    Fail(String),
    Panic,
    Hang,
}

#[async_trait]
impl JobProcessor for MockJobProcessor {
    async fn process(&self, _job: &Job) -> Result<Value, ProcessingError> {
        match self {
            MockJobProcessor::Succeed(value) => Ok(value.clone()),
            MockJobProcessor::Fail(message) => Err(ProcessingError::Failed(message.clone())),
            MockJobProcessor::Panic => panic!("mock processor panicked"),
            MockJobProcessor::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Value::Null)
            }
        }
    }
}
