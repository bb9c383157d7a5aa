use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: Environment,
    pub level: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn new(environment: Environment, logging: &LoggingSettings) -> Self {
        Self {
            environment,
            level: logging.level.clone(),
            json_format: logging.enable_json,
        }
    }

    /// Fallback filter used when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> String {
        format!("{level},pdf_analyzer={level},tower_http=info", level = self.level)
    }
}
