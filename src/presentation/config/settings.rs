use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub queue: QueueSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub commit_sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub root_dir: String,
    pub max_upload_size_bytes: usize,
}

impl StorageSettings {
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.root_dir).join("uploads")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueSettings {
    pub capacity: usize,
    pub concurrency: usize,
    pub processing_delay_ms: u64,
    pub processing_timeout_secs: u64,
    /// Keeps `POST /v1/jobs/{id}/complete` routable. The endpoint is not
    /// authenticated.
    pub expose_completion_endpoint: bool,
}

impl QueueSettings {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    pub fn processing_timeout(&self) -> Duration {
        Duration::from_secs(self.processing_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Layers built-in defaults, `config/base`, `config/<environment>` and
    /// `APP__SECTION__KEY` environment variables, in increasing precedence.
    /// `PORT`, `COMMIT_SHA` and `STORAGE_DIR` are honoured as shorthands.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.commit_sha", "local-dev")?
            .set_default("storage.root_dir", "./data")?
            .set_default("storage.max_upload_size_bytes", 50 * 1024 * 1024)?
            .set_default("queue.capacity", 1024)?
            .set_default("queue.concurrency", 4)?
            .set_default("queue.processing_delay_ms", 5000)?
            .set_default("queue.processing_timeout_secs", 300)?
            .set_default("queue.expose_completion_endpoint", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .add_source(File::with_name("config/base").required(false))
            .add_source(
                File::with_name(&format!("config/{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("server.commit_sha", std::env::var("COMMIT_SHA").ok())?
            .set_override_option("storage.root_dir", std::env::var("STORAGE_DIR").ok())?
            .build()?
            .try_deserialize()
    }
}
