mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{LoggingSettings, QueueSettings, ServerSettings, Settings, StorageSettings};
