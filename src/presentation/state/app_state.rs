use std::sync::Arc;

use crate::application::ports::{JobStore, StagingStore};
use crate::application::services::{CompletionCallback, IngestionService};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub ingestion_service: Arc<IngestionService>,
    pub job_store: Arc<dyn JobStore>,
    pub completion: CompletionCallback,
    pub staging_store: Arc<dyn StagingStore>,
    pub settings: Settings,
}
