use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use pdf_analyzer::application::ports::{JobStore, StagingStore};
use pdf_analyzer::application::services::{
    CompletionCallback, IngestionService, JobRunner, JobWorker,
};
use pdf_analyzer::infrastructure::observability::{TracingConfig, init_tracing};
use pdf_analyzer::infrastructure::persistence::InMemoryJobStore;
use pdf_analyzer::infrastructure::processing::SimulatedPdfProcessor;
use pdf_analyzer::infrastructure::queue::ChannelJobQueue;
use pdf_analyzer::infrastructure::storage::LocalStagingStore;
use pdf_analyzer::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(environment, &settings.logging));

    let uploads_dir = settings.storage.uploads_dir();
    let staging_store: Arc<dyn StagingStore> = Arc::new(
        LocalStagingStore::new(uploads_dir.clone()).context("Failed to prepare upload directory")?,
    );
    tracing::info!(path = %uploads_dir.display(), "Upload directory ready");

    let job_store: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());
    let completion = CompletionCallback::new(Arc::clone(&job_store));

    let (job_queue, receiver) = ChannelJobQueue::new(settings.queue.capacity);
    let processor = Arc::new(SimulatedPdfProcessor::new(
        Arc::clone(&staging_store),
        settings.queue.processing_delay(),
    ));
    let runner = JobRunner::new(
        Arc::clone(&job_store),
        processor,
        completion.clone(),
        settings.queue.processing_timeout(),
    );
    let worker = JobWorker::new(receiver, runner, settings.queue.concurrency);
    let worker_handle = tokio::spawn(worker.run());

    let ingestion_service = Arc::new(IngestionService::new(
        Arc::clone(&job_store),
        Arc::clone(&staging_store),
        Arc::new(job_queue),
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        ingestion_service,
        job_store,
        completion,
        staging_store,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last queue sender; the worker drains and exits.
    if let Err(e) = worker_handle.await {
        tracing::error!(error = %e, "Job worker terminated abnormally");
    }
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
