use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::application::ports::{JobProcessor, JobStore};
use crate::application::services::CompletionCallback;
use crate::domain::{JobId, JobOutcome};

/// Runs a single job: mark processing, process under a timeout, report.
///
/// Every path out of [`JobRunner::run`] for a known, non-terminal job ends in
/// a completion report. Processor errors, timeouts and panics become `failed`.
#[derive(Clone)]
pub struct JobRunner {
    job_store: Arc<dyn JobStore>,
    processor: Arc<dyn JobProcessor>,
    completion: CompletionCallback,
    processing_timeout: Duration,
}

impl JobRunner {
    pub fn new(
        job_store: Arc<dyn JobStore>,
        processor: Arc<dyn JobProcessor>,
        completion: CompletionCallback,
        processing_timeout: Duration,
    ) -> Self {
        Self {
            job_store,
            processor,
            completion,
            processing_timeout,
        }
    }

    pub async fn run(&self, job_id: JobId) {
        let span = tracing::info_span!("job", job_id = %job_id);
        self.run_inner(job_id).instrument(span).await
    }

    async fn run_inner(&self, job_id: JobId) {
        let job = match self.job_store.mark_processing(job_id).await {
            Ok(job) => job,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping job that cannot start processing");
                return;
            }
        };
        tracing::debug!(status = %job.status, "Job status transition");

        let processor = Arc::clone(&self.processor);
        let mut handle = tokio::spawn(async move { processor.process(&job).await });

        let outcome = match tokio::time::timeout(self.processing_timeout, &mut handle).await {
            Ok(Ok(Ok(result))) => JobOutcome::completed(result),
            Ok(Ok(Err(e))) => {
                tracing::error!(error = %e, "Job processing failed");
                JobOutcome::failed(e.to_string())
            }
            Ok(Err(join_error)) => {
                tracing::error!(error = %join_error, "Job processor panicked");
                JobOutcome::failed("processing aborted unexpectedly")
            }
            Err(_) => {
                handle.abort();
                tracing::error!(timeout = ?self.processing_timeout, "Job processing timed out");
                JobOutcome::failed(format!(
                    "processing timed out after {:?}",
                    self.processing_timeout
                ))
            }
        };

        if !self.completion.report_outcome(job_id, outcome).await {
            tracing::warn!("Job outcome was not applied");
        }
    }
}

/// Drains the job channel, running up to `concurrency` jobs at once.
pub struct JobWorker {
    receiver: mpsc::Receiver<JobId>,
    runner: JobRunner,
    permits: Arc<Semaphore>,
}

impl JobWorker {
    pub fn new(receiver: mpsc::Receiver<JobId>, runner: JobRunner, concurrency: usize) -> Self {
        Self {
            receiver,
            runner,
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            concurrency = self.permits.available_permits(),
            "Job worker started"
        );
        let mut in_flight = JoinSet::new();

        while let Some(job_id) = self.receiver.recv().await {
            let Ok(permit) = Arc::clone(&self.permits).acquire_owned().await else {
                break;
            };
            let runner = self.runner.clone();
            in_flight.spawn(async move {
                let _permit = permit;
                runner.run(job_id).await;
            });

            while let Some(finished) = in_flight.try_join_next() {
                if let Err(e) = finished {
                    tracing::error!(error = %e, "Job task ended abnormally");
                }
            }
        }

        while let Some(finished) = in_flight.join_next().await {
            if let Err(e) = finished {
                tracing::error!(error = %e, "Job task ended abnormally");
            }
        }
        tracing::info!("Job worker stopped: channel closed");
    }
}
