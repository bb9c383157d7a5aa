use std::io;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream;
use serde_json::{Value, json};

use pdf_analyzer::application::ports::{JobProcessor, JobQueue, JobStore, StagingStore};
use pdf_analyzer::application::services::{CompletionCallback, JobRunner, JobWorker};
use pdf_analyzer::domain::{JobId, JobOutcome, JobStatus, StoragePath};
use pdf_analyzer::infrastructure::persistence::InMemoryJobStore;
use pdf_analyzer::infrastructure::processing::{MockJobProcessor, SimulatedPdfProcessor};
use pdf_analyzer::infrastructure::queue::ChannelJobQueue;
use pdf_analyzer::infrastructure::storage::MockStagingStore;

fn runner_with(
    processor: Arc<dyn JobProcessor>,
    timeout: Duration,
) -> (Arc<InMemoryJobStore>, JobRunner) {
    let store = Arc::new(InMemoryJobStore::new());
    let dyn_store: Arc<dyn JobStore> = store.clone();
    let runner = JobRunner::new(
        Arc::clone(&dyn_store),
        processor,
        CompletionCallback::new(dyn_store),
        timeout,
    );
    (store, runner)
}

fn runner(processor: MockJobProcessor) -> (Arc<InMemoryJobStore>, JobRunner) {
    runner_with(Arc::new(processor), Duration::from_secs(5))
}

async fn queued_job(store: &InMemoryJobStore) -> JobId {
    store
        .create(StoragePath::from_raw("job.pdf"), "job.pdf".to_string())
        .await
        .unwrap()
}

#[tokio::test]
async fn given_succeeding_processor_when_running_then_job_completes_with_result() {
    let (store, runner) = runner(MockJobProcessor::Succeed(json!({"pages": 3})));
    let id = queued_job(&store).await;

    runner.run(id).await;

    let job = store.get(id).await.unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.result, Some(json!({"pages": 3})));
    assert!(job.error.is_none());
}

#[tokio::test]
async fn given_failing_processor_when_running_then_job_fails_with_message() {
    let (store, runner) = runner(MockJobProcessor::Fail("corrupt xref table".to_string()));
    let id = queued_job(&store).await;

    runner.run(id).await;

    let job = store.get(id).await.unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.error.unwrap().contains("corrupt xref table"));
    assert!(job.result.is_none());
}

#[tokio::test]
async fn given_panicking_processor_when_running_then_job_fails() {
    let (store, runner) = runner(MockJobProcessor::Panic);
    let id = queued_job(&store).await;

    runner.run(id).await;

    let job = store.get(id).await.unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.error.as_deref(), Some("processing aborted unexpectedly"));
}

#[tokio::test]
async fn given_hanging_processor_when_timeout_elapses_then_job_fails() {
    let (store, runner) = runner_with(
        Arc::new(MockJobProcessor::Hang),
        Duration::from_millis(50),
    );
    let id = queued_job(&store).await;

    runner.run(id).await;

    let job = store.get(id).await.unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.error.unwrap().starts_with("processing timed out"));
}

#[tokio::test]
async fn given_unknown_job_when_running_then_nothing_is_created() {
    let (store, runner) = runner(MockJobProcessor::Succeed(Value::Null));

    runner.run(JobId::new()).await;

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn given_already_terminal_job_when_running_then_outcome_is_left_untouched() {
    let (store, runner) = runner(MockJobProcessor::Succeed(json!({"pages": 99})));
    let id = queued_job(&store).await;
    store.complete(id, JobOutcome::failed("cancelled")).await;
    let before = store.get(id).await.unwrap();

    runner.run(id).await;

    assert_eq!(store.get(id).await.unwrap(), before);
}

#[tokio::test]
async fn given_simulated_processor_when_artifact_is_staged_then_reports_size() {
    let staging = Arc::new(MockStagingStore::new());
    let processor = SimulatedPdfProcessor::new(
        staging.clone() as Arc<dyn StagingStore>,
        Duration::from_millis(1),
    );
    let (store, runner) = runner_with(Arc::new(processor), Duration::from_secs(5));
    let id = queued_job(&store).await;
    let path = store.get(id).await.unwrap().file_path;
    staging
        .store(
            &path,
            stream::iter(vec![Ok::<_, io::Error>(Bytes::from_static(b"12345"))]).boxed(),
        )
        .await
        .unwrap();

    runner.run(id).await;

    let job = store.get(id).await.unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(
        job.result,
        Some(json!({"success": true, "jobId": id.to_string(), "sizeBytes": 5}))
    );
}

#[tokio::test]
async fn given_simulated_processor_when_artifact_is_missing_then_job_fails() {
    let processor = SimulatedPdfProcessor::new(
        Arc::new(MockStagingStore::new()),
        Duration::from_millis(1),
    );
    let (store, runner) = runner_with(Arc::new(processor), Duration::from_secs(5));
    let id = queued_job(&store).await;

    runner.run(id).await;

    assert_eq!(store.get(id).await.unwrap().status, JobStatus::Failed);
}

#[tokio::test]
async fn given_worker_draining_channel_when_jobs_are_enqueued_then_all_reach_terminal_state() {
    let (store, runner) = runner(MockJobProcessor::Succeed(json!({"ok": true})));
    let (queue, receiver) = ChannelJobQueue::new(8);
    let worker = tokio::spawn(JobWorker::new(receiver, runner, 2).run());

    let mut ids = Vec::new();
    for _ in 0..5 {
        let id = queued_job(&store).await;
        queue.enqueue(id).await.unwrap();
        ids.push(id);
    }
    drop(queue);

    tokio::time::timeout(Duration::from_secs(5), worker)
        .await
        .expect("worker should stop once the queue is dropped")
        .unwrap();

    for id in ids {
        assert_eq!(store.get(id).await.unwrap().status, JobStatus::Completed);
    }
}
