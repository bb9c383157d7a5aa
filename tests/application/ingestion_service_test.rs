use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::{self, BoxStream};

use pdf_analyzer::application::ports::{JobQueue, JobStore, QueueError, StagingStore};
use pdf_analyzer::application::services::{IngestionError, IngestionService};
use pdf_analyzer::domain::{JobStatus, StoragePath};
use pdf_analyzer::infrastructure::persistence::InMemoryJobStore;
use pdf_analyzer::infrastructure::queue::{ChannelJobQueue, MockJobQueue};
use pdf_analyzer::infrastructure::storage::MockStagingStore;

fn body(chunks: &[&'static [u8]]) -> BoxStream<'static, Result<Bytes, io::Error>> {
    stream::iter(
        chunks
            .iter()
            .copied()
            .map(|chunk| Ok::<_, io::Error>(Bytes::from_static(chunk)))
            .collect::<Vec<_>>(),
    )
    .boxed()
}

struct Fixture {
    job_store: Arc<InMemoryJobStore>,
    staging_store: Arc<MockStagingStore>,
    service: IngestionService,
}

fn fixture(staging_store: MockStagingStore, job_queue: Arc<dyn JobQueue>) -> Fixture {
    let job_store = Arc::new(InMemoryJobStore::new());
    let staging_store = Arc::new(staging_store);
    let service = IngestionService::new(
        job_store.clone() as Arc<dyn JobStore>,
        staging_store.clone() as Arc<dyn StagingStore>,
        job_queue,
    );
    Fixture {
        job_store,
        staging_store,
        service,
    }
}

#[tokio::test]
async fn given_upload_when_ingesting_then_file_is_staged_job_is_queued_and_enqueued() {
    let queue = Arc::new(MockJobQueue::new());
    let fx = fixture(MockStagingStore::new(), queue.clone());

    let id = fx
        .service
        .ingest("scan.pdf".to_string(), body(&[b"%PDF-", b"1.7"]))
        .await
        .unwrap();

    let job = fx.job_store.get(id).await.unwrap();
    assert_eq!(job.status, JobStatus::Queued);
    assert_eq!(job.original_name, "scan.pdf");
    assert_eq!(job.file_path, StoragePath::new(&id, "scan.pdf"));
    assert_eq!(
        fx.staging_store.contents(&job.file_path).await,
        Some(b"%PDF-1.7".to_vec())
    );
    assert_eq!(queue.enqueued(), vec![id]);
}

#[tokio::test]
async fn given_name_without_extension_when_ingesting_then_artifact_uses_pdf_extension() {
    let fx = fixture(MockStagingStore::new(), Arc::new(MockJobQueue::new()));

    let id = fx
        .service
        .ingest("README".to_string(), body(&[b"data"]))
        .await
        .unwrap();

    let job = fx.job_store.get(id).await.unwrap();
    assert_eq!(job.file_path.as_str(), format!("{id}.pdf"));
    assert!(fx.staging_store.contains(&job.file_path).await);
}

#[tokio::test]
async fn given_storage_failure_when_ingesting_then_no_job_is_created_or_enqueued() {
    let queue = Arc::new(MockJobQueue::new());
    let fx = fixture(MockStagingStore::failing(), queue.clone());

    let result = fx
        .service
        .ingest("scan.pdf".to_string(), body(&[b"data"]))
        .await;

    assert!(matches!(result, Err(IngestionError::Storage(_))));
    assert!(fx.job_store.is_empty().await);
    assert!(queue.enqueued().is_empty());
}

#[tokio::test]
async fn given_broken_stream_when_ingesting_then_no_job_is_created() {
    let fx = fixture(MockStagingStore::new(), Arc::new(MockJobQueue::new()));
    let broken = stream::iter(vec![
        Ok::<_, io::Error>(Bytes::from_static(b"partial")),
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "client went away")),
    ])
    .boxed();

    let result = fx.service.ingest("scan.pdf".to_string(), broken).await;

    assert!(matches!(result, Err(IngestionError::Storage(_))));
    assert!(fx.job_store.is_empty().await);
}

#[tokio::test]
async fn given_unavailable_queue_when_ingesting_then_job_and_artifact_are_rolled_back() {
    let fx = fixture(MockStagingStore::new(), Arc::new(MockJobQueue::unavailable()));

    let result = fx
        .service
        .ingest("scan.pdf".to_string(), body(&[b"data"]))
        .await;

    assert!(matches!(
        result,
        Err(IngestionError::Queue(QueueError::Unavailable(_)))
    ));
    assert!(fx.job_store.is_empty().await);
    assert!(fx.job_store.list().await.is_empty());
    assert_eq!(fx.staging_store.object_count().await, 0);
}

#[tokio::test]
async fn given_full_channel_when_ingesting_then_reports_queue_full_and_keeps_earlier_job() {
    let (queue, _receiver) = ChannelJobQueue::new(1);
    let fx = fixture(MockStagingStore::new(), Arc::new(queue));

    let first = fx
        .service
        .ingest("a.pdf".to_string(), body(&[b"a"]))
        .await
        .unwrap();
    let second = fx.service.ingest("b.pdf".to_string(), body(&[b"b"])).await;

    assert!(matches!(second, Err(IngestionError::Queue(QueueError::Full))));
    let listed = fx.job_store.list().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, first);
    assert_eq!(fx.staging_store.object_count().await, 1);
}
