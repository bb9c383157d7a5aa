use std::collections::HashMap;
use std::io;

use bytes::Bytes;
use chrono::Utc;
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::sync::Mutex;

use crate::application::ports::{StagingStore, StagingStoreError, StoredObject};
use crate::domain::StoragePath;

/// Keeps uploads in memory. [`MockStagingStore::failing`] rejects every write.
#[derive(Default)]
pub struct MockStagingStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail_writes: bool,
}

impl MockStagingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            fail_writes: true,
        }
    }

    pub async fn contains(&self, path: &StoragePath) -> bool {
        self.objects.lock().await.contains_key(path.as_str())
    }

    pub async fn contents(&self, path: &StoragePath) -> Option<Vec<u8>> {
        self.objects.lock().await.get(path.as_str()).cloned()
    }

    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }
}

#[async_trait::async_trait]
impl StagingStore for MockStagingStore {
    async fn store(
        &self,
        path: &StoragePath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, StagingStoreError> {
        if self.fail_writes {
            return Err(StagingStoreError::UploadFailed("disk full".to_string()));
        }
        let mut data = Vec::new();
        while let Some(chunk) = stream.next().await {
            data.extend_from_slice(&chunk?);
        }
        let size = data.len() as u64;
        self.objects
            .lock()
            .await
            .insert(path.as_str().to_string(), data);
        Ok(size)
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), StagingStoreError> {
        self.objects
            .lock()
            .await
            .remove(path.as_str())
            .map(|_| ())
            .ok_or_else(|| StagingStoreError::DeleteFailed(path.to_string()))
    }

    async fn head(&self, path: &StoragePath) -> Result<u64, StagingStoreError> {
        self.objects
            .lock()
            .await
            .get(path.as_str())
            .map(|data| data.len() as u64)
            .ok_or_else(|| StagingStoreError::NotFound(path.to_string()))
    }

    async fn list(&self) -> Result<Vec<StoredObject>, StagingStoreError> {
        let now = Utc::now();
        let mut objects: Vec<StoredObject> = self
            .objects
            .lock()
            .await
            .iter()
            .map(|(name, data)| StoredObject {
                name: name.clone(),
                size: data.len() as u64,
                last_modified: now,
            })
            .collect();
        objects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(objects)
    }
}
