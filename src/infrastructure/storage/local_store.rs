use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::TryStreamExt;
use futures::stream::BoxStream;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{StagingStore, StagingStoreError, StoredObject};
use crate::domain::StoragePath;

/// Upload directory on the local file system. Files are written once.
pub struct LocalStagingStore {
    fs: LocalFileSystem,
    root: PathBuf,
}

impl LocalStagingStore {
    pub fn new(root: PathBuf) -> Result<Self, StagingStoreError> {
        std::fs::create_dir_all(&root)?;
        let fs = LocalFileSystem::new_with_prefix(&root)
            .map_err(|e| StagingStoreError::Backend(e.to_string()))?;
        Ok(Self { fs, root })
    }

    pub fn base_path(&self) -> &Path {
        &self.root
    }
}

fn location(path: &StoragePath) -> ObjectPath {
    ObjectPath::from(path.as_str())
}

fn lookup_error(path: &StoragePath, error: object_store::Error) -> StagingStoreError {
    match error {
        object_store::Error::NotFound { .. } => StagingStoreError::NotFound(path.to_string()),
        other => StagingStoreError::Backend(other.to_string()),
    }
}

#[async_trait::async_trait]
impl StagingStore for LocalStagingStore {
    async fn store(
        &self,
        path: &StoragePath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, StagingStoreError> {
        let mut upload = self
            .fs
            .put_multipart(&location(path))
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

        let mut written: u64 = 0;
        loop {
            let chunk = match stream.try_next().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(StagingStoreError::Io(e));
                }
            };
            written += chunk.len() as u64;
            if let Err(e) = upload.put_part(PutPayload::from(chunk)).await {
                let _ = upload.abort().await;
                return Err(StagingStoreError::UploadFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;
        tracing::debug!(path = %path, bytes = written, "Upload written to disk");

        Ok(written)
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), StagingStoreError> {
        self.fs
            .delete(&location(path))
            .await
            .map_err(|e| StagingStoreError::DeleteFailed(format!("{path}: {e}")))
    }

    async fn head(&self, path: &StoragePath) -> Result<u64, StagingStoreError> {
        let meta = self
            .fs
            .head(&location(path))
            .await
            .map_err(|e| lookup_error(path, e))?;
        Ok(meta.size as u64)
    }

    async fn list(&self) -> Result<Vec<StoredObject>, StagingStoreError> {
        let mut objects: Vec<StoredObject> = self
            .fs
            .list(None)
            .map_ok(|meta| StoredObject {
                name: meta.location.to_string(),
                size: meta.size as u64,
                last_modified: meta.last_modified,
            })
            .try_collect()
            .await
            .map_err(|e| StagingStoreError::ListFailed(e.to_string()))?;
        objects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(objects)
    }
}
