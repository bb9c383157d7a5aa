use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::SecondsFormat;
use serde::Serialize;

use crate::domain::StoragePath;
use crate::presentation::handlers::error_response::error_response;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub mtime: String,
}

#[derive(Serialize)]
pub struct FileListResponse {
    pub files: Vec<FileEntry>,
}

#[derive(Serialize)]
pub struct DeleteFilesResponse {
    pub deleted: usize,
}

pub async fn list_files_handler(State(state): State<AppState>) -> Response {
    match state.staging_store.list().await {
        Ok(objects) => {
            let files = objects
                .into_iter()
                .map(|object| FileEntry {
                    name: object.name,
                    size: object.size,
                    mtime: object
                        .last_modified
                        .to_rfc3339_opts(SecondsFormat::Millis, true),
                })
                .collect();
            (StatusCode::OK, Json(FileListResponse { files })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list uploads");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list files")
        }
    }
}

/// Removes every staged upload. Job records are left untouched.
#[tracing::instrument(skip(state))]
pub async fn delete_files_handler(State(state): State<AppState>) -> Response {
    let objects = match state.staging_store.list().await {
        Ok(objects) => objects,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list uploads");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list files");
        }
    };

    let mut deleted = 0;
    for object in objects {
        let path = StoragePath::from_raw(object.name);
        match state.staging_store.delete(&path).await {
            Ok(()) => deleted += 1,
            Err(e) => tracing::warn!(error = %e, path = %path, "Failed to delete upload"),
        }
    }

    tracing::info!(deleted, "Uploads deleted");
    (StatusCode::OK, Json(DeleteFilesResponse { deleted })).into_response()
}
