use std::io;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use serde::Serialize;

use crate::application::ports::QueueError;
use crate::application::services::IngestionError;
use crate::infrastructure::observability::sanitize_file_name;
use crate::presentation::handlers::error_response::error_response;
use crate::presentation::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub job_id: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Upload request is not multipart");
            return error_response(StatusCode::BAD_REQUEST, "file is required");
        }
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => {
                tracing::warn!("Upload request without a file part");
                return error_response(StatusCode::BAD_REQUEST, "file is required");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                );
            }
        };

        // A part without a filename is a plain form value, not a file.
        let original_name = match (field.name(), field.file_name()) {
            (Some(FILE_FIELD), Some(name)) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        tracing::debug!(original_name = %sanitize_file_name(&original_name), "Receiving upload");

        let stream = field
            .map(|chunk| chunk.map_err(|e| io::Error::other(e.to_string())))
            .boxed();

        return match state.ingestion_service.ingest(original_name, stream).await {
            Ok(job_id) => (
                StatusCode::CREATED,
                Json(UploadResponse {
                    job_id: job_id.to_string(),
                }),
            )
                .into_response(),
            Err(e) => ingestion_error_response(e),
        };
    }
}

fn ingestion_error_response(error: IngestionError) -> Response {
    tracing::error!(error = %error, "Upload rejected");
    match error {
        IngestionError::Storage(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store upload")
        }
        IngestionError::Registration(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create job")
        }
        IngestionError::Queue(QueueError::Full) => {
            error_response(StatusCode::SERVICE_UNAVAILABLE, "Job queue is full")
        }
        IngestionError::Queue(QueueError::Unavailable(_)) => {
            error_response(StatusCode::SERVICE_UNAVAILABLE, "Job queue unavailable")
        }
    }
}
