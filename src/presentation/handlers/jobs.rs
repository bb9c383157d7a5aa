use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::JobStoreError;
use crate::domain::{Job, JobId, JobOutcome, JobStatus, JobSummary};
use crate::presentation::handlers::error_response::{error_response, not_found};
use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: String,
    pub status: JobStatus,
    pub file_path: String,
    pub original_name: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id.to_string(),
            status: job.status,
            file_path: job.file_path.to_string(),
            original_name: job.original_name,
            created_at: timestamp(job.created_at),
            updated_at: timestamp(job.updated_at),
            result: job.result,
            error: job.error,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummaryResponse {
    pub id: String,
    pub status: JobStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<JobSummary> for JobSummaryResponse {
    fn from(summary: JobSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            status: summary.status,
            created_at: timestamp(summary.created_at),
            updated_at: timestamp(summary.updated_at),
        }
    }
}

#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobSummaryResponse>,
}

#[derive(Deserialize)]
pub struct CompleteJobRequest {
    pub status: String,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct CompleteJobResponse {
    pub ok: bool,
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn list_jobs_handler(State(state): State<AppState>) -> impl IntoResponse {
    let jobs = state
        .job_store
        .list()
        .await
        .into_iter()
        .map(JobSummaryResponse::from)
        .collect();

    (StatusCode::OK, Json(JobListResponse { jobs }))
}

#[tracing::instrument(skip(state))]
pub async fn get_job_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let Ok(id) = job_id.parse::<JobId>() else {
        return not_found();
    };

    match state.job_store.get(id).await {
        Some(job) => (StatusCode::OK, Json(JobResponse::from(job))).into_response(),
        None => not_found(),
    }
}

#[tracing::instrument(skip(state, body))]
pub async fn complete_job_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    body: Result<Json<CompleteJobRequest>, JsonRejection>,
) -> Response {
    let Ok(id) = job_id.parse::<JobId>() else {
        return not_found();
    };

    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let outcome = request
        .status
        .parse::<JobStatus>()
        .ok()
        .and_then(|status| JobOutcome::from_parts(status, request.result, request.error));
    let Some(outcome) = outcome else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "status must be \"completed\" or \"failed\"",
        );
    };

    match state.completion.report(id, outcome).await {
        Ok(_) => (StatusCode::OK, Json(CompleteJobResponse { ok: true })).into_response(),
        Err(JobStoreError::NotFound(_)) => not_found(),
        Err(JobStoreError::InvalidTransition { from, .. }) => error_response(
            StatusCode::CONFLICT,
            format!("job already {}", from),
        ),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
