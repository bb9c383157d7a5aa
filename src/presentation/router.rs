use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    complete_job_handler, delete_files_handler, get_job_handler, health_handler,
    list_files_handler, list_jobs_handler, upload_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.settings.storage.max_upload_size_bytes);

    let mut router = Router::new()
        .route("/v1/health", get(health_handler))
        .route("/v1/uploads", post(upload_handler).layer(body_limit))
        .route("/v1/jobs", get(list_jobs_handler))
        .route("/v1/jobs/{id}", get(get_job_handler))
        .route(
            "/v1/files",
            get(list_files_handler).delete(delete_files_handler),
        );

    if state.settings.queue.expose_completion_endpoint {
        router = router.route("/v1/jobs/{id}/complete", post(complete_job_handler));
    } else {
        tracing::info!("Completion endpoint disabled");
    }

    router
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
