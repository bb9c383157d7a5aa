mod error_response;
mod files;
mod health;
mod jobs;
mod uploads;

pub use error_response::ErrorResponse;
pub use files::{delete_files_handler, list_files_handler};
pub use health::health_handler;
pub use jobs::{complete_job_handler, get_job_handler, list_jobs_handler};
pub use uploads::upload_handler;
