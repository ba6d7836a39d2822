pub mod catalog;
pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};

use crate::history::handlers as history;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Room for a full batch of resumes plus multipart overhead.
    let upload_limit = state.config.max_file_size_bytes() as usize
        * state.config.max_files_per_request
        + 1024 * 1024;

    Router::new()
        .route("/health", get(health::health_handler))
        // Job submission
        .route(
            "/api/v1/jobs",
            post(jobs::handle_submit_job).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Persisted rankings
        .route(
            "/api/v1/rankings",
            post(history::handle_save_ranking).get(history::handle_list_rankings),
        )
        .route("/api/v1/rankings/:id", get(history::handle_get_ranking))
        .route(
            "/api/v1/rankings/:id/export",
            get(history::handle_export_ranking),
        )
        // Catalog
        .route("/api/v1/algorithms", get(catalog::list_algorithms))
        .route("/api/v1/positions", get(catalog::list_positions))
        .route("/api/v1/formats", get(catalog::supported_formats))
        .with_state(state)
}
