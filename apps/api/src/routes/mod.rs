pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export_handlers;
use crate::jobs::handlers as job_handlers;
use crate::ranking::handlers as ranking_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs API
        .route(
            "/api/v1/jobs",
            post(job_handlers::handle_create_job).get(job_handlers::handle_list_jobs),
        )
        .route(
            "/api/v1/jobs/:id",
            get(job_handlers::handle_get_job).delete(job_handlers::handle_delete_job),
        )
        // Ranking API
        .route(
            "/api/v1/rankings",
            post(ranking_handlers::handle_rank).get(ranking_handlers::handle_list),
        )
        .route("/api/v1/rankings/save", post(ranking_handlers::handle_save))
        .route(
            "/api/v1/rankings/:id",
            get(ranking_handlers::handle_get).delete(ranking_handlers::handle_delete),
        )
        // Export API
        .route(
            "/api/v1/rankings/:id/export/csv",
            get(export_handlers::handle_export_csv),
        )
        .route(
            "/api/v1/rankings/:id/export/pdf",
            get(export_handlers::handle_export_pdf),
        )
        .with_state(state)
}
