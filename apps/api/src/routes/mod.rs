pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::companies::handlers as companies;
use crate::interview::handlers as interview;
use crate::resumes::handlers as resumes;
use crate::resumes::import::MAX_UPLOAD_BYTES;
use crate::state::AppState;

/// Headroom for multipart framing around the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Company registry
        .route("/api/v1/companies", get(companies::handle_list_companies))
        .route("/api/v1/companies/:slug", get(companies::handle_get_company))
        // Resume API
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/import",
            post(resumes::handle_import_resume)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/export",
            get(resumes::handle_export_resume),
        )
        // Interview API
        .route(
            "/api/v1/interviews/register-call",
            post(interview::handle_register_call),
        )
        .with_state(state)
}
