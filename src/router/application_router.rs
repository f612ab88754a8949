use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::handler::application_handler::{submit_express_handler, submit_standard_handler};
use crate::service::application_service::ApplicationServiceImpl;

pub fn application_router(service: Arc<ApplicationServiceImpl>, max_body_bytes: usize) -> Router {
    // Public routes
    Router::new()
        .route("/api/applications/express", post(submit_express_handler))
        .route("/api/applications/standard", post(submit_standard_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(service)
}
