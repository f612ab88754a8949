use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handler::health_handler::{database_status_handler, health_handler, root_handler};
use crate::repository::document_store::DocumentStore;

pub fn health_router(store: Arc<dyn DocumentStore>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/health/database", get(database_status_handler))
        .with_state(store)
}
