use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::warn;

use crate::repository::document_store::DocumentStore;

pub async fn root_handler() -> impl IntoResponse {
    Json(json!({ "message": "Dental practice careers API is running" }))
}

// Handler: liveness plus a store round-trip
pub async fn health_handler(State(store): State<Arc<dyn DocumentStore>>) -> impl IntoResponse {
    match store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok", "database": "connected" }))),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unavailable" })),
            )
        }
    }
}

// Handler: database diagnostics, never exposes the connection string
pub async fn database_status_handler(State(store): State<Arc<dyn DocumentStore>>) -> impl IntoResponse {
    match store.status().await {
        Ok(status) => (
            StatusCode::OK,
            Json(json!({
                "backend": "running",
                "connection_status": "connected",
                "database_name": status.database_name,
                "collections": status.collections,
            })),
        ),
        Err(e) => {
            warn!("Database status check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "backend": "running",
                    "connection_status": "not connected",
                    "database_name": null,
                    "collections": [],
                })),
            )
        }
    }
}
