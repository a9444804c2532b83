use axum::{response::IntoResponse, Json};

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "service": "edge-server" }))
}
