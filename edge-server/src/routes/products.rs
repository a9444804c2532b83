use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use tracing::error;

use super::{error_response, AppState};

/// `GET /api/products`: active products by name, for the public catalog.
pub async fn list_active(State(state): State<AppState>) -> Response {
    match state.accounts.list_active_products().await {
        Ok(products) => Json(products).into_response(),
        Err(e) => {
            error!(error = %e, "Error fetching products");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
