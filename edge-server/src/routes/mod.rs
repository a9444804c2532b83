//! HTTP routes and the shared application state.

mod admin;
mod chat;
mod health;
mod products;

use std::any::Any;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chat_relay::{ChatRelay, SessionStore};
use storage::AccountRepository;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use chat::{ChatBody, ChatResponse, DebugInfo, INTERNAL_ERROR_REPLY};

#[derive(Clone)]
pub struct AppState {
    pub relay: ChatRelay,
    pub sessions: Arc<dyn SessionStore>,
    pub accounts: AccountRepository,
    /// Adds `_debug` to chat replies of signed-in users (development only).
    pub expose_debug: bool,
}

/// Builds the router. Only `allowed_origins` may call the API from a browser, with credentials.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Result<Router> {
    if allowed_origins.iter().any(|o| o == "*") {
        anyhow::bail!("wildcard CORS origin cannot be combined with credentials");
    }
    let origins = allowed_origins
        .iter()
        .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin: {}", o)))
        .collect::<Result<Vec<_>>>()?;
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    Ok(Router::new()
        .route("/api/chat", post(chat::chat))
        .route("/api/products", get(products::list_active))
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/organizations", get(admin::list_organizations))
        .route(
            "/api/admin/products",
            get(admin::list_products).patch(admin::update_product),
        )
        .route("/api/admin/subscriptions", get(admin::list_subscriptions))
        .route("/health", get(health::health))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// A panicking handler still answers in the chat contract's shape.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "reply": INTERNAL_ERROR_REPLY })),
    )
        .into_response()
}

/// `{ "error": message }` with the given status.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
