//! `/api/admin/*`: listings and product toggling for site administrators.
//!
//! Every handler first requires a valid session (401) whose user passes
//! [`chat_relay::policy::is_site_admin`] (403).

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chat_relay::{policy, UserIdentity};
use edge_core::Role;
use serde::{Deserialize, Serialize};
use storage::{StorageError, UserRecord};
use tracing::{error, info, warn};

use super::{error_response, AppState};
use crate::auth::credentials_from_headers;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[serde(flatten)]
    pub user: UserRecord,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductBody {
    pub product_id: Option<String>,
    pub active: Option<bool>,
}

async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<UserIdentity, Response> {
    let credentials = credentials_from_headers(headers);
    let user = match state.sessions.get_session(&credentials).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(error_response(StatusCode::UNAUTHORIZED, "Unauthorized")),
        Err(e) => {
            error!(error = %e, "Session lookup failed");
            return Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ));
        }
    };
    if !policy::is_site_admin(&user.id, &user.email) {
        warn!(user_id = %user.id, "Non-admin tried an admin endpoint");
        return Err(error_response(StatusCode::FORBIDDEN, "Forbidden"));
    }
    Ok(user)
}

fn listing<T: Serialize>(what: &str, result: Result<T, StorageError>) -> Response {
    match result {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => {
            error!(error = %e, "Error fetching {}", what);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

/// `GET /api/admin/users`: newest first, each with its site role.
pub async fn list_users(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(resp) = require_admin(&state, &headers).await {
        return resp;
    }
    let users = state.accounts.list_users().await.map(|users| {
        users
            .into_iter()
            .map(|user| AdminUser {
                role: policy::site_role(&user.id, &user.email),
                user,
            })
            .collect::<Vec<_>>()
    });
    listing("users", users)
}

pub async fn list_organizations(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(resp) = require_admin(&state, &headers).await {
        return resp;
    }
    listing("organizations", state.accounts.list_organizations().await)
}

pub async fn list_products(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(resp) = require_admin(&state, &headers).await {
        return resp;
    }
    listing("products", state.accounts.list_products().await)
}

pub async fn list_subscriptions(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(resp) = require_admin(&state, &headers).await {
        return resp;
    }
    listing("subscriptions", state.accounts.list_subscriptions().await)
}

/// `PATCH /api/admin/products` with `{ productId, active }`.
pub async fn update_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<UpdateProductBody>, JsonRejection>,
) -> Response {
    let admin = match require_admin(&state, &headers).await {
        Ok(user) => user,
        Err(resp) => return resp,
    };
    let (product_id, active) = match body {
        Ok(Json(UpdateProductBody {
            product_id: Some(id),
            active: Some(active),
        })) if !id.trim().is_empty() => (id, active),
        _ => return error_response(StatusCode::BAD_REQUEST, "Invalid request data"),
    };

    match state.accounts.set_product_active(&product_id, active).await {
        Ok(updated) => {
            if !updated {
                warn!(product_id = %product_id, "No product matched the update");
            }
            info!(admin_id = %admin.id, product_id = %product_id, active, "Product status changed");
            Json(serde_json::json!({ "success": true })).into_response()
        }
        Err(e) => {
            error!(error = %e, "Error updating product");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
