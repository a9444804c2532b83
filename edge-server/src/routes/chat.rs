//! `POST /api/chat`: one chat exchange through the relay.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chat_relay::{ChatOutcome, ChatRequest, EMPTY_MESSAGE_REPLY};
use edge_core::{EdgeError, UserContext};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::AppState;
use crate::auth::credentials_from_headers;

pub const INTERNAL_ERROR_REPLY: &str =
    "Something went wrong. Please try again or contact hello@edge-ai.space.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBody {
    #[serde(default)]
    pub message: String,
    pub session_id: Option<String>,
    pub site: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(rename = "_debug", skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub session_key: String,
    pub history_length: usize,
    pub user_context: UserContext,
}

impl ChatResponse {
    fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: text.into(),
            debug: None,
        }
    }

    fn from_outcome(outcome: ChatOutcome, expose_debug: bool) -> Self {
        let debug = match (expose_debug, outcome.user_context) {
            (true, Some(user_context)) => Some(DebugInfo {
                session_key: outcome.session_key,
                history_length: outcome.history_len,
                user_context,
            }),
            _ => None,
        };
        Self {
            reply: outcome.reply,
            debug,
        }
    }
}

/// Every response carries `reply`: 200 for answers and fallbacks, 400 for an empty or
/// unreadable message, 500 otherwise.
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            info!(error = %rejection, "step: chat body rejected");
            return (StatusCode::BAD_REQUEST, Json(ChatResponse::reply(EMPTY_MESSAGE_REPLY)))
                .into_response();
        }
    };

    let request = ChatRequest {
        message: body.message,
        session_key: body.session_id,
        site: body.site,
        credentials: credentials_from_headers(&headers),
    };

    match state.relay.handle(request).await {
        Ok(outcome) => {
            Json(ChatResponse::from_outcome(outcome, state.expose_debug)).into_response()
        }
        Err(EdgeError::InvalidInput(reply)) => {
            (StatusCode::BAD_REQUEST, Json(ChatResponse::reply(reply))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Chat relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatResponse::reply(INTERNAL_ERROR_REPLY)),
            )
                .into_response()
        }
    }
}
