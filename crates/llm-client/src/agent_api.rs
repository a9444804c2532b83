//! LlmClient backed by a remote agent service.
//!
//! The agent owns its own system prompt and memory, so only the new message, the tenant (site)
//! and the session key travel over the wire: `POST {base}/api/chat` with
//! `{ "tenant", "message", "sessionId" }`, answered by `{ "reply" }`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{CompletionRequest, LlmClient};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AgentChatRequest<'a> {
    tenant: &'a str,
    message: &'a str,
    session_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct AgentChatResponse {
    reply: Option<String>,
}

#[derive(Clone)]
pub struct AgentApiClient {
    http: reqwest::Client,
    chat_url: String,
}

impl AgentApiClient {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl AsRef<str>) -> Self {
        let chat_url = format!("{}/api/chat", base_url.as_ref().trim_end_matches('/'));
        Self { http, chat_url }
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

#[async_trait]
impl LlmClient for AgentApiClient {
    #[instrument(skip(self, request), fields(session_key = %request.session_key, site = %request.site))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = AgentChatRequest {
            tenant: &request.site,
            message: &request.user_message,
            session_id: &request.session_key,
        };

        tracing::debug!(url = %self.chat_url, "step: agent api request");
        let response = self
            .http
            .post(&self.chat_url)
            .json(&body)
            .send()
            .await
            .context("agent api request failed")?
            .error_for_status()
            .context("agent api returned error status")?;

        let parsed: AgentChatResponse = response
            .json()
            .await
            .context("agent api returned malformed body")?;

        match parsed.reply {
            Some(reply) if !reply.trim().is_empty() => Ok(reply),
            _ => anyhow::bail!("agent api reply is missing or empty"),
        }
    }
}
