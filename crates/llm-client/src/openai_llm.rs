//! LlmClient backed by the direct model API through `openai-client`.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::CompletionOptions;
use tracing::instrument;

use super::{chat_message_to_openai, CompletionRequest, LlmClient};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, request), fields(session_key = %request.session_key, history_len = request.history.len()))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let openai_messages = request
            .messages()
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;
        let options = CompletionOptions {
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };
        self.client
            .chat_completion(&self.model, openai_messages, options)
            .await
    }
}
