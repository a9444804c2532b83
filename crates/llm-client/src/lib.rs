//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait, the single seam through which the chat relay reaches an
//! external completion API, plus two implementations:
//!
//! - [`OpenAILlmClient`]: direct model API (OpenAI-compatible chat completions)
//! - [`AgentApiClient`]: remote agent service that keeps its own prompt and memory
//!
//! Both return `Err` for transport failures, malformed responses and empty text, so the caller
//! can treat every failure the same way.

use anyhow::Result;
use async_trait::async_trait;
use edge_core::ConversationTurn;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};

mod agent_api;
mod config;
mod openai_llm;

pub use agent_api::AgentApiClient;
pub use config::{EnvLlmConfig, LlmConfig, LlmProvider};
pub use openai_client::mask_token;
pub use openai_llm::OpenAILlmClient;

/// Everything one completion call needs.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    /// Prior turns, oldest first. Does not include `user_message`.
    pub history: Vec<ConversationTurn>,
    pub user_message: String,
    /// Effective session key of the conversation; forwarded to backends that keep their own memory.
    pub session_key: String,
    pub site: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// System prompt, history, then the new user turn, in API order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        prompt::build_messages(&self.system_prompt, &self.history, &self.user_message)
    }
}

/// External completion API: returns the model's reply text for one request.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
