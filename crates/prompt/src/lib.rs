//! # Prompt
//!
//! Builds what the completion API receives for one chat exchange.
//!
//! ## Format
//!
//! - **Knowledge** (always): frozen description of the company, its products and pricing
//! - **Personalization** (signed-in users): name, email, role, organization, active products, admin flag
//! - **Sign-up nudge** (anonymous visitors): one sentence asking the model to encourage sign-up
//!
//! [`build_system_prompt`] is pure: identical input yields identical output.
//! [`build_messages`] lays out system prompt, history and the new user turn in API order.
//!
//! ## External interactions
//!
//! - **AI models**: output is sent to LLM APIs through `llm-client`.

mod builder;
mod knowledge;

pub use builder::{build_messages, build_system_prompt, personalization_block, SIGN_UP_NUDGE};
pub use knowledge::EDGE_AI_KNOWLEDGE;

use edge_core::{ConversationTurn, TurnRole};

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<&ConversationTurn> for ChatMessage {
    fn from(turn: &ConversationTurn) -> Self {
        match turn.role {
            TurnRole::User => ChatMessage::user(turn.content.clone()),
            TurnRole::Assistant => ChatMessage::assistant(turn.content.clone()),
        }
    }
}
