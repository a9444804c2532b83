//! The chat pipeline for one inbound message.

use std::sync::Arc;
use std::time::Duration;

use edge_core::{ConversationTurn, EdgeError, Result, Subsystem, UserContext};
use llm_client::{CompletionRequest, LlmClient};
use session_cache::AnonymousConversationCache;
use tracing::{info, instrument};

use crate::collaborators::{Credentials, MessageLog, NewExchange, SessionStore};
use crate::recovery::{recover, Stage};
use crate::user_context::UserContextResolver;

/// Reply sent in place of the model's text when the completion call fails.
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong.";
/// Reply for an empty or whitespace-only message.
pub const EMPTY_MESSAGE_REPLY: &str = "Please enter a message.";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Persisted turns loaded for a signed-in user.
    pub history_limit: usize,
    /// Session key for anonymous callers that send none.
    pub anonymous_session_key: String,
    pub default_site: String,
    pub completion_timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            history_limit: 20,
            anonymous_session_key: "web-anon".to_string(),
            default_site: "edge-ai".to_string(),
            completion_timeout: Duration::from_secs(30),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub message: String,
    /// Client-generated key; ignored for signed-in users.
    pub session_key: Option<String>,
    pub site: Option<String>,
    pub credentials: Credentials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStatus {
    /// Reply text came from the model.
    Completed,
    /// Completion failed; reply is [`FALLBACK_REPLY`] and nothing was stored.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub reply: String,
    pub status: ReplyStatus,
    pub session_key: String,
    /// Present only when a signed-in user's context was resolved.
    pub user_context: Option<UserContext>,
    pub history_len: usize,
}

/// Where the conversation history of one exchange lives.
enum Thread {
    Persistent { user_id: String },
    Anonymous,
}

#[derive(Clone)]
pub struct ChatRelay {
    sessions: Arc<dyn SessionStore>,
    resolver: UserContextResolver,
    messages: Arc<dyn MessageLog>,
    cache: AnonymousConversationCache,
    llm: Arc<dyn LlmClient>,
    config: RelayConfig,
}

impl ChatRelay {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        resolver: UserContextResolver,
        messages: Arc<dyn MessageLog>,
        cache: AnonymousConversationCache,
        llm: Arc<dyn LlmClient>,
        config: RelayConfig,
    ) -> Self {
        Self {
            sessions,
            resolver,
            messages,
            cache,
            llm,
            config,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Handles one message end to end.
    ///
    /// Only an empty message is an `Err` (`InvalidInput`), and it has no side effects.
    /// Collaborator failures degrade per [`crate::recovery`], so every other call yields a reply.
    #[instrument(skip(self, request), fields(site = tracing::field::Empty, session_key = tracing::field::Empty))]
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatOutcome> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(EdgeError::InvalidInput(EMPTY_MESSAGE_REPLY.to_string()));
        }
        let site = non_empty(request.site.as_deref())
            .unwrap_or(&self.config.default_site)
            .to_string();

        let user_context = self.resolve_user(&request.credentials).await;
        let (thread, session_key) = match &user_context {
            Some(ctx) => (
                Thread::Persistent {
                    user_id: ctx.id.clone(),
                },
                format!("user-{}", ctx.id),
            ),
            None => (
                Thread::Anonymous,
                non_empty(request.session_key.as_deref())
                    .unwrap_or(&self.config.anonymous_session_key)
                    .to_string(),
            ),
        };
        tracing::Span::current()
            .record("site", site.as_str())
            .record("session_key", session_key.as_str());

        let history = self.load_history(&thread, &session_key).await;
        let history_len = history.len();
        info!(
            authenticated = user_context.is_some(),
            history_len, "step: relay history loaded"
        );

        let completion = CompletionRequest {
            system_prompt: prompt::build_system_prompt(user_context.as_ref()),
            history,
            user_message: message.to_string(),
            session_key: session_key.clone(),
            site: site.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let reply = match self.complete(&completion).await {
            Ok(reply) => reply,
            Err(err) => {
                recover(Stage::Completion, &err);
                return Ok(ChatOutcome {
                    reply: FALLBACK_REPLY.to_string(),
                    status: ReplyStatus::Fallback,
                    session_key,
                    user_context,
                    history_len,
                });
            }
        };

        self.write_back(&thread, &session_key, &site, message, &reply)
            .await;
        info!(reply_len = reply.len(), "step: relay reply ready");

        Ok(ChatOutcome {
            reply,
            status: ReplyStatus::Completed,
            session_key,
            user_context,
            history_len,
        })
    }

    async fn resolve_user(&self, credentials: &Credentials) -> Option<UserContext> {
        let identity = match self.sessions.get_session(credentials).await {
            Ok(identity) => identity?,
            Err(err) => {
                recover(Stage::Identity, &err);
                return None;
            }
        };
        match self.resolver.resolve(&identity.id).await {
            Ok(ctx) => Some(ctx),
            Err(err) => {
                recover(Stage::UserContext, &err);
                None
            }
        }
    }

    async fn load_history(&self, thread: &Thread, session_key: &str) -> Vec<ConversationTurn> {
        match thread {
            Thread::Persistent { user_id } => {
                match self
                    .messages
                    .recent_for_user(user_id, self.config.history_limit)
                    .await
                {
                    Ok(turns) => turns,
                    Err(err) => {
                        recover(Stage::HistoryLoad, &err);
                        Vec::new()
                    }
                }
            }
            Thread::Anonymous => self.cache.get_or_create(session_key).await.turns,
        }
    }

    /// Calls the model under the configured timeout. Errors, timeouts and blank text all fail.
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let completion = |e: String| EdgeError::upstream(Subsystem::Completion, e);
        let text = tokio::time::timeout(self.config.completion_timeout, self.llm.complete(request))
            .await
            .map_err(|_| {
                completion(format!(
                    "timed out after {}s",
                    self.config.completion_timeout.as_secs_f32()
                ))
            })?
            .map_err(|e| completion(format!("{:#}", e)))?;
        if text.trim().is_empty() {
            return Err(completion("empty reply".to_string()));
        }
        Ok(text)
    }

    async fn write_back(
        &self,
        thread: &Thread,
        session_key: &str,
        site: &str,
        message: &str,
        reply: &str,
    ) {
        match thread {
            Thread::Persistent { user_id } => {
                let exchange = NewExchange {
                    user_id: user_id.clone(),
                    session_key: session_key.to_string(),
                    site: site.to_string(),
                    user_message: message.to_string(),
                    reply: reply.to_string(),
                };
                if let Err(err) = self.messages.append_exchange(&exchange).await {
                    recover(Stage::Persistence, &err);
                }
            }
            Thread::Anonymous => {
                self.cache
                    .append(
                        session_key,
                        [ConversationTurn::user(message), ConversationTurn::assistant(reply)],
                    )
                    .await;
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
