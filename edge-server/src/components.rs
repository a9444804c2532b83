//! Component factory: builds ServerComponents from config. Isolates assembly logic from runner.

use anyhow::{Context, Result};
use chat_relay::{ChatRelay, RelayConfig, SessionStore, UserContextResolver};
use llm_client::{
    mask_token, AgentApiClient, EnvLlmConfig, LlmClient, LlmConfig, LlmProvider, OpenAILlmClient,
};
use session_cache::AnonymousConversationCache;
use std::sync::Arc;
use storage::Database;
use tracing::{error, info, instrument};

use crate::config::ServerConfig;
use crate::routes::AppState;

/// Everything the HTTP layer and the runner need.
pub struct ServerComponents {
    pub db: Database,
    pub cache: AnonymousConversationCache,
    pub relay: ChatRelay,
}

impl ServerComponents {
    pub fn app_state(&self, expose_debug: bool) -> AppState {
        let sessions: Arc<dyn SessionStore> = Arc::new(self.db.sessions());
        AppState {
            relay: self.relay.clone(),
            sessions,
            accounts: self.db.accounts(),
            expose_debug,
        }
    }
}

/// Creates the completion client selected by `LLM_PROVIDER`.
pub fn create_llm_client(config: &EnvLlmConfig) -> Result<Arc<dyn LlmClient>> {
    match config.provider() {
        LlmProvider::OpenAI => {
            let api_key = config
                .api_key()
                .context("OPENAI_API_KEY is required when LLM_PROVIDER=openai")?
                .to_string();
            info!(
                model = %config.model(),
                base_url = %config.base_url(),
                api_key = %mask_token(&api_key),
                "Using OpenAI LLM client"
            );
            Ok(Arc::new(
                OpenAILlmClient::with_base_url(api_key, config.base_url().to_string())
                    .with_model(config.model()),
            ))
        }
        LlmProvider::Agent => {
            let url = config
                .agent_api_url()
                .context("AGENT_API_URL is required when LLM_PROVIDER=agent")?;
            info!(agent_api_url = %url, "Using agent API LLM client");
            Ok(Arc::new(AgentApiClient::new(url)))
        }
    }
}

/// Wires the relay to the SQLite-backed collaborators.
pub fn build_relay(
    db: &Database,
    cache: AnonymousConversationCache,
    llm: Arc<dyn LlmClient>,
    config: RelayConfig,
) -> ChatRelay {
    ChatRelay::new(
        Arc::new(db.sessions()),
        UserContextResolver::new(Arc::new(db.accounts())),
        Arc::new(db.conversations()),
        cache,
        llm,
        config,
    )
}

#[instrument(skip(config))]
pub async fn build_components(config: &ServerConfig) -> Result<ServerComponents> {
    let db = Database::connect(config.database_url())
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.database_url(),
                "Failed to initialize storage"
            );
            anyhow::anyhow!("Failed to initialize storage: {}", e)
        })?;
    info!(database_url = %config.database_url(), "step: storage ready");

    let cache = AnonymousConversationCache::with_config(&config.cache);
    let llm = create_llm_client(&config.llm)?;
    let relay = build_relay(&db, cache.clone(), llm, config.relay_config());
    info!(provider = %config.llm.provider(), "step: chat relay ready");

    Ok(ServerComponents { db, cache, relay })
}
