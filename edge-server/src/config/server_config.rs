//! ServerConfig: BaseConfig + the LLM and cache configs from their own crates.

use anyhow::Result;
use chat_relay::RelayConfig;
use llm_client::{EnvLlmConfig, LlmConfig};
use session_cache::EnvCacheConfig;

use super::BaseConfig;

pub struct ServerConfig {
    pub base: BaseConfig,
    pub llm: EnvLlmConfig,
    pub cache: EnvCacheConfig,
}

impl ServerConfig {
    /// Load full config from environment variables. Call validate() before serving.
    pub fn load() -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load()?,
            llm: EnvLlmConfig::from_env()?,
            cache: EnvCacheConfig::from_env()?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.llm.validate()?;
        self.cache.validate()
    }

    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            history_limit: self.base.chat_history_limit,
            anonymous_session_key: self.base.anonymous_session_key.clone(),
            default_site: self.base.default_site.clone(),
            completion_timeout: self.llm.timeout(),
            max_tokens: self.llm.max_tokens(),
            temperature: self.llm.temperature(),
        }
    }

    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> Option<&str> {
        self.base.log_file.as_deref()
    }
}
