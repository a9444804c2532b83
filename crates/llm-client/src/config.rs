//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::openai_llm::DEFAULT_MODEL;

/// Which completion backend serves chat replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Direct model API (OpenAI-compatible).
    OpenAI,
    /// Remote agent service at `AGENT_API_URL`.
    Agent,
}

impl FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAI),
            "agent" => Ok(LlmProvider::Agent),
            other => anyhow::bail!("unknown LLM_PROVIDER: {} (expected openai or agent)", other),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenAI => f.write_str("openai"),
            LlmProvider::Agent => f.write_str("agent"),
        }
    }
}

/// LLM configuration interface.
pub trait LlmConfig: Send + Sync {
    fn provider(&self) -> LlmProvider;
    fn api_key(&self) -> Option<&str>;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn max_tokens(&self) -> u32;
    fn temperature(&self) -> f32;
    fn timeout(&self) -> Duration;
    fn agent_api_url(&self) -> Option<&str>;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub llm_provider: LlmProvider,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub llm_model: String,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
    pub llm_timeout: Duration,
    pub agent_api_url: Option<String>,
}

impl LlmConfig for EnvLlmConfig {
    fn provider(&self) -> LlmProvider {
        self.llm_provider
    }
    fn api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref()
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn max_tokens(&self) -> u32 {
        self.llm_max_tokens
    }
    fn temperature(&self) -> f32 {
        self.llm_temperature
    }
    fn timeout(&self) -> Duration {
        self.llm_timeout
    }
    fn agent_api_url(&self) -> Option<&str> {
        self.agent_api_url.as_deref()
    }
}

impl EnvLlmConfig {
    /// Load from environment variables. Credentials are checked by [`EnvLlmConfig::validate`],
    /// so commands that never call the model can still load the config.
    pub fn from_env() -> Result<Self> {
        let llm_provider = match env::var("LLM_PROVIDER") {
            Ok(s) if !s.trim().is_empty() => s.parse()?,
            _ => LlmProvider::OpenAI,
        };
        let openai_api_key = non_empty_var("OPENAI_API_KEY");
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let llm_model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let llm_max_tokens = match env::var("LLM_MAX_TOKENS") {
            Ok(s) => s.parse().context("LLM_MAX_TOKENS must be a positive integer")?,
            Err(_) => 1024,
        };
        let llm_temperature = match env::var("LLM_TEMPERATURE") {
            Ok(s) => s.parse().context("LLM_TEMPERATURE must be a number")?,
            Err(_) => 0.7,
        };
        let llm_timeout = match env::var("LLM_TIMEOUT_SECS") {
            Ok(s) => Duration::from_secs(
                s.parse().context("LLM_TIMEOUT_SECS must be a positive integer")?,
            ),
            Err(_) => Duration::from_secs(30),
        };
        let agent_api_url = non_empty_var("AGENT_API_URL");
        Ok(Self {
            llm_provider,
            openai_api_key,
            openai_base_url,
            llm_model,
            llm_max_tokens,
            llm_temperature,
            llm_timeout,
            agent_api_url,
        })
    }

    pub fn validate(&self) -> Result<()> {
        match self.llm_provider {
            LlmProvider::OpenAI if self.openai_api_key.is_none() => {
                anyhow::bail!("OPENAI_API_KEY is required when LLM_PROVIDER=openai")
            }
            LlmProvider::Agent if self.agent_api_url.is_none() => {
                anyhow::bail!("AGENT_API_URL is required when LLM_PROVIDER=agent")
            }
            _ => {}
        }
        if self.llm_max_tokens == 0 {
            anyhow::bail!("LLM_MAX_TOKENS must be greater than 0");
        }
        if !(0.0..=2.0).contains(&self.llm_temperature) {
            anyhow::bail!("LLM_TEMPERATURE must be between 0 and 2");
        }
        if self.llm_timeout.is_zero() {
            anyhow::bail!("LLM_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}
