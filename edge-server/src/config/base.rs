//! Base config: bind address, logging, database, CORS and chat defaults. Loaded from env.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BIND_ADDR, or 0.0.0.0:PORT
    pub bind_addr: String,
    pub database_url: String,
    /// LOG_FILE; stdout only when unset
    pub log_file: Option<String>,
    /// APP_ENV; `development` exposes `_debug` in chat replies
    pub app_env: String,
    pub default_site: String,
    pub anonymous_session_key: String,
    /// CORS_ALLOWED_ORIGINS, comma separated
    pub cors_allowed_origins: Vec<String>,
    /// CHAT_HISTORY_LIMIT: persisted turns replayed to the model
    pub chat_history_limit: usize,
}

impl BaseConfig {
    pub fn load() -> Result<Self> {
        let bind_addr = match env::var("BIND_ADDR") {
            Ok(addr) if !addr.trim().is_empty() => addr,
            _ => match env::var("PORT") {
                Ok(port) => format!("0.0.0.0:{}", port.trim()),
                Err(_) => "0.0.0.0:3000".to_string(),
            },
        };
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://edge_ai.db".to_string());
        let log_file = env::var("LOG_FILE").ok().filter(|s| !s.trim().is_empty());
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "production".to_string());
        let default_site = env::var("DEFAULT_SITE").unwrap_or_else(|_| "edge-ai".to_string());
        let anonymous_session_key =
            env::var("ANONYMOUS_SESSION_KEY").unwrap_or_else(|_| "web-anon".to_string());
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let chat_history_limit = match env::var("CHAT_HISTORY_LIMIT") {
            Ok(s) => s
                .parse()
                .context("CHAT_HISTORY_LIMIT must be a positive integer")?,
            Err(_) => 20,
        };

        Ok(Self {
            bind_addr,
            database_url,
            log_file,
            app_env,
            default_site,
            anonymous_session_key,
            cors_allowed_origins,
            chat_history_limit,
        })
    }

    pub fn is_development(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDR is not a socket address: {}", self.bind_addr))?;
        for origin in &self.cors_allowed_origins {
            if origin == "*" {
                anyhow::bail!(
                    "CORS_ALLOWED_ORIGINS must list explicit origins; '*' is not allowed with credentials"
                );
            }
            HeaderValue::from_str(origin)
                .with_context(|| format!("CORS_ALLOWED_ORIGINS has an invalid origin: {}", origin))?;
        }
        if self.chat_history_limit == 0 {
            anyhow::bail!("CHAT_HISTORY_LIMIT must be greater than 0");
        }
        if self.default_site.trim().is_empty() {
            anyhow::bail!("DEFAULT_SITE must not be empty");
        }
        if self.anonymous_session_key.trim().is_empty() {
            anyhow::bail!("ANONYMOUS_SESSION_KEY must not be empty");
        }
        Ok(())
    }
}
