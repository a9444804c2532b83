//! Cache configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Idle time after which an anonymous conversation is evicted.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);
/// Period of the background sweep.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);
/// Turns kept per conversation (oldest dropped first).
pub const DEFAULT_MAX_TURNS: usize = 20;
/// Distinct session keys tracked at once.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Anonymous cache limits.
pub trait CacheConfig: Send + Sync {
    fn ttl(&self) -> Duration;
    fn sweep_interval(&self) -> Duration;
    fn max_turns(&self) -> usize;
    fn max_sessions(&self) -> usize;
}

/// Cache config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvCacheConfig {
    pub chat_cache_ttl: Duration,
    pub chat_cache_sweep_interval: Duration,
    pub chat_cache_max_turns: usize,
    pub chat_cache_max_sessions: usize,
}

impl Default for EnvCacheConfig {
    fn default() -> Self {
        Self {
            chat_cache_ttl: DEFAULT_TTL,
            chat_cache_sweep_interval: DEFAULT_SWEEP_INTERVAL,
            chat_cache_max_turns: DEFAULT_MAX_TURNS,
            chat_cache_max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl CacheConfig for EnvCacheConfig {
    fn ttl(&self) -> Duration {
        self.chat_cache_ttl
    }
    fn sweep_interval(&self) -> Duration {
        self.chat_cache_sweep_interval
    }
    fn max_turns(&self) -> usize {
        self.chat_cache_max_turns
    }
    fn max_sessions(&self) -> usize {
        self.chat_cache_max_sessions
    }
}

impl EnvCacheConfig {
    /// Load from environment variables. Unset values keep their defaults; unparsable ones are errors.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            chat_cache_ttl: Duration::from_secs(parse_var(
                "CHAT_CACHE_TTL_SECS",
                defaults.chat_cache_ttl.as_secs(),
            )?),
            chat_cache_sweep_interval: Duration::from_secs(parse_var(
                "CHAT_CACHE_SWEEP_SECS",
                defaults.chat_cache_sweep_interval.as_secs(),
            )?),
            chat_cache_max_turns: parse_var("CHAT_CACHE_MAX_TURNS", defaults.chat_cache_max_turns)?,
            chat_cache_max_sessions: parse_var(
                "CHAT_CACHE_MAX_SESSIONS",
                defaults.chat_cache_max_sessions,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chat_cache_max_turns == 0 {
            anyhow::bail!("CHAT_CACHE_MAX_TURNS must be greater than 0");
        }
        if self.chat_cache_max_sessions == 0 {
            anyhow::bail!("CHAT_CACHE_MAX_SESSIONS must be greater than 0");
        }
        if self.chat_cache_sweep_interval.is_zero() {
            anyhow::bail!("CHAT_CACHE_SWEEP_SECS must be greater than 0");
        }
        Ok(())
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(s) => s
            .trim()
            .parse()
            .with_context(|| format!("{} must be a non-negative integer, got {:?}", name, s)),
        Err(_) => Ok(default),
    }
}
