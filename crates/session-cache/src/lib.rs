//! # Anonymous conversation cache
//!
//! Keeps the recent turns of visitors who are not signed in, keyed by the session key their
//! browser generated. Entries are bounded per key ([`CacheConfig::max_turns`]), expire after
//! [`CacheConfig::ttl`] of inactivity, and are lost on restart.
//!
//! - [`AnonymousConversationCache`] – the store itself
//! - [`CacheSweeper`] – background task that periodically evicts expired entries
//! - [`EnvCacheConfig`] – env-based configuration
//!
//! ## Thread Safety
//!
//! The map sits behind a `tokio::sync::RwLock`; every append-and-trim runs under one write lock
//! so a sweep never observes a half-applied append.

mod cache;
mod config;
mod sweeper;

pub use cache::{AnonymousConversation, AnonymousConversationCache};
pub use config::{CacheConfig, EnvCacheConfig};
pub use sweeper::CacheSweeper;
