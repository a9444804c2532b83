use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use edge_core::ConversationTurn;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::{CacheConfig, EnvCacheConfig};

/// Snapshot of one anonymous conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymousConversation {
    /// Oldest first.
    pub turns: Vec<ConversationTurn>,
    pub last_activity: DateTime<Utc>,
}

#[derive(Debug)]
struct Entry {
    turns: VecDeque<ConversationTurn>,
    last_activity: DateTime<Utc>,
}

impl Entry {
    fn empty(now: DateTime<Utc>) -> Self {
        Self {
            turns: VecDeque::new(),
            last_activity: now,
        }
    }

    fn snapshot(&self) -> AnonymousConversation {
        AnonymousConversation {
            turns: self.turns.iter().cloned().collect(),
            last_activity: self.last_activity,
        }
    }
}

/// Process-wide store of anonymous conversations, keyed by client session key.
#[derive(Debug, Clone)]
pub struct AnonymousConversationCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    ttl: ChronoDuration,
    max_turns: usize,
    max_sessions: usize,
}

impl AnonymousConversationCache {
    /// Creates an empty cache with the default limits (1h TTL, 20 turns).
    pub fn new() -> Self {
        Self::with_config(&EnvCacheConfig::default())
    }

    pub fn with_config(config: &dyn CacheConfig) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: ChronoDuration::from_std(config.ttl())
                .unwrap_or_else(|_| ChronoDuration::days(36_500)),
            max_turns: config.max_turns().max(1),
            max_sessions: config.max_sessions().max(1),
        }
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Returns the conversation for `session_key`, creating an empty one if absent.
    pub async fn get_or_create(&self, session_key: &str) -> AnonymousConversation {
        self.get_or_create_at(session_key, Utc::now()).await
    }

    pub async fn get_or_create_at(
        &self,
        session_key: &str,
        now: DateTime<Utc>,
    ) -> AnonymousConversation {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(session_key) {
                return entry.snapshot();
            }
        }

        let mut entries = self.entries.write().await;
        if !entries.contains_key(session_key) {
            self.make_room(&mut entries);
            info!(session_key = %session_key, "step: anonymous cache created conversation");
        }
        entries
            .entry(session_key.to_string())
            .or_insert_with(|| Entry::empty(now))
            .snapshot()
    }

    /// Appends `turns` in order, refreshes `last_activity`, then keeps only the newest
    /// `max_turns`. Returns the number of turns held afterwards.
    pub async fn append<I>(&self, session_key: &str, turns: I) -> usize
    where
        I: IntoIterator<Item = ConversationTurn>,
    {
        self.append_at(session_key, turns, Utc::now()).await
    }

    pub async fn append_at<I>(&self, session_key: &str, turns: I, now: DateTime<Utc>) -> usize
    where
        I: IntoIterator<Item = ConversationTurn>,
    {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(session_key) {
            self.make_room(&mut entries);
        }
        let entry = entries
            .entry(session_key.to_string())
            .or_insert_with(|| Entry::empty(now));

        entry.turns.extend(turns);
        entry.last_activity = now;
        while entry.turns.len() > self.max_turns {
            entry.turns.pop_front();
        }

        debug!(
            session_key = %session_key,
            turns = entry.turns.len(),
            "Appended turns to anonymous conversation"
        );
        entry.turns.len()
    }

    /// Removes every conversation idle for longer than the TTL. Returns how many were removed.
    pub async fn sweep(&self) -> usize {
        self.sweep_at(Utc::now()).await
    }

    pub async fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| now - entry.last_activity <= self.ttl);
        let removed = before - entries.len();
        info!(
            removed,
            remaining = entries.len(),
            "step: anonymous cache sweep done"
        );
        removed
    }

    pub async fn contains(&self, session_key: &str) -> bool {
        self.entries.read().await.contains_key(session_key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Evicts the least recently active conversation when the key limit is reached.
    fn make_room(&self, entries: &mut HashMap<String, Entry>) {
        if entries.len() < self.max_sessions {
            return;
        }
        let oldest = entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_activity)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            entries.remove(&key);
            info!(
                session_key = %key,
                max_sessions = self.max_sessions,
                "step: anonymous cache full, evicted least recently active conversation"
            );
        }
    }
}

impl Default for AnonymousConversationCache {
    fn default() -> Self {
        Self::new()
    }
}
