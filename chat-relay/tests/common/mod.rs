//! Hand-written collaborator doubles with call counters and failure switches.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chat_relay::{
    AccountStore, ChatRelay, Credentials, Membership, MessageLog, NewExchange, RelayConfig,
    SessionStore, UserContextResolver, UserIdentity,
};
use edge_core::{ConversationTurn, EdgeError, ProductSummary, Result, Role, Subsystem};
use llm_client::{CompletionRequest, LlmClient};
use session_cache::AnonymousConversationCache;

pub fn identity(id: &str, email: &str, name: &str) -> UserIdentity {
    UserIdentity {
        id: id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
    }
}

#[derive(Default)]
pub struct MockSessionStore {
    pub sessions: Mutex<HashMap<String, UserIdentity>>,
    pub fail: AtomicBool,
    pub calls: AtomicUsize,
}

impl MockSessionStore {
    pub fn with_session(token: &str, user: UserIdentity) -> Self {
        let store = Self::default();
        store.sessions.lock().unwrap().insert(token.to_string(), user);
        store
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn get_session(&self, credentials: &Credentials) -> Result<Option<UserIdentity>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(EdgeError::upstream(Subsystem::SessionStore, "auth provider down"));
        }
        let Some(token) = credentials.session_token.as_deref() else {
            return Ok(None);
        };
        Ok(self.sessions.lock().unwrap().get(token).cloned())
    }
}

#[derive(Default)]
pub struct MockAccountStore {
    pub users: Mutex<HashMap<String, UserIdentity>>,
    pub memberships: Mutex<HashMap<String, Membership>>,
    pub products: Mutex<HashMap<String, Vec<ProductSummary>>>,
    pub fail: AtomicBool,
    pub calls: AtomicUsize,
}

impl MockAccountStore {
    pub fn add_user(&self, user: UserIdentity) {
        self.users.lock().unwrap().insert(user.id.clone(), user);
    }

    pub fn add_membership(&self, user_id: &str, org_id: &str, org_name: &str, role: Role) {
        self.memberships.lock().unwrap().insert(
            user_id.to_string(),
            Membership {
                organization_id: org_id.to_string(),
                organization_name: org_name.to_string(),
                role,
            },
        );
    }

    pub fn add_product(&self, org_id: &str, name: &str, plan: &str) {
        self.products
            .lock()
            .unwrap()
            .entry(org_id.to_string())
            .or_default()
            .push(ProductSummary {
                id: format!("p_{}", name.to_lowercase()),
                name: name.to_string(),
                plan: plan.to_string(),
                status: "active".to_string(),
            });
    }

    fn check(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(EdgeError::upstream(Subsystem::Database, "connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountStore for MockAccountStore {
    async fn find_user(&self, user_id: &str) -> Result<Option<UserIdentity>> {
        self.check()?;
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }

    async fn first_membership(&self, user_id: &str) -> Result<Option<Membership>> {
        self.check()?;
        Ok(self.memberships.lock().unwrap().get(user_id).cloned())
    }

    async fn active_products(&self, organization_id: &str) -> Result<Vec<ProductSummary>> {
        self.check()?;
        Ok(self
            .products
            .lock()
            .unwrap()
            .get(organization_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct MockMessageLog {
    pub history: Mutex<HashMap<String, Vec<ConversationTurn>>>,
    pub appended: Mutex<Vec<NewExchange>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub read_calls: AtomicUsize,
    pub last_limit: AtomicUsize,
}

impl MockMessageLog {
    pub fn with_history(user_id: &str, turns: Vec<ConversationTurn>) -> Self {
        let log = Self::default();
        log.history.lock().unwrap().insert(user_id.to_string(), turns);
        log
    }

    pub fn appended(&self) -> Vec<NewExchange> {
        self.appended.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageLog for MockMessageLog {
    async fn recent_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<ConversationTurn>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.last_limit.store(limit, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(EdgeError::upstream(Subsystem::Database, "read timeout"));
        }
        let turns = self
            .history
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default();
        let skip = turns.len().saturating_sub(limit);
        Ok(turns.into_iter().skip(skip).collect())
    }

    async fn append_exchange(&self, exchange: &NewExchange) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(EdgeError::upstream(Subsystem::Database, "disk full"));
        }
        self.appended.lock().unwrap().push(exchange.clone());
        Ok(())
    }
}

pub enum LlmBehavior {
    Reply(String),
    Fail,
    Blank,
    Hang,
}

/// Completion double: records every request and answers per [`LlmBehavior`].
pub struct MockLlm {
    pub behavior: Mutex<LlmBehavior>,
    pub requests: Mutex<Vec<CompletionRequest>>,
    pub calls: AtomicUsize,
}

impl MockLlm {
    pub fn replying(text: &str) -> Self {
        Self::with(LlmBehavior::Reply(text.to_string()))
    }

    pub fn with(behavior: LlmBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn last_request(&self) -> CompletionRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no completion request recorded")
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let outcome = match &*self.behavior.lock().unwrap() {
            LlmBehavior::Reply(text) => Ok(Some(text.clone())),
            LlmBehavior::Fail => Err(anyhow::anyhow!("upstream 503")),
            LlmBehavior::Blank => Ok(Some("   ".to_string())),
            LlmBehavior::Hang => Ok(None),
        };
        match outcome {
            Ok(Some(text)) => Ok(text),
            Ok(None) => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("too late".to_string())
            }
            Err(e) => Err(e),
        }
    }
}

/// Relay wired to the given doubles and a fresh anonymous cache.
pub struct Harness {
    pub sessions: Arc<MockSessionStore>,
    pub accounts: Arc<MockAccountStore>,
    pub messages: Arc<MockMessageLog>,
    pub llm: Arc<MockLlm>,
    pub cache: AnonymousConversationCache,
    pub relay: ChatRelay,
}

impl Harness {
    pub fn new(
        sessions: MockSessionStore,
        accounts: MockAccountStore,
        messages: MockMessageLog,
        llm: MockLlm,
    ) -> Self {
        Self::with_config(sessions, accounts, messages, llm, RelayConfig::default())
    }

    pub fn with_config(
        sessions: MockSessionStore,
        accounts: MockAccountStore,
        messages: MockMessageLog,
        llm: MockLlm,
        config: RelayConfig,
    ) -> Self {
        let sessions = Arc::new(sessions);
        let accounts = Arc::new(accounts);
        let messages = Arc::new(messages);
        let llm = Arc::new(llm);
        let cache = AnonymousConversationCache::new();
        let relay = ChatRelay::new(
            sessions.clone(),
            UserContextResolver::new(accounts.clone()),
            messages.clone(),
            cache.clone(),
            llm.clone(),
            config,
        );
        Self {
            sessions,
            accounts,
            messages,
            llm,
            cache,
            relay,
        }
    }

    /// No sessions, no accounts, no history; the model answers `reply`.
    pub fn anonymous(reply: &str) -> Self {
        Self::new(
            MockSessionStore::default(),
            MockAccountStore::default(),
            MockMessageLog::default(),
            MockLlm::replying(reply),
        )
    }

    /// User 42 (`a@x.com`) signed in with token `tok-42`, member of Acme with HabaCasa (pro).
    pub fn signed_in(history: Vec<ConversationTurn>, llm: MockLlm) -> Self {
        let user = identity("42", "a@x.com", "Ada");
        let sessions = MockSessionStore::with_session("tok-42", user.clone());
        let accounts = MockAccountStore::default();
        accounts.add_user(user);
        accounts.add_membership("42", "org_1", "Acme", Role::Member);
        accounts.add_product("org_1", "HabaCasa", "pro");
        Self::new(
            sessions,
            accounts,
            MockMessageLog::with_history("42", history),
            llm,
        )
    }
}
