//! Test app: real router over a temp SQLite database and a scripted completion client.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use chat_relay::{RelayConfig, SessionStore};
use chrono::Duration;
use edge_server::{build_relay, build_router, AppState};
use llm_client::{CompletionRequest, LlmClient};
use session_cache::AnonymousConversationCache;
use storage::Database;
use tempfile::TempDir;
use tower::ServiceExt;

#[derive(Clone, Copy)]
pub enum Script {
    Echo,
    Fail,
    Panic,
}

pub struct ScriptedLlm {
    pub script: Mutex<Script>,
    pub requests: Mutex<Vec<CompletionRequest>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let script = *self.script.lock().unwrap();
        match script {
            Script::Echo => Ok(format!("echo: {}", request.user_message)),
            Script::Fail => Err(anyhow::anyhow!("model overloaded")),
            Script::Panic => panic!("completion client exploded"),
        }
    }
}

pub fn app_state(
    db: &Database,
    cache: &AnonymousConversationCache,
    llm: Arc<ScriptedLlm>,
    expose_debug: bool,
) -> AppState {
    let relay = build_relay(db, cache.clone(), llm, RelayConfig::default());
    let sessions: Arc<dyn SessionStore> = Arc::new(db.sessions());
    AppState {
        relay,
        sessions,
        accounts: db.accounts(),
        expose_debug,
    }
}

pub struct TestApp {
    pub _dir: TempDir,
    pub db: Database,
    pub cache: AnonymousConversationCache,
    pub llm: Arc<ScriptedLlm>,
    pub router: Router,
}

impl TestApp {
    pub async fn new(expose_debug: bool) -> Self {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("server.db").display());
        let db = Database::connect(&url).await.expect("open database");
        let cache = AnonymousConversationCache::new();
        let llm = Arc::new(ScriptedLlm {
            script: Mutex::new(Script::Echo),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        });
        let state = app_state(&db, &cache, llm.clone(), expose_debug);
        let router = build_router(state, &["http://localhost:3000".to_string()]).unwrap();
        Self {
            _dir: dir,
            db,
            cache,
            llm,
            router,
        }
    }

    pub fn script(&self, script: Script) {
        *self.llm.script.lock().unwrap() = script;
    }

    /// Creates a user and returns a live session token for it.
    pub async fn sign_in(&self, id: &str, name: &str, email: &str) -> String {
        self.db.accounts().create_user(id, name, email).await.unwrap();
        self.db.sessions().create(id, Duration::hours(1)).await.unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        read_json(response).await
    }
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub fn json_request(method: &str, uri: &str, body: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(
            header::COOKIE,
            format!("better-auth.session_token={}.signature", token),
        );
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}
