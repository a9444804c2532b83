//! Process entry points: serve the HTTP API, or migrate the database.

use anyhow::{Context, Result};
use chrono::Utc;
use edge_core::init_tracing;
use session_cache::{CacheConfig, CacheSweeper};
use storage::Database;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::components::build_components;
use crate::config::ServerConfig;
use crate::routes::build_router;

/// Serves until Ctrl-C, then drains the server and stops the cache sweeper.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    init_tracing(config.log_file())?;
    config.validate()?;

    let components = build_components(&config).await?;
    let sweeper = CacheSweeper::start(components.cache.clone(), config.cache.sweep_interval());
    info!(
        ttl_secs = config.cache.ttl().as_secs(),
        max_turns = config.cache.max_turns(),
        max_sessions = config.cache.max_sessions(),
        "step: cache config applied"
    );

    let state = components.app_state(config.base.is_development());
    let app = build_router(state, &config.base.cors_allowed_origins)?;

    let listener = TcpListener::bind(&config.base.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.base.bind_addr))?;
    info!(addr = %config.base.bind_addr, "Edge server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    sweeper.stop().await;
    info!("Edge server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Creates the schema (idempotent), logs what exists and prunes expired sessions.
pub async fn run_migrate(config: ServerConfig) -> Result<()> {
    init_tracing(config.log_file())?;
    migrate(config.database_url()).await?;
    Ok(())
}

/// Migration report: tables present, messages stored, expired sessions removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub tables: Vec<String>,
    pub message_count: i64,
    pub expired_sessions_removed: u64,
}

#[instrument]
pub async fn migrate(database_url: &str) -> Result<MigrationReport> {
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("Failed to open database {}", database_url))?;

    let tables = db.table_names().await.context("Failed to list tables")?;
    info!(tables = %tables.join(", "), "step: schema ready");

    let message_count = db
        .conversations()
        .count()
        .await
        .context("Failed to count messages")?;
    info!(message_count, "step: conversation messages counted");

    let expired_sessions_removed = db
        .sessions()
        .delete_expired(Utc::now())
        .await
        .context("Failed to delete expired sessions")?;

    Ok(MigrationReport {
        tables,
        message_count,
        expired_sessions_removed,
    })
}
