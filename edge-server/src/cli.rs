//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ServerConfig;

#[derive(Parser)]
#[command(name = "edge-server")]
#[command(about = "Edge AI site server: run the HTTP API or migrate the database", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API (config from env; --bind overrides BIND_ADDR).
    Run {
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Create tables and indexes, report message count, drop expired sessions.
    Migrate,
}

/// Load ServerConfig from environment. If `bind` is provided it overrides BIND_ADDR.
pub fn load_config(bind: Option<String>) -> Result<ServerConfig> {
    let mut config = ServerConfig::load()?;
    if let Some(bind) = bind {
        config.base.bind_addr = bind;
    }
    Ok(config)
}
