//! # Edge server
//!
//! HTTP surface of the Edge AI site:
//!
//! - `POST /api/chat` – chat relay (anonymous or signed-in)
//! - `GET /api/products` – public product catalog
//! - `/api/admin/*` – users, organizations, products, subscriptions (site admins only)
//! - `GET /health`
//!
//! Config comes from env ([`ServerConfig`]); [`components`] assembles storage, cache, LLM client
//! and relay; [`runner`] serves with graceful shutdown or runs the migration.

pub mod auth;
pub mod cli;
pub mod components;
pub mod config;
pub mod routes;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_components, build_relay, create_llm_client, ServerComponents};
pub use config::{BaseConfig, ServerConfig};
pub use routes::{build_router, AppState};
pub use runner::{migrate, run_migrate, run_server, MigrationReport};
