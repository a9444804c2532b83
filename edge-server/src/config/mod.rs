//! Server configuration: BaseConfig (HTTP, log, DB, chat defaults) + LLM and cache configs
//! owned by their crates.

mod base;
mod server_config;


pub use base::BaseConfig;
pub use server_config::ServerConfig;
