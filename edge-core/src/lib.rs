//! # edge-core
//!
//! Core types shared by every crate of the chat service: conversation turns, the per-request
//! [`UserContext`], the [`EdgeError`] taxonomy, and tracing initialization. Transport-agnostic;
//! used by storage, session-cache, prompt, chat-relay and edge-server.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{EdgeError, Result, Subsystem};
pub use logger::init_tracing;
pub use types::{ConversationTurn, ProductSummary, Role, TurnRole, UserContext};
