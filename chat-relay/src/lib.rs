//! # Chat relay
//!
//! Orchestrates one chat exchange:
//!
//! 1. resolve identity through the [`SessionStore`]
//! 2. signed-in users get a [`UserContext`](edge_core::UserContext) and history from the
//!    [`MessageLog`]; everyone else gets history from the anonymous cache
//! 3. build the system prompt and call the [`LlmClient`](llm_client::LlmClient)
//! 4. write the exchange back to whichever store the history came from
//!
//! Every collaborator returns a `Result`; what the relay does with a failure at each stage is
//! fixed in [`recovery`].

mod collaborators;
pub mod policy;
pub mod recovery;
mod relay;
mod store_adapters;
mod user_context;

pub use collaborators::{
    AccountStore, Credentials, Membership, MessageLog, NewExchange, SessionStore, UserIdentity,
};
pub use relay::{
    ChatOutcome, ChatRelay, ChatRequest, RelayConfig, ReplyStatus, EMPTY_MESSAGE_REPLY,
    FALLBACK_REPLY,
};
pub use user_context::UserContextResolver;
