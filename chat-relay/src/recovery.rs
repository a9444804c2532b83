//! What the relay does when a collaborator fails, per pipeline stage.
//!
//! | Stage        | Recovery                          |
//! |--------------|-----------------------------------|
//! | Identity     | proceed anonymous                 |
//! | UserContext  | proceed anonymous                 |
//! | HistoryLoad  | continue with empty history       |
//! | Completion   | fallback reply, nothing persisted |
//! | Persistence  | skip the write, return the reply  |
//!
//! No stage aborts the exchange: the caller always gets a reply.

use std::fmt;

use edge_core::EdgeError;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Identity,
    UserContext,
    HistoryLoad,
    Completion,
    Persistence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    ProceedAnonymous,
    EmptyHistory,
    FallbackReply,
    SkipWrite,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Identity => "identity",
            Stage::UserContext => "user_context",
            Stage::HistoryLoad => "history_load",
            Stage::Completion => "completion",
            Stage::Persistence => "persistence",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Recovery::ProceedAnonymous => "proceed_anonymous",
            Recovery::EmptyHistory => "empty_history",
            Recovery::FallbackReply => "fallback_reply",
            Recovery::SkipWrite => "skip_write",
        };
        f.write_str(name)
    }
}

pub const fn recovery_for(stage: Stage) -> Recovery {
    match stage {
        Stage::Identity | Stage::UserContext => Recovery::ProceedAnonymous,
        Stage::HistoryLoad => Recovery::EmptyHistory,
        Stage::Completion => Recovery::FallbackReply,
        Stage::Persistence => Recovery::SkipWrite,
    }
}

/// Logs a failure at `stage` and returns the recovery the relay applies.
///
/// Missing data is expected (a deleted user, say) and logged at info; everything else at warn.
pub fn recover(stage: Stage, err: &EdgeError) -> Recovery {
    let recovery = recovery_for(stage);
    if err.is_not_found() {
        info!(stage = %stage, recovery = %recovery, error = %err, "step: relay degraded");
    } else {
        warn!(stage = %stage, recovery = %recovery, error = %err, "step: relay degraded");
    }
    recovery
}
