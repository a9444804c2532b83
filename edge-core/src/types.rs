//! Core types: conversation turns, roles, and the per-request user context.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EdgeError;

/// Author of one conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TurnRole {
    type Err = EdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(EdgeError::InvalidInput(format!("unknown turn role: {}", other))),
        }
    }
}

/// One message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Effective role of a user as seen by the assistant.
///
/// Organization roles map onto `Owner`/`Admin`/`Member`; a user without membership is `User`.
/// Site administrators are always `Admin` (see [`UserContext::new`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Role {
    Admin,
    Owner,
    Member,
    User,
    Other(String),
}

impl Role {
    /// Maps an organization membership role string.
    pub fn from_membership(role: &str) -> Self {
        match role {
            "admin" => Role::Admin,
            "owner" => Role::Owner,
            "member" => Role::Member,
            "user" => Role::User,
            other => Role::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Owner => "owner",
            Role::Member => "member",
            Role::User => "user",
            Role::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from_membership(&s)
    }
}

/// One active product subscription visible to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub plan: String,
    pub status: String,
}

/// Derived, per-request view of a signed-in user. Never persisted or cached across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub organization_id: Option<String>,
    pub organization_name: Option<String>,
    pub products: Vec<ProductSummary>,
    pub is_admin: bool,
}

impl UserContext {
    /// Builds a context; `role` is forced to [`Role::Admin`] when `is_admin` is set, otherwise the
    /// membership role is used, falling back to [`Role::User`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        membership_role: Option<Role>,
        organization_id: Option<String>,
        organization_name: Option<String>,
        products: Vec<ProductSummary>,
        is_admin: bool,
    ) -> Self {
        let role = if is_admin {
            Role::Admin
        } else {
            membership_role.unwrap_or(Role::User)
        };
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role,
            organization_id,
            organization_name,
            products,
            is_admin,
        }
    }
}
