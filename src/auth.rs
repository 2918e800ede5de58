//! Explicit authentication context.
//!
//! Current-user identity and auth state travel as a plain value handed to
//! the call sites that need them, restored once at startup and cleared by
//! logout. Token issuance and refresh belong to the backend and are not
//! modeled here.

use serde::{Deserialize, Serialize};

/// Role attached to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Candidate,
    Company,
}

impl UserRole {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "candidate" => Some(Self::Candidate),
            "company" => Some(Self::Company),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Company => "company",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

/// Session material restored from persistent storage at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSession {
    pub token: String,
    pub user: CurrentUser,
}

/// Auth state for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    user: Option<CurrentUser>,
    token: Option<String>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Restore identity from a persisted session, if one exists.
    pub fn restore(session: Option<PersistedSession>) -> Self {
        match session {
            Some(session) => Self {
                user: Some(session.user),
                token: Some(session.token),
            },
            None => Self::anonymous(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Logout clears the restored identity and token.
    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
    }
}
