//! Session state values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The signed-in user, carried for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

/// User and token, always present together.
#[derive(Clone, PartialEq, Eq)]
struct Credentials {
    user: Identity,
    token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Immutable snapshot of the authentication state.
///
/// User and token live in one optional pair, so a session can never hold a
/// token without a user or the other way round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    credentials: Option<Credentials>,
    loading: bool,
}

impl Session {
    /// The logged-out state.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An authenticated session for `user` holding `token`.
    pub fn authenticated(user: Identity, token: impl Into<String>) -> Self {
        Self {
            credentials: Some(Credentials {
                user,
                token: token.into(),
            }),
            loading: false,
        }
    }

    pub fn user(&self) -> Option<&Identity> {
        self.credentials.as_ref().map(|c| &c.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn with_loading(&self, loading: bool) -> Self {
        Self {
            credentials: self.credentials.clone(),
            loading,
        }
    }
}
