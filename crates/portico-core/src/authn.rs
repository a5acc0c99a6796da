//! Central-authenticator contract.
//!
//! The authenticator that turns a username/password pair into a verified
//! principal runs in the same server process; this core calls it directly
//! rather than over HTTP, so no session ticket is created by the call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// A verified principal identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Principal identity, unique within the server.
    pub name: String,
    /// Attributes released by the authenticator, claim name to values.
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl Principal {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }
}

/// Authentication failure.
///
/// The message is uniform across failure modes so that callers cannot tell
/// an unknown user from a wrong password.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AuthenticationError {
    pub message: String,
}

impl AuthenticationError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The central authenticator consumed by this core.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify a username/password pair and return the principal it belongs
    /// to.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Principal, AuthenticationError>;
}

/// Authenticator over a fixed username/password map.
///
/// Reference implementation for tests and small deployments.
#[derive(Debug, Default)]
pub struct StaticAuthenticator {
    users: HashMap<String, String>,
}

impl StaticAuthenticator {
    #[must_use]
    pub fn new(users: HashMap<String, String>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Principal, AuthenticationError> {
        match self.users.get(username) {
            Some(expected) if expected == password => Ok(Principal::new(username)),
            _ => {
                tracing::warn!(username = %username, "authentication rejected");
                Err(AuthenticationError::new("authentication failed"))
            }
        }
    }
}
