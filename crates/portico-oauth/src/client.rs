//! Relying-party to OAuth-client projection.
//!
//! The server has no separate client concept: a relying party registered in
//! the service registry *is* the client. The projection convention is
//! `client_id` = service name, `client_secret` = service description. The
//! caveat is that access cannot be restricted per client, only to users
//! presenting credentials for a registered one.

use crate::error::{OAuthError, OAuthResult};
use crate::grant::GrantType;
use portico_core::ServiceRegistry;
use serde::Serialize;
use std::sync::Arc;

/// Client view over a service-registry entry.
///
/// Exists for a given id exactly when a matching registry entry exists at
/// lookup time; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRecord {
    pub client_id: String,
    pub client_secret: String,
    /// Deployment-wide grant-type set; identical for every client and kept
    /// separate from per-client registry data.
    pub authorized_grant_types: Vec<GrantType>,
}

/// Looks up relying-party issuance credentials in the injected registry.
#[derive(Clone)]
pub struct ClientDirectory {
    registry: Arc<dyn ServiceRegistry>,
    authorized_grant_types: Vec<GrantType>,
}

impl ClientDirectory {
    #[must_use]
    pub fn new(registry: Arc<dyn ServiceRegistry>, authorized_grant_types: Vec<GrantType>) -> Self {
        Self {
            registry,
            authorized_grant_types,
        }
    }

    /// Project the registry entry named `client_id` into a [`ClientRecord`].
    ///
    /// Re-scans the registry on every call; the first matching entry in
    /// enumeration order wins.
    ///
    /// # Errors
    ///
    /// [`OAuthError::ClientNotFound`] when no entry's name equals
    /// `client_id`.
    pub async fn lookup(&self, client_id: &str) -> OAuthResult<ClientRecord> {
        tracing::debug!(client_id = %client_id, "looking up client");

        for service in self.registry.all_services().await {
            if service.name == client_id {
                return Ok(ClientRecord {
                    client_id: client_id.to_string(),
                    client_secret: service.description,
                    authorized_grant_types: self.authorized_grant_types.clone(),
                });
            }
        }

        Err(OAuthError::ClientNotFound(client_id.to_string()))
    }
}
