//! Password-credential authentication against the central authenticator.

use crate::error::{OAuthError, OAuthResult};
use portico_core::{Authenticator, Principal};
use portico_federation::FederatedCredential;
use std::sync::Arc;

/// Role marker attached to every principal authenticated through this
/// provider. No role is derived from the authenticator's own data.
pub const SSO_USER_ROLE: &str = "sso:user";

/// A credential presented to the token-issuance layer.
///
/// A dispatcher hands each presentation to its providers in turn; a provider
/// that does not handle the kind passes it through.
#[derive(Debug, Clone)]
pub enum TokenCredential {
    /// Resource-owner username/password pair (RFC 6749 §4.3).
    Password { username: String, password: String },
    /// A federated assertion already verified upstream.
    Assertion(FederatedCredential),
}

/// A successfully authenticated presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Authentication {
    pub principal: Principal,
    pub roles: Vec<String>,
}

/// Authenticates username/password presentations by delegating to the
/// central authenticator.
#[derive(Clone)]
pub struct SsoAuthenticationProvider {
    authenticator: Arc<dyn Authenticator>,
}

impl SsoAuthenticationProvider {
    #[must_use]
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Authenticate a presented credential.
    ///
    /// Returns `Ok(None)` for credential kinds this provider does not
    /// handle, so a dispatcher can try other providers. An empty password is
    /// rejected before the authenticator is contacted. Every authenticator
    /// failure is translated into the uniform
    /// [`OAuthError::InvalidCredentials`]; callers cannot distinguish an
    /// unknown principal from a bad secret.
    pub async fn authenticate(
        &self,
        credential: &TokenCredential,
    ) -> OAuthResult<Option<Authentication>> {
        let TokenCredential::Password { username, password } = credential else {
            return Ok(None);
        };

        if password.is_empty() {
            tracing::warn!(username = %username, "rejected credential with empty secret");
            return Err(OAuthError::InvalidCredentials { reason: None });
        }

        match self.authenticator.authenticate(username, password).await {
            Ok(principal) => Ok(Some(Authentication {
                principal,
                roles: vec![SSO_USER_ROLE.to_string()],
            })),
            Err(err) => {
                tracing::warn!(username = %username, error = %err, "authentication failed");
                Err(OAuthError::InvalidCredentials {
                    reason: Some(err.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use portico_core::AuthenticationError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls so tests can assert the authenticator was not contacted.
    #[derive(Default)]
    struct CountingAuthenticator {
        calls: AtomicUsize,
        reject: bool,
    }

    #[async_trait]
    impl Authenticator for CountingAuthenticator {
        async fn authenticate(
            &self,
            username: &str,
            _password: &str,
        ) -> Result<Principal, AuthenticationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.reject {
                Err(AuthenticationError::new("authentication failed"))
            } else {
                Ok(Principal::new(username))
            }
        }
    }

    fn password_credential(username: &str, password: &str) -> TokenCredential {
        TokenCredential::Password {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_successful_authentication_attaches_fixed_role() {
        let provider =
            SsoAuthenticationProvider::new(Arc::new(CountingAuthenticator::default()));

        let authentication = provider
            .authenticate(&password_credential("alice", "correct horse"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(authentication.principal.name, "alice");
        assert_eq!(authentication.roles, vec![SSO_USER_ROLE.to_string()]);
    }

    #[tokio::test]
    async fn test_empty_password_rejected_without_contacting_authenticator() {
        let authenticator = Arc::new(CountingAuthenticator::default());
        let provider = SsoAuthenticationProvider::new(authenticator.clone());

        let err = provider
            .authenticate(&password_credential("alice", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, OAuthError::InvalidCredentials { .. }));
        assert_eq!(authenticator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_authenticator_failure_translated_uniformly() {
        let provider = SsoAuthenticationProvider::new(Arc::new(CountingAuthenticator {
            calls: AtomicUsize::new(0),
            reject: true,
        }));

        let err = provider
            .authenticate(&password_credential("alice", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "invalid credentials");
        assert!(matches!(
            err,
            OAuthError::InvalidCredentials { reason: Some(r) } if r == "authentication failed"
        ));
    }

    #[tokio::test]
    async fn test_unhandled_credential_kind_passes_through() {
        let authenticator = Arc::new(CountingAuthenticator::default());
        let provider = SsoAuthenticationProvider::new(authenticator.clone());

        let assertion = TokenCredential::Assertion(
            FederatedCredential::builder()
                .id("_42")
                .retrieved_on(Utc::now())
                .build(),
        );

        assert!(provider.authenticate(&assertion).await.unwrap().is_none());
        assert_eq!(authenticator.calls.load(Ordering::SeqCst), 0);
    }
}
