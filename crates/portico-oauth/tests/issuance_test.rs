//! End-to-end issuance flow over the in-memory collaborators: authenticate a
//! password presentation, look the relying party up, then bind the issued
//! token to the principal's live session.

use chrono::{Duration, Utc};
use portico_core::{
    InMemoryServiceRegistry, InMemoryTicketRegistry, RegisteredService, StaticAuthenticator,
    Ticket, TicketKind,
};
use portico_oauth::{
    AccessToken, ClientDirectory, GrantType, OAuthError, SsoAuthenticationProvider,
    TicketTokenEnhancer, TokenCredential, SSO_USER_ROLE,
};
use std::collections::HashMap;
use std::sync::Arc;

struct IssuanceContext {
    directory: ClientDirectory,
    provider: SsoAuthenticationProvider,
    enhancer: TicketTokenEnhancer,
    tickets: Arc<InMemoryTicketRegistry>,
}

async fn context() -> IssuanceContext {
    let services = InMemoryServiceRegistry::new();
    services
        .register(RegisteredService::new("portal", "portal client secret"))
        .await;

    let tickets = Arc::new(InMemoryTicketRegistry::new());

    IssuanceContext {
        directory: ClientDirectory::new(
            Arc::new(services),
            vec![GrantType::Password, GrantType::RefreshToken],
        ),
        provider: SsoAuthenticationProvider::new(Arc::new(StaticAuthenticator::new(
            HashMap::from([("alice".to_string(), "correct horse".to_string())]),
        ))),
        enhancer: TicketTokenEnhancer::new(tickets.clone()),
        tickets,
    }
}

fn password(username: &str, password: &str) -> TokenCredential {
    TokenCredential::Password {
        username: username.to_string(),
        password: password.to_string(),
    }
}

fn template() -> AccessToken {
    AccessToken::new("unbound-template", Utc::now() + Duration::seconds(300))
}

#[tokio::test]
async fn test_full_issuance_binds_token_to_live_session() {
    let ctx = context().await;

    // Interactive login an hour old, two-hour lifetime.
    let mut session = Ticket::new("alice", 7200, TicketKind::InteractiveLogin);
    session.created_at = Utc::now() - Duration::seconds(3600);
    let session_id = session.id.clone();
    ctx.tickets.register(session).await;

    let client = ctx.directory.lookup("portal").await.unwrap();
    assert_eq!(client.client_secret, "portal client secret");

    let authentication = ctx
        .provider
        .authenticate(&password("alice", "correct horse"))
        .await
        .unwrap()
        .expect("password presentations are handled by this provider");
    assert_eq!(authentication.roles, vec![SSO_USER_ROLE.to_string()]);

    let token = ctx
        .enhancer
        .enhance(template(), &authentication.principal.name)
        .await;

    assert_eq!(token.value, session_id);
    assert!((3599..=3600).contains(&token.expires_in_secs));
}

#[tokio::test]
async fn test_issuance_without_session_degrades_to_plain_token() {
    let ctx = context().await;

    let authentication = ctx
        .provider
        .authenticate(&password("alice", "correct horse"))
        .await
        .unwrap()
        .unwrap();

    let template = template();
    let token = ctx
        .enhancer
        .enhance(template.clone(), &authentication.principal.name)
        .await;

    assert_eq!(token, template);
}

#[tokio::test]
async fn test_session_revocation_invalidates_the_binding_point() {
    let ctx = context().await;

    let session = Ticket::new("alice", 7200, TicketKind::InteractiveLogin);
    let session_id = session.id.clone();
    ctx.tickets.register(session).await;

    let bound = ctx.enhancer.enhance(template(), "alice").await;
    assert_eq!(bound.value, session_id);

    // The owning subsystem revokes the session; later issuance no longer
    // finds it and degrades to the template.
    assert!(ctx.tickets.remove(&session_id).await);
    let after = ctx.enhancer.enhance(template(), "alice").await;
    assert_eq!(after.value, "unbound-template");
}

#[tokio::test]
async fn test_bad_password_is_a_uniform_rejection() {
    let ctx = context().await;

    let err = ctx
        .provider
        .authenticate(&password("alice", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid credentials");

    let err = ctx
        .provider
        .authenticate(&password("nobody", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid credentials");
}

#[tokio::test]
async fn test_unknown_client_rejects_issuance() {
    let ctx = context().await;

    let err = ctx.directory.lookup("unknown-client").await.unwrap_err();
    assert!(matches!(err, OAuthError::ClientNotFound(_)));
}
