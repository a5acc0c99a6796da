//! Session-bound access tokens.
//!
//! An issued access token does not get an independent lifetime: its value is
//! the identifier of the interactive session it is bound to, and its expiry
//! mirrors that session's remaining lifetime. The two trust domains then
//! share a single revocation point: revoking the session invalidates the
//! token.

use chrono::{DateTime, Duration, Utc};
use portico_core::{Ticket, TicketKind, TicketRegistry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An issued access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Bearer value. For a bound token this is the backing ticket's id.
    pub value: String,
    /// Absolute expiry. May lie in the past when the backing ticket has
    /// already outlived its configured lifetime; rejecting such a token is
    /// the redeemer's job, not the issuer's.
    pub expires_at: DateTime<Utc>,
    /// Whole seconds until expiry at construction time, clamped at zero.
    pub expires_in_secs: i64,
}

impl AccessToken {
    /// Token with an explicit value and expiry, as produced by the generic
    /// issuance step that runs before binding.
    #[must_use]
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            value: value.into(),
            expires_at,
            expires_in_secs: (expires_at - now).num_seconds().max(0),
        }
    }

    /// Token bound to `ticket`: value is the ticket id, expiry is the
    /// ticket's remaining lifetime.
    ///
    /// A single clock read feeds both fields, so `expires_at - now` and
    /// `expires_in_secs` agree to within rounding. A ticket past its
    /// configured lifetime yields a past `expires_at` and zero
    /// `expires_in_secs` rather than an error.
    #[must_use]
    pub fn for_ticket(ticket: &Ticket) -> Self {
        let now = Utc::now();
        let remaining = Duration::seconds(ticket.max_lifetime_secs) - (now - ticket.created_at);
        Self {
            value: ticket.id.clone(),
            expires_at: now + remaining,
            expires_in_secs: remaining.num_seconds().max(0),
        }
    }
}

/// Rewrites an issued token to mirror the live session of its principal.
#[derive(Clone)]
pub struct TicketTokenEnhancer {
    tickets: Arc<dyn TicketRegistry>,
}

impl TicketTokenEnhancer {
    #[must_use]
    pub fn new(tickets: Arc<dyn TicketRegistry>) -> Self {
        Self { tickets }
    }

    /// Bind `token` to the first interactive session owned by `principal`.
    ///
    /// Scans a snapshot of the registry in its natural order, skipping
    /// proxy-granted sessions. When several interactive sessions exist for
    /// one principal the first encountered wins; the enumeration order is
    /// the registry's, so the choice is not deterministic across registry
    /// implementations. Without a match the token is returned unchanged;
    /// binding is an enhancement, not a requirement for issuance.
    ///
    /// Neither the registry nor its tickets are mutated.
    pub async fn enhance(&self, token: AccessToken, principal: &str) -> AccessToken {
        let tickets = self.tickets.all_tickets().await;
        tracing::debug!(count = tickets.len(), "scanning ticket registry");

        for ticket in tickets {
            if ticket.kind != TicketKind::InteractiveLogin {
                continue;
            }
            if ticket.owner == principal {
                tracing::debug!(
                    ticket_id = %ticket.id,
                    principal = %principal,
                    "binding access token to ticket"
                );
                return AccessToken::for_ticket(&ticket);
            }
        }

        tracing::debug!(principal = %principal, "no interactive session found, token left unbound");
        token
    }
}
