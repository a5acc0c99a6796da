//! Session tickets and the registry contract they are enumerated through.
//!
//! A [`Ticket`] is the server-side record of an already-authenticated login
//! with its own independent lifetime. The registry that owns tickets lives
//! outside this core; consumers read it through the snapshot contract of
//! [`TicketRegistry`].

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// What kind of login produced a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketKind {
    /// Created by an interactive end-user login.
    InteractiveLogin,
    /// Granted to a proxying service acting on behalf of a user.
    ProxyGranted,
}

/// A centrally managed authentication session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Opaque, globally unique session identifier.
    pub id: String,
    /// Identity of the principal that owns this session.
    pub owner: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Configured maximum lifetime in seconds.
    pub max_lifetime_secs: i64,
    /// Session kind; lifetime-derived consumers filter on this tag.
    pub kind: TicketKind,
}

impl Ticket {
    /// Create a ticket with a freshly generated identifier.
    #[must_use]
    pub fn new(owner: impl Into<String>, max_lifetime_secs: i64, kind: TicketKind) -> Self {
        Self {
            id: format!("TGT-{}", Uuid::new_v4()),
            owner: owner.into(),
            created_at: Utc::now(),
            max_lifetime_secs,
            kind,
        }
    }

    /// Absolute expiry: creation time plus the configured maximum lifetime.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::seconds(self.max_lifetime_secs)
    }

    /// Whether the configured lifetime has elapsed.
    ///
    /// Advisory only. Expired tickets may still be enumerated until the
    /// owning subsystem reaps them, so presence in the registry is not proof
    /// of liveness; consumers deriving lifetimes recompute the remainder
    /// themselves.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at()
    }
}

/// Read-only view over the externally owned session index.
///
/// Implementations return an owned snapshot so that enumeration tolerates
/// concurrent insertion and removal by the owning subsystem; callers never
/// hold a lock across the scan.
#[async_trait]
pub trait TicketRegistry: Send + Sync {
    /// Snapshot of the currently registered tickets, in the registry's
    /// natural enumeration order.
    async fn all_tickets(&self) -> Vec<Ticket>;
}

/// In-memory ticket registry.
///
/// Reference implementation for tests and embedding. Enumeration order is
/// insertion order.
#[derive(Debug, Default)]
pub struct InMemoryTicketRegistry {
    tickets: RwLock<Vec<Ticket>>,
}

impl InMemoryTicketRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a ticket.
    pub async fn register(&self, ticket: Ticket) {
        tracing::debug!(ticket_id = %ticket.id, owner = %ticket.owner, "ticket registered");
        self.tickets.write().await.push(ticket);
    }

    /// Remove a ticket by id. Returns whether a ticket was removed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut tickets = self.tickets.write().await;
        let before = tickets.len();
        tickets.retain(|t| t.id != id);
        let removed = tickets.len() < before;
        if removed {
            tracing::debug!(ticket_id = %id, "ticket removed");
        }
        removed
    }
}

#[async_trait]
impl TicketRegistry for InMemoryTicketRegistry {
    async fn all_tickets(&self) -> Vec<Ticket> {
        self.tickets.read().await.clone()
    }
}
