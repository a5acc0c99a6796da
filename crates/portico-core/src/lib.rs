//! portico core library.
//!
//! Shared contracts for the portico trust-binding layer: the session ticket
//! model and the read-only views this core takes over its externally owned
//! collaborators.
//!
//! # Modules
//!
//! - [`ticket`] - Session tickets and the [`TicketRegistry`] snapshot contract
//! - [`registry`] - Trusted relying parties and the [`ServiceRegistry`] contract
//! - [`authn`] - The central [`Authenticator`] contract and verified [`Principal`]
//!
//! # Example
//!
//! ```
//! use portico_core::{Ticket, TicketKind};
//!
//! let ticket = Ticket::new("alice", 7200, TicketKind::InteractiveLogin);
//! assert_eq!(ticket.owner, "alice");
//! assert!(!ticket.is_expired());
//! ```

pub mod authn;
pub mod registry;
pub mod ticket;

// Re-export main types for convenient access
pub use authn::{AuthenticationError, Authenticator, Principal, StaticAuthenticator};
pub use registry::{InMemoryServiceRegistry, RegisteredService, ServiceRegistry};
pub use ticket::{InMemoryTicketRegistry, Ticket, TicketKind, TicketRegistry};
