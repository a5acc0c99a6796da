//! Session-bound OAuth2 token issuance for portico.
//!
//! This crate turns already-established trust into access tokens:
//!
//! - [`ClientDirectory`] projects trusted relying parties into OAuth client
//!   records
//! - [`SsoAuthenticationProvider`] authenticates username/password
//!   presentations against the central authenticator
//! - [`TicketTokenEnhancer`] rewrites an issued [`AccessToken`] so that its
//!   value and expiry mirror the principal's live interactive session
//!
//! Protocol-level authorization-code and refresh-token flows live elsewhere;
//! this crate only covers the trust-binding pieces they are built on.
//!
//! # Example
//!
//! ```rust,ignore
//! use portico_oauth::{AccessToken, TicketTokenEnhancer};
//!
//! let enhancer = TicketTokenEnhancer::new(ticket_registry);
//! let token = enhancer.enhance(template, "alice").await;
//! // token.value is now alice's session id; revoking the session revokes
//! // the token.
//! ```

mod client;
mod error;
mod grant;
mod provider;
mod token;

pub use client::{ClientDirectory, ClientRecord};
pub use error::{OAuthError, OAuthResult};
pub use grant::GrantType;
pub use provider::{Authentication, SsoAuthenticationProvider, TokenCredential, SSO_USER_ROLE};
pub use token::{AccessToken, TicketTokenEnhancer};
