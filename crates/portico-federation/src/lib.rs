//! Federated assertion handling for portico.
//!
//! This crate decides whether an externally issued, already-verified
//! identity assertion should be trusted: exact audience and issuer matching
//! plus time-window validation under a configured clock-skew tolerance.
//! Parsing and signature verification happen upstream; what arrives here is
//! the normalized [`FederatedCredential`].
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use portico_federation::FederatedCredential;
//!
//! let now = Utc::now();
//! let credential = FederatedCredential::builder()
//!     .id("_6257b2bf")
//!     .issuer("http://idp.example.com/trust")
//!     .audience("urn:federation:portico")
//!     .not_before(now)
//!     .not_on_or_after(now + Duration::hours(1))
//!     .issued_on(now)
//!     .retrieved_on(now)
//!     .build();
//!
//! assert!(credential.is_valid(
//!     "urn:federation:portico",
//!     "http://idp.example.com/trust",
//!     Duration::milliseconds(2000),
//! ));
//! ```

mod credential;

pub use credential::{FederatedCredential, FederatedCredentialBuilder};
