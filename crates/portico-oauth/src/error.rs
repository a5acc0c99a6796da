//! Error types for token issuance.

use thiserror::Error;

/// Result type for issuance operations.
pub type OAuthResult<T> = Result<T, OAuthError>;

/// Issuance failures surfaced to the token layer.
#[derive(Debug, Clone, Error)]
pub enum OAuthError {
    /// No registered relying party matches the presented client id. The
    /// message may echo the caller-provided id, never registry contents.
    #[error("client not found: {0}")]
    ClientNotFound(String),

    /// The presented credentials were rejected. The rendered message is
    /// deliberately uniform; `reason` holds the upstream detail for logs
    /// and must never reach a caller.
    #[error("invalid credentials")]
    InvalidCredentials { reason: Option<String> },
}
