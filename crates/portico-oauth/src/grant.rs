//! RFC 6749 grant-type vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The grant types defined by RFC 6749, with their exact wire names.
///
/// Which of these a deployment accepts is configuration injected into
/// [`ClientDirectory`](crate::ClientDirectory), shared by every client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    AuthorizationCode,
    Password,
    ClientCredentials,
    RefreshToken,
}

impl GrantType {
    /// The RFC 6749 token for this grant type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GrantType::AuthorizationCode => "authorization_code",
            GrantType::Password => "password",
            GrantType::ClientCredentials => "client_credentials",
            GrantType::RefreshToken => "refresh_token",
        }
    }
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
