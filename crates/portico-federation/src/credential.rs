//! Federated credentials and their trust decision.
//!
//! A [`FederatedCredential`] is the normalized form of an identity assertion
//! whose signature has already been verified upstream. Claims supplied by the
//! remote issuer are optional because the parsed assertion may lack them;
//! a missing required claim makes the credential invalid, never a panic.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A normalized, already-parsed identity assertion.
///
/// Immutable once validation begins: [`is_valid`](Self::is_valid) reads but
/// never mutates. Not persisted; consumed once per presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FederatedCredential {
    /// Assertion identifier.
    pub id: String,
    /// Entity that issued the assertion.
    pub issuer: Option<String>,
    /// Party the assertion was issued to.
    pub audience: Option<String>,
    /// How the remote issuer authenticated the subject.
    pub authentication_method: Option<String>,
    /// Start of the validity window. Must not exceed `not_on_or_after` when
    /// both are present.
    pub not_before: Option<DateTime<Utc>>,
    /// End of the validity window.
    pub not_on_or_after: Option<DateTime<Utc>>,
    /// When the issuer claims to have issued the assertion.
    pub issued_on: Option<DateTime<Utc>>,
    /// When this server received the assertion. All temporal checks compare
    /// against this receipt time, not a live clock read, so a decision is
    /// reproducible for a given credential.
    pub retrieved_on: DateTime<Utc>,
    /// Released claims, name to values.
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl FederatedCredential {
    /// Start building a credential.
    #[must_use]
    pub fn builder() -> FederatedCredentialBuilder {
        FederatedCredentialBuilder::default()
    }

    /// Decide whether this credential is trustworthy for the given audience
    /// and issuer under the configured clock-skew tolerance.
    ///
    /// All checks must pass:
    ///
    /// - audience and issuer match exactly;
    /// - the receipt time lies within `[not_before - skew,
    ///   not_on_or_after + skew]`, bounds inclusive;
    /// - `issued_on` is within `skew` of the receipt time in either
    ///   direction, so an assertion issued long before receipt is rejected
    ///   as a replay even while its validity window is still open.
    ///
    /// A missing required claim fails the corresponding check. Rejections
    /// return `false` and log the failed check; they are expected traffic,
    /// not errors.
    #[must_use]
    pub fn is_valid(
        &self,
        expected_audience: &str,
        expected_issuer: &str,
        clock_skew: Duration,
    ) -> bool {
        if self.audience.as_deref() != Some(expected_audience) {
            tracing::warn!(
                id = %self.id,
                audience = ?self.audience,
                expected = %expected_audience,
                "credential audience is invalid"
            );
            return false;
        }

        if self.issuer.as_deref() != Some(expected_issuer) {
            tracing::warn!(
                id = %self.id,
                issuer = ?self.issuer,
                expected = %expected_issuer,
                "credential issuer is invalid"
            );
            return false;
        }

        let (Some(not_before), Some(not_on_or_after), Some(issued_on)) =
            (self.not_before, self.not_on_or_after, self.issued_on)
        else {
            tracing::warn!(id = %self.id, "credential is missing validity claims");
            return false;
        };

        if self.retrieved_on < not_before - clock_skew {
            tracing::warn!(
                id = %self.id,
                not_before = %not_before,
                retrieved_on = %self.retrieved_on,
                "credential is not yet valid"
            );
            return false;
        }

        if self.retrieved_on > not_on_or_after + clock_skew {
            tracing::warn!(
                id = %self.id,
                not_on_or_after = %not_on_or_after,
                retrieved_on = %self.retrieved_on,
                "credential validity window has passed"
            );
            return false;
        }

        if issued_on < self.retrieved_on - clock_skew {
            tracing::warn!(
                id = %self.id,
                issued_on = %issued_on,
                retrieved_on = %self.retrieved_on,
                "credential was issued longer before receipt than the allowed drift"
            );
            return false;
        }

        if issued_on > self.retrieved_on + clock_skew {
            tracing::warn!(
                id = %self.id,
                issued_on = %issued_on,
                retrieved_on = %self.retrieved_on,
                "credential was issued after receipt beyond the allowed drift"
            );
            return false;
        }

        tracing::debug!(id = %self.id, "credential is valid");
        true
    }
}

fn claim(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn instant(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(
        || "-".to_string(),
        |t| t.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

impl fmt::Display for FederatedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ID={},Issuer={},Audience={},Authentication Method={},Issued On={},Valid After={},Valid Before={},Attributes={{",
            self.id,
            claim(self.issuer.as_deref()),
            claim(self.audience.as_deref()),
            claim(self.authentication_method.as_deref()),
            instant(self.issued_on),
            instant(self.not_before),
            instant(self.not_on_or_after),
        )?;
        for (i, (name, values)) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, values.join("|"))?;
        }
        f.write_str("}]")
    }
}

/// Builder for [`FederatedCredential`].
#[derive(Debug, Default)]
pub struct FederatedCredentialBuilder {
    id: Option<String>,
    issuer: Option<String>,
    audience: Option<String>,
    authentication_method: Option<String>,
    not_before: Option<DateTime<Utc>>,
    not_on_or_after: Option<DateTime<Utc>>,
    issued_on: Option<DateTime<Utc>>,
    retrieved_on: Option<DateTime<Utc>>,
    attributes: BTreeMap<String, Vec<String>>,
}

impl FederatedCredentialBuilder {
    /// Set the assertion identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the issuer.
    #[must_use]
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the audience.
    #[must_use]
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Set the remote authentication method.
    #[must_use]
    pub fn authentication_method(mut self, method: impl Into<String>) -> Self {
        self.authentication_method = Some(method.into());
        self
    }

    /// Set the start of the validity window.
    #[must_use]
    pub fn not_before(mut self, instant: DateTime<Utc>) -> Self {
        self.not_before = Some(instant);
        self
    }

    /// Set the end of the validity window.
    #[must_use]
    pub fn not_on_or_after(mut self, instant: DateTime<Utc>) -> Self {
        self.not_on_or_after = Some(instant);
        self
    }

    /// Set the claimed issuance time.
    #[must_use]
    pub fn issued_on(mut self, instant: DateTime<Utc>) -> Self {
        self.issued_on = Some(instant);
        self
    }

    /// Set the local receipt time. Defaults to the build time.
    #[must_use]
    pub fn retrieved_on(mut self, instant: DateTime<Utc>) -> Self {
        self.retrieved_on = Some(instant);
        self
    }

    /// Add a released attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.attributes.insert(name.into(), values);
        self
    }

    /// Build the credential.
    #[must_use]
    pub fn build(self) -> FederatedCredential {
        FederatedCredential {
            id: self.id.unwrap_or_default(),
            issuer: self.issuer,
            audience: self.audience,
            authentication_method: self.authentication_method,
            not_before: self.not_before,
            not_on_or_after: self.not_on_or_after,
            issued_on: self.issued_on,
            retrieved_on: self.retrieved_on.unwrap_or_else(Utc::now),
            attributes: self.attributes,
        }
    }
}
