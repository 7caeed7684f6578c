//! `did:mailto` identifiers.
//!
//! See <https://github.com/ucan-wg/did-mailto/> for the method.

use super::email::EmailAddress;
use super::encoding::encode_component;
use serde::{Serialize, Serializer};
use std::fmt;

/// Method prefix of every rendered identifier.
pub const DID_MAILTO_PREFIX: &str = "did:mailto:";

/// A `did:mailto` identifier for an email address.
///
/// Construction does not validate; feed it parts of a parsed
/// [`EmailAddress`] unless the caller already trusts its input.
///
/// # Example
///
/// ```
/// use w3protocol_probe::domain::{DidMailto, EmailAddress};
///
/// let email = EmailAddress::parse("alice@example.com").unwrap();
/// assert_eq!(DidMailto::from_email(&email).to_did(), "did:mailto:example.com:alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DidMailto {
    domain: String,
    local: String,
}

impl DidMailto {
    /// Build from raw parts. Note the domain comes first.
    pub fn new(domain: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            local: local.into(),
        }
    }

    pub fn from_email(email: &EmailAddress) -> Self {
        Self::new(email.domain(), email.local())
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    /// Render as `did:mailto:<domain>:<local>` with both parts percent-encoded.
    pub fn to_did(&self) -> String {
        format!(
            "{}{}:{}",
            DID_MAILTO_PREFIX,
            encode_component(&self.domain),
            encode_component(&self.local)
        )
    }
}

impl From<&EmailAddress> for DidMailto {
    fn from(email: &EmailAddress) -> Self {
        Self::from_email(email)
    }
}

impl From<EmailAddress> for DidMailto {
    fn from(email: EmailAddress) -> Self {
        Self::from_email(&email)
    }
}

impl fmt::Display for DidMailto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_did())
    }
}

// Serialized as the rendered identifier, which is what payloads carry
impl Serialize for DidMailto {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_did().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_did_from_email() {
        let email = EmailAddress::parse("alice@example.com").unwrap();
        let did = DidMailto::from_email(&email);
        assert_eq!(did.domain(), "example.com");
        assert_eq!(did.local(), "alice");
        assert_eq!(did.to_did(), "did:mailto:example.com:alice");
    }

    #[test]
    fn test_did_new_takes_domain_first() {
        let did = DidMailto::new("example.com", "alice");
        assert_eq!(did.to_did(), "did:mailto:example.com:alice");
    }

    #[test]
    fn test_did_percent_encodes_each_part() {
        let did = DidMailto::new("ex ample.com", "a b");
        assert_eq!(did.to_did(), "did:mailto:ex%20ample.com:a%20b");
    }

    #[test]
    fn test_did_encodes_colons_inside_parts() {
        let did = DidMailto::new("host:8080", "x:y");
        assert_eq!(did.to_did(), "did:mailto:host%3A8080:x%3Ay");
    }

    #[test]
    fn test_did_leaves_unreserved_marks() {
        let email = EmailAddress::parse("o'brien(work)!@example.com").unwrap();
        assert_eq!(
            DidMailto::from_email(&email).to_did(),
            "did:mailto:example.com:o'brien(work)!"
        );
        assert_eq!(
            DidMailto::new("ex-ample_1.com", "a*b~c").to_did(),
            "did:mailto:ex-ample_1.com:a*b~c"
        );
    }

    #[test]
    fn test_did_rendering_is_idempotent() {
        let did = DidMailto::new("example.com", "a+b");
        let first = did.to_did();
        assert_eq!(first, did.to_did());
        assert_eq!(first, did.to_string());
    }

    #[test]
    fn test_did_from_conversions() {
        let email = EmailAddress::parse("bob@web3.storage").unwrap();
        let by_ref: DidMailto = (&email).into();
        let by_value: DidMailto = email.into();
        assert_eq!(by_ref, by_value);
    }

    #[test]
    fn test_did_new_does_not_validate() {
        assert_eq!(DidMailto::new("", "").to_did(), "did:mailto::");
    }

    #[test]
    fn test_did_serializes_as_string() {
        let did = DidMailto::new("example.com", "alice");
        let json = serde_json::to_string(&did).unwrap();
        assert_eq!(json, "\"did:mailto:example.com:alice\"");
    }
}
