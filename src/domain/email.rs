//! EmailAddress value object.

use super::encoding::encode_component;
use super::errors::{EmailPartError, InvalidEmailError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An email address split into its local and domain parts.
///
/// Both parts are guaranteed non-empty. They are stored exactly as they
/// appeared in the input; no percent-decoding happens on the way in, while
/// [`Display`](fmt::Display) percent-encodes each part on the way out. An
/// input that already contains escapes is therefore not reproduced verbatim.
///
/// # Example
///
/// ```
/// use w3protocol_probe::domain::EmailAddress;
///
/// let email = EmailAddress::parse("alice@example.com").unwrap();
/// assert_eq!(email.local(), "alice");
/// assert_eq!(email.domain(), "example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress {
    local: String,
    domain: String,
}

impl EmailAddress {
    /// Parse a raw string into an EmailAddress.
    ///
    /// The string is split at the first '@'. Everything before it is the
    /// local part, everything after it is the domain part.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEmailError`] when there is no '@' or either part is
    /// empty. The error message contains `raw`.
    pub fn parse(raw: &str) -> Result<Self, InvalidEmailError> {
        Self::split(raw).map_err(|reason| InvalidEmailError::new(raw, reason))
    }

    fn split(raw: &str) -> Result<Self, EmailPartError> {
        let (local, domain) = raw
            .split_once('@')
            .ok_or(EmailPartError::MissingSeparator)?;

        if local.is_empty() {
            return Err(EmailPartError::MissingLocal(local.to_string()));
        }
        if domain.is_empty() {
            return Err(EmailPartError::MissingDomain(domain.to_string()));
        }

        Ok(Self {
            local: local.to_string(),
            domain: domain.to_string(),
        })
    }

    /// The part before the '@', as given.
    pub fn local(&self) -> &str {
        &self.local
    }

    /// The part after the first '@', as given.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// `local@domain` without any encoding.
    pub fn to_raw_string(&self) -> String {
        format!("{}@{}", self.local, self.domain)
    }
}

impl FromStr for EmailAddress {
    type Err = InvalidEmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = InvalidEmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = InvalidEmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

// Serde support - serialize the raw form so deserialization reproduces the value
impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_raw_string().serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::parse(&s).map_err(serde::de::Error::custom)
    }
}

// Display support - each part percent-encoded, separator left alone
impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}",
            encode_component(&self.local),
            encode_component(&self.domain)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        let email = EmailAddress::parse("alice@example.com").unwrap();
        assert_eq!(email.local(), "alice");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_email_rejects_missing_parts() {
        for raw in ["bad-input", "@example.com", "alice@", "@", ""] {
            let err = EmailAddress::parse(raw).unwrap_err();
            assert!(
                err.to_string().contains(raw),
                "message {:?} should mention {:?}",
                err.to_string(),
                raw
            );
            assert_eq!(err.input(), raw);
        }
    }

    #[test]
    fn test_email_failure_reasons() {
        assert_eq!(
            EmailAddress::parse("bad-input").unwrap_err().reason(),
            &EmailPartError::MissingSeparator
        );
        assert!(matches!(
            EmailAddress::parse("@example.com").unwrap_err().reason(),
            EmailPartError::MissingLocal(_)
        ));
        assert!(matches!(
            EmailAddress::parse("alice@").unwrap_err().reason(),
            EmailPartError::MissingDomain(_)
        ));
    }

    #[test]
    fn test_email_splits_at_first_at_sign() {
        let email = EmailAddress::parse("a@b@c").unwrap();
        assert_eq!(email.local(), "a");
        assert_eq!(email.domain(), "b@c");
    }

    #[test]
    fn test_email_keeps_raw_parts() {
        let email = EmailAddress::parse("a%20b@example.com").unwrap();
        assert_eq!(email.local(), "a%20b");
    }

    #[test]
    fn test_email_display_percent_encodes_parts() {
        let email = EmailAddress::parse("a b@ex ample.com").unwrap();
        assert_eq!(email.to_string(), "a%20b@ex%20ample.com");

        let plain = EmailAddress::parse("alice@example.com").unwrap();
        assert_eq!(plain.to_string(), "alice@example.com");
    }

    #[test]
    fn test_email_display_is_not_idempotent_on_escaped_input() {
        let email = EmailAddress::parse("a%20b@example.com").unwrap();
        assert_eq!(email.to_string(), "a%2520b@example.com");
    }

    #[test]
    fn test_email_plus_tag_encoded() {
        let email = EmailAddress::parse("user+tag@example.co.uk").unwrap();
        assert_eq!(email.to_string(), "user%2Btag@example.co.uk");
    }

    #[test]
    fn test_email_display_leaves_unreserved_marks() {
        let email = EmailAddress::parse("o'brien(work)!@example.com").unwrap();
        assert_eq!(email.to_string(), "o'brien(work)!@example.com");

        let starred = EmailAddress::parse("a*b~c@ex-ample_1.com").unwrap();
        assert_eq!(starred.to_string(), "a*b~c@ex-ample_1.com");
    }

    #[test]
    fn test_email_display_encodes_non_ascii() {
        let email = EmailAddress::parse("josé@example.com").unwrap();
        assert_eq!(email.to_string(), "jos%C3%A9@example.com");
    }

    #[test]
    fn test_email_from_str_and_try_from() {
        let a: EmailAddress = "alice@example.com".parse().unwrap();
        let b = EmailAddress::try_from("alice@example.com").unwrap();
        let c = EmailAddress::try_from("alice@example.com".to_string()).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(EmailAddress::try_from("nope").is_err());
    }

    #[test]
    fn test_email_serialization() {
        let email = EmailAddress::parse("a b@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"a b@example.com\"");
    }

    #[test]
    fn test_email_deserialization() {
        let email: EmailAddress = serde_json::from_str("\"user@example.com\"").unwrap();
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_email_deserialization_invalid_fails() {
        let result: Result<EmailAddress, _> = serde_json::from_str("\"invalid\"");
        assert!(result.is_err());
    }
}
