//! Domain validation errors.

use thiserror::Error;

/// Which part of an email address was unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailPartError {
    /// There is no '@' to split on.
    #[error("email address must contain '@'")]
    MissingSeparator,

    /// Nothing before the first '@'.
    #[error("local part of email address is required, but got {0:?}")]
    MissingLocal(String),

    /// Nothing after the first '@'.
    #[error("domain part of email address is required, but got {0:?}")]
    MissingDomain(String),
}

/// Returned when a string cannot be parsed as an [`EmailAddress`](super::EmailAddress).
///
/// The message always includes the offending input so configuration
/// validation can report exactly which value failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unable to create EmailAddress from {input}")]
pub struct InvalidEmailError {
    input: String,
    #[source]
    reason: EmailPartError,
}

impl InvalidEmailError {
    pub(crate) fn new(input: impl Into<String>, reason: EmailPartError) -> Self {
        Self {
            input: input.into(),
            reason,
        }
    }

    /// The raw string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The specific reason parsing failed.
    pub fn reason(&self) -> &EmailPartError {
        &self.reason
    }
}

/// Errors that can occur when parsing formatted signer key material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerParseError {
    /// The multibase prefix is not 'M' (base64 with padding).
    #[error("unsupported multibase prefix {0:?}, expected 'M'")]
    UnsupportedMultibase(Option<char>),

    /// The payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),

    /// The decoded key has the wrong size.
    #[error("expected {expected} bytes of key material, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A multicodec tag did not match ed25519.
    #[error("unexpected {part} key multicodec tag {tag:02x?}")]
    InvalidTag { part: &'static str, tag: [u8; 2] },
}
