//! Formatted ed25519 signer keys.
//!
//! Registered spaces are handed to the harness as the formatted signer
//! string produced by the service's client libraries: multibase `M`
//! (padded base64) over
//!
//! ```text
//! [0x80, 0x26] ++ secret[32] ++ [0xed, 0x01] ++ public[32]
//! ```
//!
//! Only the public half is retained. Signing is done by the external
//! invocation layer, which receives the original formatted string.

use super::errors::SignerParseError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use std::str::FromStr;

/// Varint multicodec tag for `ed25519-priv` (0x1300).
const PRIVATE_TAG: [u8; 2] = [0x80, 0x26];

/// Varint multicodec tag for `ed25519-pub` (0xed).
const PUBLIC_TAG: [u8; 2] = [0xed, 0x01];

const KEY_SIZE: usize = 32;
const ARCHIVE_SIZE: usize = 2 + KEY_SIZE + 2 + KEY_SIZE;

/// The signer identity of a registered space.
#[derive(Clone, PartialEq, Eq)]
pub struct SpaceSigner {
    formatted: String,
    public_key: [u8; KEY_SIZE],
}

impl SpaceSigner {
    /// Parse a formatted signer string.
    ///
    /// # Errors
    ///
    /// Returns [`SignerParseError`] when the multibase prefix, base64
    /// payload, length or either multicodec tag is wrong.
    pub fn parse(formatted: &str) -> Result<Self, SignerParseError> {
        let mut chars = formatted.chars();
        let prefix = chars.next();
        if prefix != Some('M') {
            return Err(SignerParseError::UnsupportedMultibase(prefix));
        }

        let bytes = STANDARD
            .decode(chars.as_str())
            .map_err(|e| SignerParseError::InvalidBase64(e.to_string()))?;

        if bytes.len() != ARCHIVE_SIZE {
            return Err(SignerParseError::InvalidLength {
                expected: ARCHIVE_SIZE,
                actual: bytes.len(),
            });
        }

        let private_tag = [bytes[0], bytes[1]];
        if private_tag != PRIVATE_TAG {
            return Err(SignerParseError::InvalidTag {
                part: "private",
                tag: private_tag,
            });
        }

        let offset = 2 + KEY_SIZE;
        let public_tag = [bytes[offset], bytes[offset + 1]];
        if public_tag != PUBLIC_TAG {
            return Err(SignerParseError::InvalidTag {
                part: "public",
                tag: public_tag,
            });
        }

        let mut public_key = [0u8; KEY_SIZE];
        public_key.copy_from_slice(&bytes[offset + 2..]);

        Ok(Self {
            formatted: formatted.to_string(),
            public_key,
        })
    }

    /// The raw ed25519 public key.
    pub fn public_key(&self) -> &[u8; KEY_SIZE] {
        &self.public_key
    }

    /// The `did:key` of this signer.
    pub fn did(&self) -> String {
        let mut tagged = Vec::with_capacity(2 + KEY_SIZE);
        tagged.extend_from_slice(&PUBLIC_TAG);
        tagged.extend_from_slice(&self.public_key);
        format!("did:key:z{}", bs58::encode(tagged).into_string())
    }

    /// The formatted string this signer was parsed from, for handing to the
    /// invocation layer.
    pub fn formatted(&self) -> &str {
        &self.formatted
    }
}

impl FromStr for SpaceSigner {
    type Err = SignerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Secret material stays out of logs
impl fmt::Debug for SpaceSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceSigner")
            .field("did", &self.did())
            .finish_non_exhaustive()
    }
}
