//! Domain value objects and types.
//!
//! Email addresses, the `did:mailto` identifiers derived from them, and the
//! signer identity of a registered space. These are plain immutable values;
//! validation happens once, at construction time.

pub mod did_mailto;
pub mod email;
pub mod encoding;
pub mod errors;
pub mod signer;

pub use did_mailto::{DidMailto, DID_MAILTO_PREFIX};
pub use email::EmailAddress;
pub use encoding::encode_component;
pub use errors::{EmailPartError, InvalidEmailError, SignerParseError};
pub use signer::SpaceSigner;
