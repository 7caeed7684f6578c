//! Percent-encoding of address and identifier components.

use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode, NON_ALPHANUMERIC};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped, the same
/// set JavaScript's `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode one component. Non-ASCII text is escaped byte by byte
/// from its UTF-8 form, with uppercase hex digits.
pub fn encode_component(input: &str) -> PercentEncode<'_> {
    utf8_percent_encode(input, COMPONENT)
}
