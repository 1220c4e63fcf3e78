//! DNS-safe base32 text encoding (RFC 4648)
//!
//! Every 5 input bits map to one of `A-Z2-7`, and the final group is padded
//! with `=` to a multiple of 8 characters so the exact byte count survives.
//! None of these symbols is the label separator `.` or a hyphen.

use crate::{DnsCodecError, Result};
use data_encoding::BASE32;

/// Padding symbol closing a short final group
pub const PADDING: char = '=';

/// Encode bytes to padded upper-case base32
///
/// Empty input encodes to the empty string.
pub fn encode(data: &[u8]) -> String {
    BASE32.encode(data)
}

/// Decode padded base32 back to bytes
///
/// Lower-case symbols are accepted since resolvers may rewrite the case of
/// query names. Anything outside the alphabet, a length that is not a whole
/// number of 8-character groups, or a padding run anywhere but the very end
/// is rejected.
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    let normalized = encoded.to_ascii_uppercase();
    let data_len = normalized.trim_end_matches(PADDING).len();
    if let Some(offset) = normalized[..data_len].find(PADDING) {
        return Err(DnsCodecError::MalformedInput(format!(
            "padding before end of input at offset {}",
            offset
        )));
    }

    BASE32.decode(normalized.as_bytes()).map_err(|e| {
        DnsCodecError::MalformedInput(format!(
            "base32 decode failed at offset {}: {}",
            e.position, e.kind
        ))
    })
}

/// Number of characters `encode` produces for `len` input bytes
pub fn encoded_len(len: usize) -> usize {
    BASE32.encode_len(len)
}

/// Whether `c` can appear in encoded output (either case)
pub fn is_symbol(c: char) -> bool {
    matches!(c, 'A'..='Z' | 'a'..='z' | '2'..='7') || c == PADDING
}
