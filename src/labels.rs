//! Label chopping: base32 text <-> dotted DNS labels
//!
//! `dotify` encodes a payload and cuts the text into labels of at most
//! `max_label_len` characters. Every label carries its own terminating `.`,
//! so a non-empty result always ends with the separator and can be prefixed
//! directly onto a domain. `undotify` reverses it.
//!
//! ```text
//! 40 bytes ─▶ 64 base32 chars ─▶ "<63 chars>.<1 char>."
//! ```

use crate::{base32, DnsCodecError, Result};
use serde::{Deserialize, Serialize};

/// Maximum octets in a single label (RFC 1035)
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum octets in a name, wire format (RFC 1035)
pub const MAX_NAME_LEN: usize = 255;

/// Label separator
pub const SEPARATOR: char = '.';

/// Length limits applied to generated names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameLimits {
    /// Longest label emitted or accepted
    pub max_label_len: usize,

    /// Longest complete name, counted in uncompressed wire octets
    pub max_name_len: usize,
}

impl Default for NameLimits {
    fn default() -> Self {
        Self {
            max_label_len: MAX_LABEL_LEN,
            max_name_len: MAX_NAME_LEN,
        }
    }
}

impl NameLimits {
    /// Check the limits stay inside what DNS can carry
    pub fn validate(&self) -> Result<()> {
        if self.max_label_len == 0 || self.max_label_len > MAX_LABEL_LEN {
            return Err(DnsCodecError::InvalidConfig(format!(
                "max_label_len must be between 1 and {}, got {}",
                MAX_LABEL_LEN, self.max_label_len
            )));
        }
        if self.max_name_len == 0 || self.max_name_len > MAX_NAME_LEN {
            return Err(DnsCodecError::InvalidConfig(format!(
                "max_name_len must be between 1 and {}, got {}",
                MAX_NAME_LEN, self.max_name_len
            )));
        }
        Ok(())
    }
}

/// Wire-format length of a presentation name
///
/// Each label costs its length plus one length octet, and the root label
/// costs one more. A trailing `.` is optional. Escapes are not interpreted.
pub fn wire_len(name: &str) -> usize {
    let name = name.strip_suffix(SEPARATOR).unwrap_or(name);
    if name.is_empty() {
        1
    } else {
        name.len() + 2
    }
}

/// Characters `dotify` produces for a payload of `payload_len` bytes
pub fn dotted_len(payload_len: usize, limits: &NameLimits) -> usize {
    let encoded = base32::encoded_len(payload_len);
    encoded + encoded.div_ceil(limits.max_label_len.max(1))
}

/// Wire length of `dotify(payload)` followed by `suffix_len` presentation
/// characters (the domain and its closing dot)
pub(crate) fn name_wire_len(payload_len: usize, suffix_len: usize, limits: &NameLimits) -> usize {
    let text = dotted_len(payload_len, limits) + suffix_len;
    if text == 0 {
        1
    } else {
        text + 1
    }
}

/// Largest payload whose name, with `suffix_len` characters appended, fits
/// `limits.max_name_len`
pub(crate) fn capacity(suffix_len: usize, limits: &NameLimits) -> usize {
    let mut len = 0;
    while name_wire_len(len + 1, suffix_len, limits) <= limits.max_name_len {
        len += 1;
    }
    len
}

/// Encode a payload as dotted labels under the default limits
pub fn dotify(payload: &[u8]) -> Result<String> {
    dotify_with_limits(payload, &NameLimits::default())
}

/// Encode a payload as dotted labels
///
/// # Errors
///
/// `PayloadTooLarge` if the dotted name would exceed `limits.max_name_len`,
/// `InvalidConfig` if the limits themselves are out of range.
pub fn dotify_with_limits(payload: &[u8], limits: &NameLimits) -> Result<String> {
    limits.validate()?;

    let encoded = base32::encode(payload);
    let dotted = chop(&encoded, limits.max_label_len);

    if wire_len(&dotted) > limits.max_name_len {
        return Err(DnsCodecError::PayloadTooLarge(
            payload.len(),
            capacity(0, limits),
        ));
    }

    Ok(dotted)
}

/// Decode dotted labels under the default limits
pub fn undotify(dotted: &str) -> Result<Vec<u8>> {
    undotify_with_limits(dotted, &NameLimits::default())
}

/// Decode dotted labels back into the payload
///
/// The empty string (or a lone `.`) decodes to an empty payload. A missing
/// trailing `.` is tolerated.
///
/// # Errors
///
/// `MalformedInput` on an empty label, a label longer than
/// `limits.max_label_len`, or joined text that is not valid base32.
pub fn undotify_with_limits(dotted: &str, limits: &NameLimits) -> Result<Vec<u8>> {
    limits.validate()?;

    let body = dotted.strip_suffix(SEPARATOR).unwrap_or(dotted);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let mut encoded = String::with_capacity(body.len());
    for (index, label) in body.split(SEPARATOR).enumerate() {
        if label.is_empty() {
            return Err(DnsCodecError::MalformedInput(format!(
                "empty label at position {}",
                index
            )));
        }
        if label.len() > limits.max_label_len {
            return Err(DnsCodecError::MalformedInput(format!(
                "label {} is {} octets (max: {})",
                index,
                label.len(),
                limits.max_label_len
            )));
        }
        encoded.push_str(label);
    }

    base32::decode(&encoded)
}

/// Split text into `.`-terminated labels of at most `max_label_len` chars
fn chop(encoded: &str, max_label_len: usize) -> String {
    let mut dotted = String::with_capacity(encoded.len() + encoded.len() / max_label_len + 1);
    let mut rest = encoded;

    // base32 text is ASCII, so any index is a char boundary
    while !rest.is_empty() {
        let (label, tail) = rest.split_at(max_label_len.min(rest.len()));
        dotted.push_str(label);
        dotted.push(SEPARATOR);
        rest = tail;
    }

    dotted
}
