// DNS name codec bound to an owned domain
//
// Encodes payloads into query names (base32 in labels under the base
// domain) and decodes payloads back out of them

use crate::config::CodecConfig;
use crate::domain::{add_domain, remove_domain, strip_domain};
use crate::labels::{self, dotify_with_limits, undotify_with_limits, NameLimits, SEPARATOR};
use crate::{DnsCodecError, Result};
use log::debug;

/// DNS name codec for one base domain
#[derive(Debug, Clone)]
pub struct DnsCodec {
    /// Base domain (e.g., "tunnel.example.com"), stored without root dot
    base_domain: String,

    /// Label and name length limits
    limits: NameLimits,

    /// Reject names outside the base domain instead of decoding them whole
    strict_domain: bool,
}

impl DnsCodec {
    /// Create a codec with the default DNS limits
    pub fn new(base_domain: impl Into<String>) -> Self {
        Self::with_limits(base_domain, NameLimits::default())
    }

    /// Create a codec with custom limits
    pub fn with_limits(base_domain: impl Into<String>, limits: NameLimits) -> Self {
        let mut base_domain = base_domain.into();
        if base_domain.ends_with(SEPARATOR) {
            base_domain.pop();
        }

        Self {
            base_domain,
            limits,
            strict_domain: true,
        }
    }

    /// Create a codec from a validated configuration
    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        config.validate()?;

        let codec = Self::with_limits(config.domain.clone(), config.limits)
            .strict_domain(config.strict_domain);
        debug!(
            "DNS codec for {:?}: up to {} payload bytes per name",
            codec.base_domain,
            codec.max_payload_len()
        );

        Ok(codec)
    }

    /// Choose strict or fail-soft domain removal when decoding
    pub fn strict_domain(mut self, strict: bool) -> Self {
        self.strict_domain = strict;
        self
    }

    /// Encode a payload into a query name
    ///
    /// Format: `<base32 labels>.<base-domain>.`
    pub fn encode_query(&self, payload: &[u8]) -> Result<String> {
        let max = self.max_payload_len();
        if payload.len() > max {
            return Err(DnsCodecError::PayloadTooLarge(payload.len(), max));
        }

        let dotted = dotify_with_limits(payload, &self.limits)?;
        let fqdn = add_domain(&self.base_domain, &dotted);
        if labels::wire_len(&fqdn) > self.limits.max_name_len {
            return Err(DnsCodecError::PayloadTooLarge(payload.len(), max));
        }

        Ok(fqdn)
    }

    /// Decode a payload from a query name
    pub fn decode_query(&self, fqdn: &str) -> Result<Vec<u8>> {
        if self.strict_domain {
            let subdomain = strip_domain(&self.base_domain, fqdn)?;
            undotify_with_limits(subdomain, &self.limits)
        } else {
            undotify_with_limits(&remove_domain(&self.base_domain, fqdn), &self.limits)
        }
    }

    /// Largest payload `encode_query` accepts
    pub fn max_payload_len(&self) -> usize {
        max_payload_len(&self.base_domain, &self.limits)
    }

    /// Base domain without the root dot
    pub fn domain(&self) -> &str {
        &self.base_domain
    }

    pub fn limits(&self) -> &NameLimits {
        &self.limits
    }
}

/// Largest payload that fits in one name under `domain`
///
/// Returns 0 when the domain alone leaves no room.
pub fn max_payload_len(domain: &str, limits: &NameLimits) -> usize {
    let domain = domain.strip_suffix(SEPARATOR).unwrap_or(domain);
    let suffix_len = if domain.is_empty() { 0 } else { domain.len() + 1 };
    labels::capacity(suffix_len, limits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::wire_len;

    #[test]
    fn test_encode_decode_query() {
        let codec = DnsCodec::new("tunnel.example.com");
        let payload = b"Hello, DNS!";

        let fqdn = codec.encode_query(payload).unwrap();
        assert!(fqdn.ends_with(".tunnel.example.com."));

        let decoded = codec.decode_query(&fqdn).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_empty_payload() {
        let codec = DnsCodec::new("tunnel.example.com.");
        let fqdn = codec.encode_query(&[]).unwrap();
        assert_eq!(fqdn, "tunnel.example.com.");
        assert!(codec.decode_query(&fqdn).unwrap().is_empty());
    }

    #[test]
    fn test_max_sizes() {
        assert_eq!(max_payload_len("", &NameLimits::default()), 155);
        assert_eq!(max_payload_len("test.tld", &NameLimits::default()), 150);
        assert_eq!(max_payload_len("test.tld.", &NameLimits::default()), 150);

        let codec = DnsCodec::new("tunnel.example.com");
        let max = codec.max_payload_len();
        assert!(max > 0);

        let fqdn = codec.encode_query(&vec![0xeeu8; max]).unwrap();
        assert!(wire_len(&fqdn) <= labels::MAX_NAME_LEN);
    }

    #[test]
    fn test_packet_too_large() {
        let codec = DnsCodec::new("tunnel.example.com");
        let max = codec.max_payload_len();

        match codec.encode_query(&vec![0u8; max + 1]) {
            Err(DnsCodecError::PayloadTooLarge(len, limit)) => {
                assert_eq!(len, max + 1);
                assert_eq!(limit, max);
            }
            other => panic!("expected PayloadTooLarge, got {:?}", other),
        }
        assert!(codec.encode_query(&vec![0u8; 1000]).is_err());
    }

    #[test]
    fn test_domain_too_long_for_payload() {
        let limits = NameLimits {
            max_name_len: 20,
            ..NameLimits::default()
        };
        let codec = DnsCodec::with_limits("a-rather-long-domain.tld", limits);
        assert_eq!(codec.max_payload_len(), 0);
        assert!(matches!(
            codec.encode_query(&[]),
            Err(DnsCodecError::PayloadTooLarge(0, 0))
        ));
        assert!(matches!(
            codec.encode_query(b"x"),
            Err(DnsCodecError::PayloadTooLarge(1, 0))
        ));
    }

    #[test]
    fn test_strict_rejects_foreign_domain() {
        let codec = DnsCodec::new("test.tld");
        let foreign = add_domain("other.tld", &labels::dotify(b"data").unwrap());

        assert!(matches!(
            codec.decode_query(&foreign),
            Err(DnsCodecError::DomainMismatch { .. })
        ));
    }

    #[test]
    fn test_fail_soft_decodes_foreign_domain_as_labels() {
        let codec = DnsCodec::new("test.tld").strict_domain(false);
        let foreign = add_domain("other-zone.tld", &labels::dotify(b"data").unwrap());

        // The foreign domain labels are not base32
        assert!(matches!(
            codec.decode_query(&foreign),
            Err(DnsCodecError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_case_folded_query() {
        let codec = DnsCodec::new("Test.TLD");
        let fqdn = codec.encode_query(b"case").unwrap().to_ascii_lowercase();
        assert_eq!(codec.decode_query(&fqdn).unwrap(), b"case");
    }
}
