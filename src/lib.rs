//! dnsdot: carry binary payloads inside DNS query names
//!
//! dnsdot turns an opaque byte payload into a syntactically valid DNS name
//! under a domain you own, and recovers the bytes from such a name. It is the
//! naming layer of a DNS overlay transport: the transport frames the name into
//! a query packet and ships it, dnsdot only decides what the name looks like.
//!
//! ## Pipeline
//!
//! ```text
//! payload ──▶ base32 ──▶ 63-char labels ──▶ + owned domain ──▶ FQDN
//!   bytes     SafeString   "AAAA.BBBB."        "AAAA.BBBB.t.tld."
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use dnsdot::{add_domain, dotify, remove_domain, undotify};
//!
//! # fn example() -> Result<(), dnsdot::DnsCodecError> {
//! let dotted = dotify(b"hello")?;
//! assert_eq!(dotted, "NBSWY3DP.");
//!
//! let fqdn = add_domain("tunnel.example.com", &dotted);
//! assert_eq!(fqdn, "NBSWY3DP.tunnel.example.com.");
//!
//! let payload = undotify(&remove_domain("tunnel.example.com", &fqdn))?;
//! assert_eq!(payload, b"hello");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! Or bind the domain once with [`DnsCodec`]:
//!
//! ```rust
//! use dnsdot::DnsCodec;
//!
//! let codec = DnsCodec::new("tunnel.example.com");
//! let fqdn = codec.encode_query(b"ping").unwrap();
//! assert_eq!(codec.decode_query(&fqdn).unwrap(), b"ping");
//! ```

pub mod base32;
pub mod codec;
pub mod config;
pub mod domain;
pub mod labels;

pub use codec::{max_payload_len, DnsCodec};
pub use config::CodecConfig;
pub use domain::{add_domain, remove_domain, strip_domain};
pub use labels::{
    dotify, dotify_with_limits, undotify, undotify_with_limits, NameLimits, MAX_LABEL_LEN,
    MAX_NAME_LEN,
};

/// dnsdot error types
#[derive(Debug, thiserror::Error)]
pub enum DnsCodecError {
    /// A name or encoded string violates the alphabet or label rules
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Payload does not fit in a single name
    #[error("Payload too large: {0} bytes (max: {1})")]
    PayloadTooLarge(usize, usize),

    /// Name does not end with the expected domain
    #[error("Name {fqdn:?} is not under domain {domain:?}")]
    DomainMismatch { fqdn: String, domain: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error("Config serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, DnsCodecError>;
