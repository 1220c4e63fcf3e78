//! dnsdot configuration

use crate::labels::{NameLimits, SEPARATOR};
use crate::{codec, DnsCodecError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Codec configuration
///
/// ```toml
/// domain = "tunnel.example.com"
/// strict_domain = true
///
/// [limits]
/// max_label_len = 63
/// max_name_len = 255
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Owned base domain; empty means bare dotted payloads
    pub domain: String,

    /// Label and name length limits
    pub limits: NameLimits,

    /// Refuse to decode names outside `domain`
    pub strict_domain: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            limits: NameLimits::default(),
            strict_domain: true,
        }
    }
}

impl CodecConfig {
    /// Configuration for `domain` with default limits
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!("Loaded codec config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.limits.validate()?;

        let domain = self
            .domain
            .strip_suffix(SEPARATOR)
            .unwrap_or(&self.domain);
        if !domain.is_empty() {
            for label in domain.split(SEPARATOR) {
                validate_domain_label(label, self.limits.max_label_len)?;
            }
        }

        if codec::max_payload_len(domain, &self.limits) == 0 {
            return Err(DnsCodecError::InvalidConfig(format!(
                "domain {:?} leaves no room for payload within {} octets",
                domain, self.limits.max_name_len
            )));
        }

        Ok(())
    }
}

fn validate_domain_label(label: &str, max_label_len: usize) -> Result<()> {
    if label.is_empty() {
        return Err(DnsCodecError::InvalidConfig(
            "domain contains an empty label".to_string(),
        ));
    }
    if label.len() > max_label_len {
        return Err(DnsCodecError::InvalidConfig(format!(
            "domain label {:?} exceeds {} octets",
            label, max_label_len
        )));
    }
    if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(DnsCodecError::InvalidConfig(format!(
            "domain label {:?} contains characters outside [A-Za-z0-9-]",
            label
        )));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(DnsCodecError::InvalidConfig(format!(
            "domain label {:?} starts or ends with a hyphen",
            label
        )));
    }
    Ok(())
}
