//! Attach and detach the owned base domain
//!
//! A well-formed subdomain is either empty or ends in `.` (which is what
//! `dotify` produces). For those, `remove_domain(d, &add_domain(d, s)) == s`.

use crate::labels::SEPARATOR;
use crate::{DnsCodecError, Result};

/// Append `domain` to `subdomain`, producing a dot-terminated FQDN
///
/// An empty domain passes the subdomain through unchanged. A trailing `.`
/// on the domain is ignored, and a subdomain missing its terminating `.`
/// gets one so labels never run together.
///
/// ```
/// use dnsdot::add_domain;
///
/// assert_eq!(add_domain("domain.tld", "subdomain."), "subdomain.domain.tld.");
/// assert_eq!(add_domain("", "subdomain."), "subdomain.");
/// ```
pub fn add_domain(domain: &str, subdomain: &str) -> String {
    let domain = trim_root(domain);
    if domain.is_empty() {
        return subdomain.to_string();
    }

    let mut fqdn = String::with_capacity(subdomain.len() + domain.len() + 2);
    fqdn.push_str(subdomain);
    if !subdomain.is_empty() && !subdomain.ends_with(SEPARATOR) {
        fqdn.push(SEPARATOR);
    }
    fqdn.push_str(domain);
    fqdn.push(SEPARATOR);
    fqdn
}

/// Strip `domain` from the end of `fqdn`, returning the subdomain
///
/// Fail-soft: if `fqdn` is not under `domain` it is returned whole. Use
/// [`strip_domain`] when the caller needs to know.
pub fn remove_domain(domain: &str, fqdn: &str) -> String {
    strip_domain(domain, fqdn).unwrap_or(fqdn).to_string()
}

/// Strip `domain` from the end of `fqdn`, failing if it is not there
///
/// The match is ASCII case-insensitive and must fall on a label boundary.
/// The trailing root `.` on `fqdn` is optional. The returned subdomain keeps
/// its terminating `.`, or is empty when `fqdn` is the domain itself.
///
/// # Errors
///
/// `DomainMismatch` if `fqdn` does not end with `domain`.
pub fn strip_domain<'a>(domain: &str, fqdn: &'a str) -> Result<&'a str> {
    let domain = trim_root(domain);
    if domain.is_empty() {
        return Ok(fqdn);
    }

    let mismatch = || DnsCodecError::DomainMismatch {
        fqdn: fqdn.to_string(),
        domain: domain.to_string(),
    };

    let name = trim_root(fqdn);
    let split = name
        .len()
        .checked_sub(domain.len())
        .filter(|&split| name.is_char_boundary(split))
        .ok_or_else(mismatch)?;

    let (prefix, tail) = name.split_at(split);
    if !tail.eq_ignore_ascii_case(domain) {
        return Err(mismatch());
    }
    if !prefix.is_empty() && !prefix.ends_with(SEPARATOR) {
        return Err(mismatch());
    }

    Ok(prefix)
}

fn trim_root(name: &str) -> &str {
    name.strip_suffix(SEPARATOR).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove_table() {
        let cases = [
            ("", "", ""),
            ("", "subdomain.", "subdomain."),
            ("domain", "subdomain.", "subdomain.domain."),
            ("domain.tld", "subdomain.", "subdomain.domain.tld."),
            (
                "domain.tld",
                "subsubdomain.subdomain.",
                "subsubdomain.subdomain.domain.tld.",
            ),
        ];

        for (domain, subdomain, fqdn) in cases {
            assert_eq!(add_domain(domain, subdomain), fqdn);
            assert_eq!(remove_domain(domain, fqdn), subdomain);
        }
    }

    #[test]
    fn test_domain_trailing_dot_normalized() {
        assert_eq!(add_domain("domain.tld.", "sub."), "sub.domain.tld.");
        assert_eq!(remove_domain("domain.tld.", "sub.domain.tld."), "sub.");
    }

    #[test]
    fn test_empty_subdomain_with_domain() {
        assert_eq!(add_domain("test.tld", ""), "test.tld.");
        assert_eq!(remove_domain("test.tld", "test.tld."), "");
    }

    #[test]
    fn test_unterminated_subdomain_gets_separator() {
        assert_eq!(add_domain("domain", "sub"), "sub.domain.");
    }

    #[test]
    fn test_strip_without_root_dot() {
        assert_eq!(strip_domain("domain.tld", "sub.domain.tld").unwrap(), "sub.");
    }

    #[test]
    fn test_strip_case_insensitive() {
        assert_eq!(strip_domain("Test.TLD", "ABC.test.tld.").unwrap(), "ABC.");
    }

    #[test]
    fn test_strip_mismatch() {
        assert!(matches!(
            strip_domain("test.tld", "sub.other.tld."),
            Err(DnsCodecError::DomainMismatch { .. })
        ));
        assert!(strip_domain("test.tld", "tld.").is_err());
    }

    #[test]
    fn test_strip_respects_label_boundary() {
        assert!(strip_domain("domain", "sub.xdomain.").is_err());
    }

    #[test]
    fn test_remove_domain_fail_soft() {
        assert_eq!(remove_domain("test.tld", "sub.other.tld."), "sub.other.tld.");
    }
}
