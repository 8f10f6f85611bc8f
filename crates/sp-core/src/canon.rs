//! Canonicalization of raw pattern parts
//!
//! Normalizes scheme case, host form and file paths so that equivalent
//! patterns share one representation before validation.

use url::{Host, Url};

use crate::types::{PatternParts, FILE_SCHEME};
use crate::url::trim_ending_dot;

/// Canonical form of a host string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonHost {
    /// Serialized host, IPv6 literals in brackets
    pub host: String,
    pub is_ip_address: bool,
}

/// Run a raw host through WHATWG host canonicalization.
///
/// Returns `None` when the host cannot be canonicalized (empty input,
/// forbidden code points, IDNA failure).
pub fn canonicalize_host(raw: &str) -> Option<CanonHost> {
    let host = Host::parse(raw).ok()?;
    let is_ip_address = matches!(host, Host::Ipv4(_) | Host::Ipv6(_));
    Some(CanonHost {
        host: host.to_string(),
        is_ip_address,
    })
}

/// Canonicalize a `file` pattern path through URL path normalization.
/// An unparsable path canonicalizes to the empty string.
pub fn canonicalize_file_path(path: &str) -> String {
    match Url::parse(&format!("{FILE_SCHEME}://{path}")) {
        Ok(url) => url.path().to_string(),
        Err(_) => String::new(),
    }
}

/// Canonicalize pattern parts.
///
/// Returns `None` when the parts cannot be canonicalized: a domain wildcard
/// on an IP literal has no sub-domains to match.
pub fn canonicalize(parts: &PatternParts) -> Option<PatternParts> {
    let mut out = parts.clone();

    out.scheme = parts.scheme.to_ascii_lowercase();

    if out.scheme == FILE_SCHEME && !out.is_path_wildcard {
        out.path = canonicalize_file_path(&parts.path);
    }

    let canon = canonicalize_host(&parts.host);
    if parts.has_domain_wildcard && canon.as_ref().is_some_and(|c| c.is_ip_address) {
        return None;
    }

    out.host = match canon {
        // '*' never survives as part of a host
        Some(c) if !parts.host.contains('*') => trim_ending_dot(&c.host).to_string(),
        _ => String::new(),
    };

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_parts(host: &str, wildcard: bool) -> PatternParts {
        PatternParts {
            scheme: "HTTP".to_string(),
            host: host.to_string(),
            has_domain_wildcard: wildcard,
            is_port_wildcard: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_lowercases_scheme_and_host() {
        let parts = canonicalize(&host_parts("WWW.Example.COM", false)).unwrap();
        assert_eq!(parts.scheme, "http");
        assert_eq!(parts.host, "www.example.com");
    }

    #[test]
    fn test_strips_trailing_dot() {
        let parts = canonicalize(&host_parts("example.com.", true)).unwrap();
        assert_eq!(parts.host, "example.com");
    }

    #[test]
    fn test_idna_host() {
        let parts = canonicalize(&host_parts("bücher.de", false)).unwrap();
        assert_eq!(parts.host, "xn--bcher-kva.de");
    }

    #[test]
    fn test_wildcard_host_becomes_empty() {
        assert_eq!(canonicalize(&host_parts("goo*gle.com", false)).unwrap().host, "");
        assert_eq!(canonicalize(&host_parts("", true)).unwrap().host, "");
    }

    #[test]
    fn test_ip_literal_hosts() {
        let parts = canonicalize(&host_parts("192.168.1.1", false)).unwrap();
        assert_eq!(parts.host, "192.168.1.1");

        let parts = canonicalize(&host_parts("[0:0::1]", false)).unwrap();
        assert_eq!(parts.host, "[::1]");

        assert!(canonicalize(&host_parts("192.168.1.1", true)).is_none());
        assert!(canonicalize(&host_parts("[::1]", true)).is_none());
    }

    #[test]
    fn test_file_path() {
        let parts = PatternParts {
            scheme: "file".to_string(),
            path: "/tmp/../tmp/test.html".to_string(),
            ..Default::default()
        };
        assert_eq!(canonicalize(&parts).unwrap().path, "/tmp/test.html");
        assert_eq!(canonicalize_file_path("/a b"), "/a%20b");
    }

    #[test]
    fn test_file_path_wildcard_untouched() {
        let parts = PatternParts {
            scheme: "file".to_string(),
            is_path_wildcard: true,
            ..Default::default()
        };
        assert_eq!(canonicalize(&parts).unwrap().path, "");
    }
}
