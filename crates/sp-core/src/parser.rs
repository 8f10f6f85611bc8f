//! Textual pattern grammar
//!
//! `[scheme "://"] host [":" port] [path]`, or `*` for the universal pattern.
//! A host of `*` or a `[*.]` prefix sets the domain wildcard, `*` as scheme or
//! port sets the matching wildcard, and `/*` is the file path wildcard.
//!
//! ```
//! use sp_core::Pattern;
//!
//! assert_eq!(Pattern::from_string("[*.]Google.COM").to_string(), "[*.]google.com");
//! assert_eq!(Pattern::from_string("HTTPS://*:443").to_string(), "https://*:443");
//! assert_eq!(Pattern::from_string("file:///*").to_string(), "file:///*");
//! ```

use crate::builder::build;
use crate::pattern::Pattern;
use crate::types::{PatternParts, ValidationMode, EXTENSION_SCHEME, FILE_SCHEME};

pub const WILDCARD: &str = "*";
pub const DOMAIN_WILDCARD: &str = "[*.]";
pub const SCHEME_SEPARATOR: &str = "://";
pub const PORT_SEPARATOR: char = ':';
pub const PATH_SEPARATOR: char = '/';

/// Parse a pattern spec and build it under `mode`.
pub fn parse(spec: &str, mode: ValidationMode) -> Pattern {
    match parse_parts(spec) {
        Some(parts) => build(&parts, mode),
        None => {
            log::debug!("malformed pattern spec {spec:?}");
            Pattern::invalid()
        }
    }
}

/// Split a spec into raw, uncanonicalized parts.
///
/// Returns `None` for specs that are malformed regardless of validation mode:
/// a `*` inside a host, a non-numeric port, an unterminated `[`, or nothing
/// after the scheme separator.
pub fn parse_parts(spec: &str) -> Option<PatternParts> {
    let mut parts = PatternParts::default();

    if spec == WILDCARD {
        parts.is_scheme_wildcard = true;
        parts.has_domain_wildcard = true;
        parts.is_port_wildcard = true;
        return Some(parts);
    }

    if spec.is_empty() {
        return Some(parts);
    }

    let (scheme, rest) = match spec.find(SCHEME_SEPARATOR) {
        Some(pos) => (&spec[..pos], &spec[pos + SCHEME_SEPARATOR.len()..]),
        None => ("", spec),
    };
    if rest.is_empty() {
        return None;
    }

    // Skip over "[*.]" and IPv6 literals before looking for separators,
    // both contain characters that would otherwise end the host.
    let bracket_end = if rest.starts_with('[') { rest.find(']')? } else { 0 };
    let authority_end = rest[bracket_end..]
        .find(PATH_SEPARATOR)
        .map_or(rest.len(), |i| bracket_end + i);
    let (authority, path) = rest.split_at(authority_end);
    let (host, port) = match authority[bracket_end..].find(PORT_SEPARATOR) {
        Some(i) => (&authority[..bracket_end + i], &authority[bracket_end + i + 1..]),
        None => (authority, ""),
    };

    if scheme.is_empty() || scheme == WILDCARD {
        parts.is_scheme_wildcard = true;
    } else {
        parts.scheme = scheme.to_string();
    }

    if host == WILDCARD {
        parts.has_domain_wildcard = true;
    } else if let Some(domain) = host.strip_prefix(DOMAIN_WILDCARD) {
        parts.has_domain_wildcard = true;
        parts.host = domain.to_string();
    } else if host.contains('*') {
        return None;
    } else {
        parts.host = host.to_string();
    }

    if port == WILDCARD {
        parts.is_port_wildcard = true;
    } else if !port.is_empty() {
        // TODO: reject ports above 65535 once persisted data has been checked for them
        if !port.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        parts.port = port.to_string();
    } else if !scheme.eq_ignore_ascii_case(EXTENSION_SCHEME) && !scheme.eq_ignore_ascii_case(FILE_SCHEME) {
        parts.is_port_wildcard = true;
    }

    if path.strip_prefix(PATH_SEPARATOR) == Some(WILDCARD) {
        parts.is_path_wildcard = true;
    } else {
        parts.path = path.to_string();
    }

    Some(parts)
}

/// Serialize canonical parts in their most compact form.
pub fn to_string(parts: &PatternParts) -> String {
    if parts.is_scheme_wildcard && parts.has_domain_wildcard && parts.host.is_empty() && parts.is_port_wildcard {
        return WILDCARD.to_string();
    }

    let mut out = String::new();
    if !parts.is_scheme_wildcard {
        out.push_str(&parts.scheme);
        out.push_str(SCHEME_SEPARATOR);
    }

    if parts.scheme == FILE_SCHEME {
        if parts.is_path_wildcard {
            out.push(PATH_SEPARATOR);
            out.push_str(WILDCARD);
        } else {
            out.push_str(&parts.path);
        }
        return out;
    }

    if parts.has_domain_wildcard {
        out.push_str(if parts.host.is_empty() { WILDCARD } else { DOMAIN_WILDCARD });
    }
    out.push_str(&parts.host);

    if parts.scheme == EXTENSION_SCHEME {
        if parts.path.is_empty() {
            out.push(PATH_SEPARATOR);
        } else {
            out.push_str(&parts.path);
        }
        return out;
    }

    if !parts.is_port_wildcard {
        out.push(PORT_SEPARATOR);
        out.push_str(&parts.port);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(spec: &str) -> PatternParts {
        parse_parts(spec).expect("spec should split")
    }

    #[test]
    fn test_universal() {
        let p = parts("*");
        assert!(p.is_scheme_wildcard && p.has_domain_wildcard && p.is_port_wildcard);
        assert!(p.host.is_empty());
    }

    #[test]
    fn test_host_only() {
        let p = parts("[*.]google.com");
        assert!(p.is_scheme_wildcard);
        assert!(p.has_domain_wildcard);
        assert_eq!(p.host, "google.com");
        assert!(p.is_port_wildcard);
    }

    #[test]
    fn test_full_spec() {
        let p = parts("https://www.google.com:443/some/path");
        assert_eq!(p.scheme, "https");
        assert_eq!(p.host, "www.google.com");
        assert_eq!(p.port, "443");
        assert!(!p.is_port_wildcard);
        assert_eq!(p.path, "/some/path");
    }

    #[test]
    fn test_wildcards() {
        let p = parts("*://*:*");
        assert!(p.is_scheme_wildcard && p.has_domain_wildcard && p.is_port_wildcard);

        let empty_port = parts("http://a.com:");
        assert!(empty_port.is_port_wildcard);
    }

    #[test]
    fn test_ipv6() {
        let p = parts("http://[::1]:8080");
        assert_eq!(p.host, "[::1]");
        assert_eq!(p.port, "8080");

        let p = parts("[2001:db8::1]");
        assert_eq!(p.host, "[2001:db8::1]");
        assert!(p.is_port_wildcard);
    }

    #[test]
    fn test_file_and_extension() {
        let p = parts("file:///tmp/test.html");
        assert_eq!(p.scheme, "file");
        assert!(p.host.is_empty());
        assert_eq!(p.path, "/tmp/test.html");
        assert!(!p.is_port_wildcard);

        let p = parts("file:///*");
        assert!(p.is_path_wildcard);
        assert!(p.path.is_empty());

        let p = parts("chrome-extension://abcdef/");
        assert_eq!(p.host, "abcdef");
        assert_eq!(p.path, "/");
        assert!(!p.is_port_wildcard);
    }

    #[test]
    fn test_malformed() {
        assert!(parse_parts("goo*gle.com").is_none());
        assert!(parse_parts("http://a.com:8o").is_none());
        assert!(parse_parts("http://").is_none());
        assert!(parse_parts("[*.google.com").is_none());
        assert!(!parse("goo*gle.com", ValidationMode::Strict).is_valid());
    }

    #[test]
    fn test_to_string() {
        let cases = [
            ("*", "*"),
            ("[*.]google.com", "[*.]google.com"),
            ("https://[*.]google.com:443", "https://[*.]google.com:443"),
            ("http://www.google.com:80/ignored", "http://www.google.com:80"),
            ("https://*", "https://*"),
            ("*:8080", "*:8080"),
            ("file:///tmp/a.html", "file:///tmp/a.html"),
            ("chrome-extension://abcdef", "chrome-extension://abcdef/"),
            ("http://[::1]:8080", "http://[::1]:8080"),
        ];
        for (spec, expected) in cases {
            let pattern = parse(spec, ValidationMode::Strict);
            assert!(pattern.is_valid(), "{spec}");
            assert_eq!(pattern.to_string(), expected, "{spec}");
        }
    }

    #[test]
    fn test_legacy_grammar() {
        assert!(parse("[*.]google.com", ValidationMode::Legacy).is_valid());
        assert!(parse("file:///", ValidationMode::Legacy).is_valid());
        assert!(!parse("http://google.com", ValidationMode::Legacy).is_valid());
        assert!(!parse("file:///", ValidationMode::Strict).is_valid());
    }
}
