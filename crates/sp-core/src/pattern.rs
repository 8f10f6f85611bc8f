//! Immutable site patterns
//!
//! A [`Pattern`] is either valid, carrying canonical [`PatternParts`], or the
//! single invalid value. The invalid pattern matches nothing, prints as the
//! empty string and is identical to every other invalid pattern.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use url::Url;

use crate::builder::Builder;
use crate::compare::Relation;
use crate::parser;
use crate::types::{PatternParts, ValidationMode, FILE_SCHEME, HTTPS_SCHEME, HTTP_SCHEME};
use crate::url::{default_port, effective_url, host_is_ip_address, host_str};

#[derive(Debug, Clone)]
enum Repr {
    Valid(PatternParts),
    Invalid,
}

/// An immutable, canonical site pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    repr: Repr,
}

impl Pattern {
    /// The invalid pattern.
    pub const fn invalid() -> Self {
        Self { repr: Repr::Invalid }
    }

    /// Wrap parts that already went through canonicalization and validation.
    pub(crate) fn from_canonical(parts: PatternParts) -> Self {
        Self {
            repr: Repr::Valid(parts),
        }
    }

    /// Pattern matching every URL.
    pub fn wildcard() -> Self {
        Builder::new()
            .with_scheme_wildcard()
            .with_domain_wildcard()
            .with_port_wildcard()
            .with_path_wildcard()
            .build()
    }

    /// Parse a pattern with the current grammar.
    pub fn from_string(spec: &str) -> Self {
        parser::parse(spec, ValidationMode::Strict)
    }

    /// Parse a pattern persisted by the legacy grammar.
    pub fn legacy_from_string(spec: &str) -> Self {
        parser::parse(spec, ValidationMode::Legacy)
    }

    /// Derive a pattern covering the site of `url`.
    ///
    /// http URLs match any scheme on the domain and its sub-domains, https
    /// URLs keep their scheme. IP literals never get a domain wildcard. A
    /// missing port becomes 443 for https and a port wildcard otherwise.
    pub fn from_url(url: &Url) -> Self {
        let url = effective_url(url);
        let mut builder = Builder::new();

        if url.scheme() == FILE_SCHEME {
            return builder.with_scheme(url.scheme()).with_path(url.path()).build();
        }

        let host = host_str(&url);
        // IP literals come first: they can also carry an http scheme.
        if host_is_ip_address(&url) {
            builder = builder.with_scheme(url.scheme()).with_host(host);
        } else if url.scheme() == HTTP_SCHEME {
            builder = builder.with_scheme_wildcard().with_domain_wildcard().with_host(host);
        } else if url.scheme() == HTTPS_SCHEME {
            builder = builder.with_scheme(url.scheme()).with_domain_wildcard().with_host(host);
        }
        // Other schemes leave the builder without a scheme, which fails validation.

        builder = match url.port() {
            Some(port) => builder.with_port(port.to_string()),
            None if url.scheme() == HTTPS_SCHEME => builder.with_port(default_port(HTTPS_SCHEME)),
            None => builder.with_port_wildcard(),
        };

        builder.build()
    }

    /// Derive a pattern matching exactly the origin of `url`, without wildcards.
    pub fn from_url_no_wildcard(url: &Url) -> Self {
        let url = effective_url(url);
        let builder = Builder::new().with_scheme(url.scheme());

        if url.scheme() == FILE_SCHEME {
            return builder.with_path(url.path()).build();
        }

        let port = match url.port() {
            Some(port) => port.to_string(),
            None => default_port(url.scheme()).to_string(),
        };
        builder.with_host(host_str(&url)).with_port(port).build()
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self.repr, Repr::Valid(_))
    }

    /// Canonical parts, `None` for the invalid pattern.
    #[inline]
    pub fn parts(&self) -> Option<&PatternParts> {
        match &self.repr {
            Repr::Valid(parts) => Some(parts),
            Repr::Invalid => None,
        }
    }

    /// Check whether the pattern matches every host.
    pub fn matches_all_hosts(&self) -> bool {
        self.parts()
            .is_some_and(|parts| parts.has_domain_wildcard && parts.host.is_empty())
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parts() {
            Some(parts) => f.write_str(&parser::to_string(parts)),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Equality, Ordering, Hashing
// =============================================================================

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Relation::Identity
    }
}

impl Eq for Pattern {}

impl PartialOrd for Pattern {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Broader patterns order before narrower ones, so the most specific
/// pattern of a sorted collection comes last.
impl Ord for Pattern {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other).ordering()
    }
}

/// Hashes exactly the fields [`Pattern::compare`] inspects; the file path
/// does not take part in identity.
impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.parts() {
            None => state.write_u8(0),
            Some(parts) => {
                state.write_u8(1);
                parts.scheme.hash(state);
                parts.is_scheme_wildcard.hash(state);
                parts.host.hash(state);
                parts.has_domain_wildcard.hash(state);
                parts.port.hash(state);
                parts.is_port_wildcard.hash(state);
            }
        }
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.to_string()
    }
}

impl From<String> for Pattern {
    fn from(spec: String) -> Self {
        Self::from_string(&spec)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Pattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Pattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let spec = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Ok(Self::from_string(&spec))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).expect("test url should parse")
    }

    #[test]
    fn test_from_url_http() {
        let pattern = Pattern::from_url(&url("http://www.youtube.com/watch?v=1"));
        assert!(pattern.is_valid());
        assert_eq!(pattern.to_string(), "[*.]www.youtube.com");
        assert!(pattern.matches(&url("https://www.youtube.com/")));
        assert!(pattern.matches(&url("http://a.www.youtube.com:8080/")));
    }

    #[test]
    fn test_from_url_https_default_port() {
        let pattern = Pattern::from_url(&url("https://example.com/"));
        assert_eq!(pattern.parts().unwrap().port, "443");
        assert_eq!(pattern.to_string(), "https://[*.]example.com:443");
        assert!(pattern.matches(&url("https://example.com/")));
        assert!(pattern.matches(&url("https://example.com:443/")));
        assert!(!pattern.matches(&url("http://example.com/")));
    }

    #[test]
    fn test_from_url_explicit_port() {
        let pattern = Pattern::from_url(&url("http://example.com:8080/"));
        assert_eq!(pattern.to_string(), "[*.]example.com:8080");
        assert!(!pattern.matches(&url("http://example.com/")));
    }

    #[test]
    fn test_from_url_ip_literal() {
        let pattern = Pattern::from_url(&url("http://192.168.1.1/"));
        let parts = pattern.parts().unwrap();
        assert!(!parts.has_domain_wildcard);
        assert_eq!(parts.scheme, "http");
        assert!(pattern.matches(&url("http://192.168.1.1:8080/")));

        let v6 = Pattern::from_url(&url("https://[::1]/"));
        assert_eq!(v6.to_string(), "https://[::1]:443");
        assert!(v6.matches(&url("https://[::1]/index.html")));
    }

    #[test]
    fn test_from_url_file_and_filesystem() {
        let file = Pattern::from_url(&url("file:///tmp/test.html"));
        assert_eq!(file.to_string(), "file:///tmp/test.html");
        assert!(file.matches(&url("file:///tmp/test.html")));

        let fs = Pattern::from_url(&url("filesystem:https://www.google.com/temporary/"));
        assert_eq!(fs.to_string(), "https://[*.]www.google.com:443");
    }

    #[test]
    fn test_from_url_unsupported_scheme() {
        assert!(!Pattern::from_url(&url("ftp://example.com/")).is_valid());
    }

    #[test]
    fn test_from_url_no_wildcard() {
        let pattern = Pattern::from_url_no_wildcard(&url("http://www.example.com/"));
        assert_eq!(pattern.to_string(), "http://www.example.com:80");
        assert!(pattern.matches(&url("http://www.example.com/")));
        assert!(!pattern.matches(&url("http://sub.www.example.com/")));
        assert!(!pattern.matches(&url("https://www.example.com/")));
    }

    #[test]
    fn test_wildcard() {
        let pattern = Pattern::wildcard();
        assert!(pattern.matches_all_hosts());
        assert_eq!(pattern.to_string(), "*");
        for u in [
            "http://a.com/",
            "https://b.org:8443/x",
            "file:///tmp/x",
            "chrome-extension://abc/page.html",
            "http://[::1]/",
        ] {
            assert!(pattern.matches(&url(u)), "{u}");
        }
    }

    #[test]
    fn test_invalid_pattern_behavior() {
        let invalid = Pattern::invalid();
        assert_eq!(invalid.to_string(), "");
        assert!(!invalid.matches(&url("http://a.com/")));
        assert!(!invalid.matches_all_hosts());
        assert_eq!(invalid, Pattern::from_string("goo*gle.com"));
        assert_eq!(Pattern::default(), invalid);
    }

    #[test]
    fn test_ordering_operators() {
        let broad = Pattern::from_string("[*.]google.com");
        let narrow = Pattern::from_string("mail.google.com");
        assert!(broad < narrow);
        assert!(narrow > broad);
        assert_ne!(broad, narrow);

        let mut sorted = vec![narrow.clone(), Pattern::wildcard(), broad.clone()];
        sorted.sort();
        assert_eq!(sorted, vec![Pattern::wildcard(), broad, narrow]);
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        let mut set = HashSet::new();
        set.insert(Pattern::from_string("[*.]Google.com"));
        set.insert(Pattern::from_string("[*.]google.com."));
        set.insert(Pattern::invalid());
        set.insert(Pattern::from_string("goo*gle.com"));
        assert_eq!(set.len(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_string() {
        let pattern = Pattern::from_string("HTTPS://[*.]Example.com:443");
        let json = serde_json::to_string(&pattern).unwrap();
        assert_eq!(json, "\"https://[*.]example.com:443\"");

        let back: Pattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back.parts(), pattern.parts());

        let invalid: Pattern = serde_json::from_str("\"goo*gle.com\"").unwrap();
        assert!(!invalid.is_valid());
    }
}
