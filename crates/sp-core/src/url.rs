//! URL helpers shared by matching and pattern derivation
//!
//! These work on parsed [`Url`] values and plain host strings; nothing here
//! allocates unless a nested URL has to be unwrapped.

use std::borrow::Cow;

use url::{Host, Url};

use crate::types::{FILESYSTEM_SCHEME, HTTPS_SCHEME, HTTP_SCHEME};

// =============================================================================
// Effective URL
// =============================================================================

/// Parse the inner URL of a nested-scheme URL (`filesystem:http://a.com/temporary/`).
pub fn inner_url(url: &Url) -> Option<Url> {
    if url.scheme() != FILESYSTEM_SCHEME {
        return None;
    }
    let inner = url.as_str().get(FILESYSTEM_SCHEME.len() + 1..)?;
    Url::parse(inner).ok()
}

/// The URL actually used for matching: the inner URL for nested schemes,
/// otherwise the URL itself.
#[inline]
pub fn effective_url(url: &Url) -> Cow<'_, Url> {
    match inner_url(url) {
        Some(inner) => Cow::Owned(inner),
        None => Cow::Borrowed(url),
    }
}

// =============================================================================
// Host Helpers
// =============================================================================

/// Host of a URL as text, empty for host-less URLs. IPv6 hosts keep their brackets.
#[inline]
pub fn host_str(url: &Url) -> &str {
    url.host_str().unwrap_or("")
}

/// Strip a single trailing dot (`example.com.` -> `example.com`).
#[inline]
pub fn trim_ending_dot(host: &str) -> &str {
    host.strip_suffix('.').unwrap_or(host)
}

/// Check whether the URL host is an IPv4 or IPv6 literal.
#[inline]
pub fn host_is_ip_address(url: &Url) -> bool {
    matches!(url.host(), Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)))
}

/// Check whether `sub` equals `domain` or is a sub-domain of it.
/// An empty `domain` contains every host.
pub fn is_sub_domain_or_equal(sub: &str, domain: &str) -> bool {
    if domain.is_empty() || sub == domain {
        return true;
    }
    sub.len() > domain.len()
        && sub.ends_with(domain)
        && sub.as_bytes()[sub.len() - domain.len() - 1] == b'.'
}

// =============================================================================
// Ports
// =============================================================================

/// Implicit port of a scheme, empty when the scheme has none we care about.
#[inline]
pub fn default_port(scheme: &str) -> &'static str {
    match scheme {
        HTTP_SCHEME => "80",
        HTTPS_SCHEME => "443",
        _ => "",
    }
}

/// Explicit port of the URL, or the scheme default.
///
/// `Url` drops a port equal to the scheme default, so `https://a.com:443/`
/// and `https://a.com/` both yield `"443"`.
pub fn effective_port(url: &Url) -> Cow<'static, str> {
    match url.port() {
        Some(port) => Cow::Owned(port.to_string()),
        None => Cow::Borrowed(default_port(url.scheme())),
    }
}
