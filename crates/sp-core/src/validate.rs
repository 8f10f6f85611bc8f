//! Validation of canonical pattern parts
//!
//! Two independent rule sets: [`validate`] for the current grammar and
//! [`legacy_validate`] for patterns persisted by the historical grammar,
//! which only knew scheme and port wildcards.

use crate::types::{PatternParts, ValidationMode, EXTENSION_SCHEME, FILE_SCHEME, HTTPS_SCHEME, HTTP_SCHEME};

/// Validate parts under the given mode.
#[inline]
pub fn validate_with(parts: &PatternParts, mode: ValidationMode) -> bool {
    match mode {
        ValidationMode::Strict => validate(parts),
        ValidationMode::Legacy => legacy_validate(parts),
    }
}

/// Strict validation.
pub fn validate(parts: &PatternParts) -> bool {
    if !parts.wildcards_consistent() {
        log::debug!("pattern parts carry both a wildcard and a value: {parts:?}");
        return false;
    }

    // file:// patterns have neither host nor port
    if parts.scheme == FILE_SCHEME {
        if parts.has_domain_wildcard || !parts.host.is_empty() || !parts.port.is_empty() {
            return false;
        }
        if parts.is_path_wildcard {
            return parts.path.is_empty();
        }
        return !parts.path.is_empty() && parts.path != "/" && !parts.path.contains('*');
    }

    // Extension URLs have no meaningful port
    if parts.scheme == EXTENSION_SCHEME && parts.port.is_empty() && !parts.is_port_wildcard {
        return true;
    }

    if (parts.scheme.is_empty() && !parts.is_scheme_wildcard)
        || (parts.host.is_empty() && !parts.has_domain_wildcard)
        || (parts.port.is_empty() && !parts.is_port_wildcard)
    {
        return false;
    }

    if parts.host.contains('*') {
        return false;
    }

    is_supported_scheme(parts)
}

/// Legacy validation.
pub fn legacy_validate(parts: &PatternParts) -> bool {
    if parts.has_scheme(FILE_SCHEME) && parts.host.is_empty() && parts.port.is_empty() {
        return true;
    }

    if parts.has_scheme(EXTENSION_SCHEME)
        && !parts.host.is_empty()
        && !parts.has_domain_wildcard
        && parts.port.is_empty()
        && !parts.is_port_wildcard
    {
        return true;
    }

    if !parts.is_scheme_wildcard
        || (parts.host.is_empty() && !parts.has_domain_wildcard)
        || !parts.is_port_wildcard
    {
        return false;
    }

    is_supported_scheme(parts)
}

/// Only http and https are allowed as concrete schemes for host patterns.
#[inline]
fn is_supported_scheme(parts: &PatternParts) -> bool {
    parts.is_scheme_wildcard || parts.scheme == HTTP_SCHEME || parts.scheme == HTTPS_SCHEME
}
