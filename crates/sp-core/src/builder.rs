//! Pattern construction
//!
//! [`Builder`] accumulates raw parts through fluent setters; nothing is
//! checked until [`Builder::build`]. The pipeline itself is the pure
//! function [`try_build`]: canonicalize, validate, then verify that
//! canonicalization is idempotent.

use crate::canon::canonicalize;
use crate::compare::Relation;
use crate::pattern::Pattern;
use crate::types::{PatternParts, ValidationMode};
use crate::validate::validate_with;

/// Reason a set of parts was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("pattern was explicitly marked invalid")]
    Explicit,
    #[error("parts could not be canonicalized (domain wildcard on an IP literal)")]
    Canonicalization,
    #[error("parts rejected by {0:?} validation")]
    Validation(ValidationMode),
    #[error("canonicalization is not idempotent")]
    NotIdempotent,
}

/// Build a pattern from raw parts, reporting why it was rejected.
///
/// `Ok` always carries a valid pattern.
pub fn try_build(parts: &PatternParts, mode: ValidationMode) -> Result<Pattern, BuildError> {
    let canonical = canonicalize(parts).ok_or(BuildError::Canonicalization)?;

    if !validate_with(&canonical, mode) {
        return Err(BuildError::Validation(mode));
    }

    // Canonicalizing again must not change the meaning of the pattern,
    // whichever validation mode accepted it.
    let twice = canonicalize(&canonical).ok_or(BuildError::NotIdempotent)?;
    let pattern = Pattern::from_canonical(canonical);
    if pattern.compare(&Pattern::from_canonical(twice)) != Relation::Identity {
        return Err(BuildError::NotIdempotent);
    }

    Ok(pattern)
}

/// Build a pattern from raw parts; any rejection yields the invalid pattern.
pub fn build(parts: &PatternParts, mode: ValidationMode) -> Pattern {
    match try_build(parts, mode) {
        Ok(pattern) => pattern,
        Err(e) => {
            log::debug!("rejecting pattern parts {parts:?}: {e}");
            Pattern::invalid()
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Fluent accumulator for pattern parts.
///
/// ```
/// use sp_core::Builder;
///
/// let pattern = Builder::new()
///     .with_scheme("https")
///     .with_domain_wildcard()
///     .with_host("example.com")
///     .with_port("443")
///     .build();
/// assert_eq!(pattern.to_string(), "https://[*.]example.com:443");
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Builder {
    parts: PatternParts,
    invalid: bool,
    mode: ValidationMode,
}

impl Builder {
    /// Builder validating with the strict rule set.
    pub fn new() -> Self {
        Self::with_mode(ValidationMode::Strict)
    }

    /// Builder validating with the legacy rule set.
    pub fn legacy() -> Self {
        Self::with_mode(ValidationMode::Legacy)
    }

    pub fn with_mode(mode: ValidationMode) -> Self {
        Self {
            parts: PatternParts::default(),
            invalid: false,
            mode,
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.parts.scheme = scheme.into();
        self
    }

    pub fn with_scheme_wildcard(mut self) -> Self {
        self.parts.scheme.clear();
        self.parts.is_scheme_wildcard = true;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.parts.host = host.into();
        self
    }

    pub fn with_domain_wildcard(mut self) -> Self {
        self.parts.has_domain_wildcard = true;
        self
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.parts.port = port.into();
        self
    }

    pub fn with_port_wildcard(mut self) -> Self {
        self.parts.port.clear();
        self.parts.is_port_wildcard = true;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.parts.path = path.into();
        self
    }

    pub fn with_path_wildcard(mut self) -> Self {
        self.parts.path.clear();
        self.parts.is_path_wildcard = true;
        self
    }

    /// Mark the pattern invalid regardless of its parts.
    pub fn invalid(mut self) -> Self {
        self.invalid = true;
        self
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Raw, not yet canonicalized parts.
    pub fn parts(&self) -> &PatternParts {
        &self.parts
    }

    pub fn try_build(self) -> Result<Pattern, BuildError> {
        if self.invalid {
            return Err(BuildError::Explicit);
        }
        try_build(&self.parts, self.mode)
    }

    pub fn build(self) -> Pattern {
        if self.invalid {
            return Pattern::invalid();
        }
        build(&self.parts, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_canonical_pattern() {
        let pattern = Builder::new()
            .with_scheme("HTTP")
            .with_host("WWW.Google.com.")
            .with_port_wildcard()
            .build();
        let parts = pattern.parts().expect("pattern should be valid");
        assert_eq!(parts.scheme, "http");
        assert_eq!(parts.host, "www.google.com");
        assert!(parts.is_port_wildcard);
    }

    #[test]
    fn test_explicit_invalid() {
        let builder = Builder::new().with_scheme_wildcard().with_domain_wildcard().with_port_wildcard();
        assert!(builder.clone().build().is_valid());
        assert!(!builder.clone().invalid().build().is_valid());
        assert_eq!(builder.invalid().try_build(), Err(BuildError::Explicit));
    }

    #[test]
    fn test_rejection_reasons() {
        let ip_wildcard = Builder::new()
            .with_scheme_wildcard()
            .with_domain_wildcard()
            .with_host("10.0.0.1")
            .with_port_wildcard();
        assert_eq!(ip_wildcard.try_build(), Err(BuildError::Canonicalization));

        let no_port = Builder::new().with_scheme("http").with_host("a.com");
        assert_eq!(no_port.try_build(), Err(BuildError::Validation(ValidationMode::Strict)));

        let legacy_concrete = Builder::legacy()
            .with_scheme("http")
            .with_host("a.com")
            .with_port_wildcard();
        assert_eq!(
            legacy_concrete.try_build(),
            Err(BuildError::Validation(ValidationMode::Legacy))
        );
    }

    #[test]
    fn test_not_idempotent() {
        // Each canonicalization pass trims one more trailing dot.
        let parts = crate::parser::parse_parts("a.com..").expect("spec should split");
        assert_eq!(try_build(&parts, ValidationMode::Strict), Err(BuildError::NotIdempotent));
        assert!(!build(&parts, ValidationMode::Strict).is_valid());

        let built = Builder::new()
            .with_scheme_wildcard()
            .with_host("a.com..")
            .with_port_wildcard()
            .try_build();
        assert_eq!(built, Err(BuildError::NotIdempotent));
    }

    #[test]
    fn test_wildcard_setters_clear_values() {
        let builder = Builder::new()
            .with_scheme("http")
            .with_scheme_wildcard()
            .with_port("80")
            .with_port_wildcard()
            .with_path("/a")
            .with_path_wildcard();
        assert!(builder.parts().wildcards_consistent());
        assert!(builder.parts().scheme.is_empty());
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(Builder::new().mode(), ValidationMode::Strict);
        assert_eq!(Builder::legacy().mode(), ValidationMode::Legacy);

        // "/" is only acceptable to the legacy rules
        let strict = Builder::new().with_scheme("file").with_path("/").build();
        let legacy = Builder::legacy().with_scheme("file").with_path("/").build();
        assert!(!strict.is_valid());
        assert!(legacy.is_valid());
    }
}
