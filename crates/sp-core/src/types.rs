//! Core type definitions for site patterns
//!
//! These types are shared by the builder, the parser and the wire codec.
//! Field order of [`PatternParts`] is the order used on the wire.

// =============================================================================
// Well-known Schemes
// =============================================================================

pub const HTTP_SCHEME: &str = "http";
pub const HTTPS_SCHEME: &str = "https";
pub const FILE_SCHEME: &str = "file";
pub const FILESYSTEM_SCHEME: &str = "filesystem";
pub const EXTENSION_SCHEME: &str = "chrome-extension";

// =============================================================================
// Pattern Parts
// =============================================================================

/// The canonical fields of a pattern.
///
/// A wildcard flag and its paired field are mutually exclusive: when
/// `is_scheme_wildcard` is set `scheme` is empty, and likewise for port and
/// path. `has_domain_wildcard` is the exception, it qualifies `host` rather
/// than replacing it. An empty host with a domain wildcard matches any host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PatternParts {
    /// Lowercase scheme, empty when wildcarded
    pub scheme: String,
    pub is_scheme_wildcard: bool,

    /// Canonical host without trailing dot
    pub host: String,
    /// "this host or any sub-domain of it"
    pub has_domain_wildcard: bool,

    /// Decimal port string, empty when wildcarded
    pub port: String,
    pub is_port_wildcard: bool,

    /// Only meaningful for the `file` scheme
    pub path: String,
    pub is_path_wildcard: bool,
}

impl PatternParts {
    /// Check the wildcard/field exclusivity invariant.
    #[inline]
    pub fn wildcards_consistent(&self) -> bool {
        !(self.is_scheme_wildcard && !self.scheme.is_empty())
            && !(self.is_port_wildcard && !self.port.is_empty())
            && !(self.is_path_wildcard && !self.path.is_empty())
    }

    /// Scheme is concrete and equal to `scheme`.
    #[inline]
    pub fn has_scheme(&self, scheme: &str) -> bool {
        !self.is_scheme_wildcard && self.scheme == scheme
    }
}

// =============================================================================
// Validation Mode
// =============================================================================

/// Rule set used to accept or reject canonical parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationMode {
    /// Current grammar: file paths, domain wildcards, concrete schemes
    #[default]
    Strict,
    /// Historical grammar that only knew scheme and port wildcards
    Legacy,
}

// =============================================================================
// Content Settings
// =============================================================================

/// Setting value attached to a pattern pair in a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ContentSetting {
    /// Defer to the next provider
    Default = 0,
    Allow = 1,
    Block = 2,
    Ask = 3,
    /// Allow for the lifetime of the session only
    SessionOnly = 4,
}

impl TryFrom<u8> for ContentSetting {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Default),
            1 => Ok(Self::Allow),
            2 => Ok(Self::Block),
            3 => Ok(Self::Ask),
            4 => Ok(Self::SessionOnly),
            _ => Err(()),
        }
    }
}

impl ContentSetting {
    /// Parse from the setting name used in rule lists.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Some(Self::Default),
            "allow" => Some(Self::Allow),
            "block" => Some(Self::Block),
            "ask" => Some(Self::Ask),
            "session_only" | "session-only" => Some(Self::SessionOnly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Allow => "allow",
            Self::Block => "block",
            Self::Ask => "ask",
            Self::SessionOnly => "session_only",
        }
    }
}

impl std::fmt::Display for ContentSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
