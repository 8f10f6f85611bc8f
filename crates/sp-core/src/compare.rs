//! Precedence ordering between patterns
//!
//! [`Pattern::compare`] tells whether one pattern contains the other
//! (`Successor`/`Predecessor`) or, when neither does, gives them a stable
//! arbitrary order (`DisjointOrderPre`/`DisjointOrderPost`) so rule sets can
//! live in ordered containers. Host is the primary key, then port, then scheme.

use std::cmp::{Ordering, Reverse};

use crate::pattern::Pattern;
use crate::types::{PatternParts, FILE_SCHEME};
use crate::url::is_sub_domain_or_equal;

/// Relation of one pattern to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Relation {
    /// Disjoint, sorts after the other pattern
    DisjointOrderPost = -2,
    /// Strictly broader than the other pattern
    Successor = -1,
    Identity = 0,
    /// Strictly narrower than the other pattern
    Predecessor = 1,
    /// Disjoint, sorts before the other pattern
    DisjointOrderPre = 2,
}

impl Relation {
    #[inline]
    pub fn is_disjoint(self) -> bool {
        matches!(self, Self::DisjointOrderPre | Self::DisjointOrderPost)
    }

    /// The relation seen from the other pattern.
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Self::DisjointOrderPost => Self::DisjointOrderPre,
            Self::Successor => Self::Predecessor,
            Self::Identity => Self::Identity,
            Self::Predecessor => Self::Successor,
            Self::DisjointOrderPre => Self::DisjointOrderPost,
        }
    }

    /// Ordering used by `Ord for Pattern`.
    #[inline]
    pub fn ordering(self) -> Ordering {
        (self as i8).cmp(&0)
    }
}

impl Pattern {
    /// Compare this pattern with `other`.
    pub fn compare(&self, other: &Pattern) -> Relation {
        // Invalid patterns all behave the same way: they match nothing.
        let (parts, other_parts) = match (self.parts(), other.parts()) {
            (None, None) => return Relation::Identity,
            (None, Some(_)) => return Relation::DisjointOrderPost,
            (Some(_), None) => return Relation::DisjointOrderPre,
            (Some(a), Some(b)) => (a, b),
        };

        let host_relation = compare_host(parts, other_parts);
        if host_relation.is_disjoint() {
            return host_relation;
        }

        let port_relation = compare_port(parts, other_parts);
        if port_relation.is_disjoint() {
            return port_relation;
        }

        let scheme_relation = compare_scheme(parts, other_parts);
        if scheme_relation.is_disjoint() {
            return scheme_relation;
        }

        [host_relation, port_relation]
            .into_iter()
            .find(|r| *r != Relation::Identity)
            .unwrap_or(scheme_relation)
    }
}

// =============================================================================
// Sub-comparators
// =============================================================================

/// Compare two domain names label by label, starting at the TLD.
///
/// The first differing label decides. When one name is a label-suffix of the
/// other, the name with more labels orders greater.
pub fn compare_domain_names(a: &str, b: &str) -> Ordering {
    fn labels(s: &str) -> Vec<&str> {
        if s.is_empty() {
            Vec::new()
        } else {
            s.split('.').collect()
        }
    }

    let a_labels = labels(a);
    let b_labels = labels(b);

    for (la, lb) in a_labels.iter().rev().zip(b_labels.iter().rev()) {
        match la.cmp(lb) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }

    a_labels.len().cmp(&b_labels.len())
}

#[inline]
fn disjoint_host_order(a: &str, b: &str) -> Relation {
    if compare_domain_names(a, b) == Ordering::Less {
        Relation::DisjointOrderPre
    } else {
        Relation::DisjointOrderPost
    }
}

pub fn compare_host(parts: &PatternParts, other: &PatternParts) -> Relation {
    match (parts.has_domain_wildcard, other.has_domain_wildcard) {
        (false, false) => match compare_domain_names(&parts.host, &other.host) {
            Ordering::Equal => Relation::Identity,
            Ordering::Less => Relation::DisjointOrderPre,
            Ordering::Greater => Relation::DisjointOrderPost,
        },
        // [*.]google.com vs mail.google.com
        (true, false) => {
            if is_sub_domain_or_equal(&other.host, &parts.host) {
                Relation::Successor
            } else {
                disjoint_host_order(&parts.host, &other.host)
            }
        }
        // mail.google.com vs [*.]google.com
        (false, true) => {
            if is_sub_domain_or_equal(&parts.host, &other.host) {
                Relation::Predecessor
            } else {
                disjoint_host_order(&parts.host, &other.host)
            }
        }
        (true, true) => {
            if parts.host == other.host {
                Relation::Identity
            } else if is_sub_domain_or_equal(&other.host, &parts.host) {
                Relation::Successor
            } else if is_sub_domain_or_equal(&parts.host, &other.host) {
                Relation::Predecessor
            } else {
                disjoint_host_order(&parts.host, &other.host)
            }
        }
    }
}

/// Wildcard vs concrete is containment; two concrete values are disjoint
/// unless equal, the greater string ordering first.
fn compare_field(value: &str, wildcard: bool, other_value: &str, other_wildcard: bool) -> Relation {
    match (wildcard, other_wildcard) {
        (true, false) => Relation::Successor,
        (false, true) => Relation::Predecessor,
        _ => match value.cmp(other_value) {
            Ordering::Equal => Relation::Identity,
            Ordering::Greater => Relation::DisjointOrderPre,
            Ordering::Less => Relation::DisjointOrderPost,
        },
    }
}

pub fn compare_port(parts: &PatternParts, other: &PatternParts) -> Relation {
    compare_field(&parts.port, parts.is_port_wildcard, &other.port, other.is_port_wildcard)
}

pub fn compare_scheme(parts: &PatternParts, other: &PatternParts) -> Relation {
    compare_field(&parts.scheme, parts.is_scheme_wildcard, &other.scheme, other.is_scheme_wildcard)
}

// =============================================================================
// Precedence Key
// =============================================================================

/// One step along a host, from the TLD towards the leftmost label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum HostStep {
    /// Domain wildcard: sorts before every sub-domain of the host
    Wildcard,
    /// Sibling labels sort in descending order
    Label(Reverse<String>),
    /// Exact host: sorts after every sub-domain of the host
    Exact,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct KeyParts {
    host: Vec<HostStep>,
    /// (concrete, value); a wildcard sorts first
    port: (bool, String),
    scheme: (bool, String),
    /// Only set for `file` patterns; a path wildcard sorts first
    path: Option<(bool, String)>,
}

/// Total order over patterns, broadest first.
///
/// [`Pattern::compare`] is not transitive when host containment and port
/// disjointness pull in different directions, so it cannot key an ordered
/// container. This key is a total order that agrees with `compare` for every
/// two patterns matching a common URL, and that is equal exactly when the
/// patterns are identical and, for `file` patterns, have the same path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrecedenceKey(Option<KeyParts>);

impl Pattern {
    /// Key placing this pattern in the total precedence order.
    pub fn precedence_key(&self) -> PrecedenceKey {
        PrecedenceKey(self.parts().map(|parts| {
            let mut host: Vec<HostStep> = if parts.host.is_empty() {
                Vec::new()
            } else {
                parts
                    .host
                    .rsplit('.')
                    .map(|label| HostStep::Label(Reverse(label.to_string())))
                    .collect()
            };
            host.push(if parts.has_domain_wildcard {
                HostStep::Wildcard
            } else {
                HostStep::Exact
            });

            KeyParts {
                host,
                port: (!parts.is_port_wildcard, parts.port.clone()),
                scheme: (!parts.is_scheme_wildcard, parts.scheme.clone()),
                path: parts
                    .has_scheme(FILE_SCHEME)
                    .then(|| (!parts.is_path_wildcard, parts.path.clone())),
            }
        }))
    }
}
