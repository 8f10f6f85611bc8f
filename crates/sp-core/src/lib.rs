//! Site Pattern Core Library
//!
//! This crate provides the pattern engine behind per-site content settings:
//! patterns such as `[*.]google.com`, `https://*:443` or
//! `file:///tmp/test.html` are canonicalized, validated, matched against URLs
//! and ordered by specificity so that the most specific of several matching
//! rules wins.
//!
//! # Architecture
//!
//! Raw text or a URL is turned into [`PatternParts`], canonicalized, validated
//! under the strict or legacy rule set and frozen into an immutable
//! [`Pattern`]. Invalid input never errors: it becomes the invalid pattern,
//! which matches nothing.
//!
//! # Modules
//!
//! - `types`: Pattern parts, validation modes and content settings
//! - `url`: Host and port helpers over parsed URLs
//! - `canon`: Canonicalization of raw parts
//! - `validate`: Strict and legacy validation
//! - `builder`: Fluent builder and the pure build pipeline
//! - `pattern`: The immutable pattern value and its factories
//! - `matcher`: URL matching
//! - `compare`: Precedence ordering
//! - `parser`: Textual grammar
//! - `wire`: Binary messages for inter-process transport
//! - `rules`: Ordered rule sets with most-specific-first lookup

pub mod builder;
pub mod canon;
pub mod compare;
pub mod matcher;
pub mod parser;
pub mod pattern;
pub mod rules;
pub mod types;
pub mod url;
pub mod validate;
pub mod wire;

// Re-export commonly used types
pub use builder::{build, try_build, BuildError, Builder};
pub use compare::{PrecedenceKey, Relation};
pub use pattern::Pattern;
pub use rules::{parse_rule_list, PairKey, ParseStats, PatternPair, Rule, RuleError, RuleSet};
pub use types::{ContentSetting, PatternParts, ValidationMode};
pub use wire::{MessageReader, WireError};
