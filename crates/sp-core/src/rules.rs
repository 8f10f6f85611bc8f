//! Ordered content-setting rules
//!
//! A [`RuleSet`] maps `(primary, secondary)` pattern pairs to a
//! [`ContentSetting`]. Pairs are kept in total precedence order
//! ([`PrecedenceKey`]) so a lookup walks from the most specific rule to the
//! broadest and stops at the first match.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use url::Url;

use crate::compare::PrecedenceKey;
use crate::pattern::Pattern;
use crate::types::ContentSetting;

/// Error type for rule insertion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid primary pattern")]
    InvalidPrimary,
    #[error("Invalid secondary pattern")]
    InvalidSecondary,
}

/// Primary (embedding site) and secondary (requesting site) patterns.
///
/// Identity and order follow [`PrecedenceKey`], primary first, then
/// secondary. Rules for different files stay apart even though pattern
/// identity ignores file paths.
#[derive(Debug, Clone)]
pub struct PatternPair {
    pub primary: Pattern,
    pub secondary: Pattern,
}

impl PatternPair {
    /// Key placing this pair in the total precedence order.
    pub fn key(&self) -> PairKey {
        PairKey::new(&self.primary, &self.secondary)
    }
}

impl PartialEq for PatternPair {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PatternPair {}

impl Hash for PatternPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for PatternPair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PatternPair {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Precedence keys of a primary and a secondary pattern.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    primary: PrecedenceKey,
    secondary: PrecedenceKey,
}

impl PairKey {
    pub fn new(primary: &Pattern, secondary: &Pattern) -> Self {
        Self {
            primary: primary.precedence_key(),
            secondary: secondary.precedence_key(),
        }
    }
}

/// A rule as returned by lookups and iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule<'a> {
    pub primary: &'a Pattern,
    pub secondary: &'a Pattern,
    pub setting: ContentSetting,
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<PairKey, (PatternPair, ContentSetting)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a rule. Returns the setting it replaced.
    pub fn insert(
        &mut self,
        primary: Pattern,
        secondary: Pattern,
        setting: ContentSetting,
    ) -> Result<Option<ContentSetting>, RuleError> {
        if !primary.is_valid() {
            return Err(RuleError::InvalidPrimary);
        }
        if !secondary.is_valid() {
            return Err(RuleError::InvalidSecondary);
        }
        let pair = PatternPair { primary, secondary };
        let previous = self.rules.insert(pair.key(), (pair, setting));
        Ok(previous.map(|(_, setting)| setting))
    }

    pub fn remove(&mut self, primary: &Pattern, secondary: &Pattern) -> Option<ContentSetting> {
        self.rules
            .remove(&PairKey::new(primary, secondary))
            .map(|(_, setting)| setting)
    }

    /// Setting stored for exactly this pair (identity, not matching).
    pub fn get(&self, primary: &Pattern, secondary: &Pattern) -> Option<ContentSetting> {
        self.rules
            .get(&PairKey::new(primary, secondary))
            .map(|(_, setting)| *setting)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Rules in precedence order, most specific first.
    pub fn iter(&self) -> impl Iterator<Item = Rule<'_>> + '_ {
        self.rules.values().rev().map(|(pair, setting)| Rule {
            primary: &pair.primary,
            secondary: &pair.secondary,
            setting: *setting,
        })
    }

    /// Most specific rule matching both URLs.
    ///
    /// Patterns matching a common URL never conflict in precedence, so the
    /// first match in key order is the one [`Pattern::compare`] ranks highest.
    pub fn lookup(&self, primary_url: &Url, secondary_url: &Url) -> Option<Rule<'_>> {
        let found = self
            .iter()
            .find(|rule| rule.primary.matches(primary_url) && rule.secondary.matches(secondary_url));
        match &found {
            Some(rule) => log::trace!(
                "{primary_url} / {secondary_url} matched {} {} -> {}",
                rule.primary,
                rule.secondary,
                rule.setting
            ),
            None => log::trace!("{primary_url} / {secondary_url} matched no rule"),
        }
        found
    }
}

// =============================================================================
// Rule Lists
// =============================================================================

/// Counters from parsing a rule list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub rules: usize,
    /// Lines that were neither blank, comments nor valid rules
    pub skipped: usize,
    /// Rules that replaced an earlier rule for the same pair
    pub replaced: usize,
}

/// Parse a rule list.
///
/// One rule per line: `primary [secondary] setting`, where a missing
/// secondary pattern means `*`. Lines starting with `#` or `!` are comments.
/// Later rules replace earlier ones for the same pattern pair.
///
/// ```
/// use sp_core::{parse_rule_list, ContentSetting};
/// use url::Url;
///
/// let (rules, _) = parse_rule_list("[*.]example.com block\nwww.example.com allow\n");
/// let url = Url::parse("http://www.example.com/").unwrap();
/// assert_eq!(rules.lookup(&url, &url).unwrap().setting, ContentSetting::Allow);
/// ```
pub fn parse_rule_list(text: &str) -> (RuleSet, ParseStats) {
    let mut rules = RuleSet::new();
    let mut stats = ParseStats::default();

    for (line_no, raw_line) in text.lines().enumerate() {
        stats.lines += 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        match parse_rule_line(line) {
            Some((primary, secondary, setting)) => match rules.insert(primary, secondary, setting) {
                Ok(previous) => {
                    stats.rules += 1;
                    if previous.is_some() {
                        stats.replaced += 1;
                    }
                }
                Err(e) => {
                    log::debug!("skipping rule on line {}: {e}", line_no + 1);
                    stats.skipped += 1;
                }
            },
            None => {
                log::debug!("skipping malformed rule on line {}: {line:?}", line_no + 1);
                stats.skipped += 1;
            }
        }
    }

    (rules, stats)
}

fn parse_rule_line(line: &str) -> Option<(Pattern, Pattern, ContentSetting)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let (primary, secondary, setting) = match fields.as_slice() {
        [primary, setting] => (*primary, "*", *setting),
        [primary, secondary, setting] => (*primary, *secondary, *setting),
        _ => return None,
    };
    let setting = ContentSetting::from_name(setting)?;
    Some((Pattern::from_string(primary), Pattern::from_string(secondary), setting))
}
