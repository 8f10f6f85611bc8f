//! Machine-readable reports for `--json` output.

use serde::Serialize;

use sp_core::parser::parse_parts;
use sp_core::{try_build, Pattern, Relation, Rule, ValidationMode};

use crate::rules_file::LoadStats;

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub input: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckReport {
    pub fn new(input: &str, mode: ValidationMode) -> Self {
        let result = match parse_parts(input) {
            Some(parts) => try_build(&parts, mode).map_err(|e| e.to_string()),
            None => Err("malformed pattern".to_string()),
        };
        match result {
            Ok(pattern) => Self {
                input: input.to_string(),
                valid: true,
                canonical: Some(pattern.to_string()),
                error: None,
            },
            Err(error) => Self {
                input: input.to_string(),
                valid: false,
                canonical: None,
                error: Some(error),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub pattern: Pattern,
    pub url: String,
    pub matches: bool,
}

#[derive(Debug, Serialize)]
pub struct CompareReport {
    pub a: Pattern,
    pub b: Pattern,
    pub relation: String,
    pub value: i8,
}

impl CompareReport {
    pub fn new(a: &Pattern, b: &Pattern) -> Self {
        let relation: Relation = a.compare(b);
        Self {
            a: a.clone(),
            b: b.clone(),
            relation: format!("{relation:?}"),
            value: relation as i8,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RuleReport {
    pub primary: Pattern,
    pub secondary: Pattern,
    pub setting: String,
}

impl From<Rule<'_>> for RuleReport {
    fn from(rule: Rule<'_>) -> Self {
        Self {
            primary: rule.primary.clone(),
            secondary: rule.secondary.clone(),
            setting: rule.setting.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LookupReport {
    pub primary_url: String,
    pub secondary_url: String,
    pub rule: Option<RuleReport>,
    pub files: usize,
    pub rules: usize,
    pub skipped: usize,
}

impl LookupReport {
    pub fn new(primary_url: &str, secondary_url: &str, rule: Option<Rule<'_>>, stats: &LoadStats) -> Self {
        Self {
            primary_url: primary_url.to_string(),
            secondary_url: secondary_url.to_string(),
            rule: rule.map(RuleReport::from),
            files: stats.files,
            rules: stats.parse.rules,
            skipped: stats.parse.skipped,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EncodeReport {
    pub pattern: Pattern,
    pub valid: bool,
    pub hex: String,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize report: {}", e))?;
    println!("{json}");
    Ok(())
}
