use std::fs;
use std::path::Path;
use std::time::Instant;

use sp_core::{parse_rule_list, ContentSetting, Pattern, ParseStats, RuleSet};

#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    pub files: usize,
    pub parse: ParseStats,
    pub total_ms: f64,
}

/// Read rule lists in order into one set. Rules in later files replace
/// rules for the same pattern pair in earlier ones.
pub fn read_rules(paths: &[String], verbose: bool) -> Result<(RuleSet, LoadStats), String> {
    if paths.is_empty() {
        return Err("No rule files specified".to_string());
    }

    let start = Instant::now();
    let mut rules = RuleSet::new();
    let mut stats = LoadStats::default();

    for (idx, path) in paths.iter().enumerate() {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path, e))?;

        let (file_rules, file_stats) = parse_rule_list(&content);
        log::debug!("{}: {} rules, {} skipped", path, file_stats.rules, file_stats.skipped);

        if verbose {
            println!(
                "  [{}] {} - {} lines, {} rules, {} skipped",
                idx,
                Path::new(path).file_name().unwrap_or_default().to_string_lossy(),
                file_stats.lines,
                file_stats.rules,
                file_stats.skipped
            );
        }

        let replaced = merge(&mut rules, &file_rules);

        stats.files += 1;
        stats.parse.lines += file_stats.lines;
        stats.parse.rules += file_stats.rules;
        stats.parse.skipped += file_stats.skipped;
        stats.parse.replaced += file_stats.replaced + replaced;
    }

    stats.total_ms = start.elapsed().as_secs_f64() * 1000.0;
    Ok((rules, stats))
}

/// Copy every rule of `from` into `into`, returning how many replaced one.
fn merge(into: &mut RuleSet, from: &RuleSet) -> usize {
    let mut replaced = 0;
    for rule in from.iter() {
        // Patterns in a RuleSet are valid, so insertion cannot fail.
        if let Ok(Some(_)) = into.insert(rule.primary.clone(), rule.secondary.clone(), rule.setting) {
            replaced += 1;
        }
    }
    replaced
}

/// Render a rule set back into rule-list text, most specific rule first.
pub fn format_rules(rules: &RuleSet) -> String {
    let mut out = String::new();
    for rule in rules.iter() {
        out.push_str(&format_rule(rule.primary, rule.secondary, rule.setting));
        out.push('\n');
    }
    out
}

pub fn format_rule(primary: &Pattern, secondary: &Pattern, setting: ContentSetting) -> String {
    format!("{} {} {}", primary, secondary, setting)
}
