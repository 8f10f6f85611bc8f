//! Site Pattern CLI
//!
//! CLI tool for checking, matching and ordering site patterns and for
//! looking up URLs in content-setting rule lists.

mod report;
mod rules_file;

use clap::{Parser, Subcommand};
use env_logger::Builder as EnvLoggerBuilder;
use url::Url;

use sp_core::{parser, Pattern, ValidationMode};

use report::{print_json, CheckReport, CompareReport, EncodeReport, LookupReport, MatchReport, RuleReport};
use rules_file::{format_rule, format_rules, read_rules};

#[derive(Parser)]
#[command(name = "sitepattern")]
#[command(about = "Content-setting site pattern tools")]
struct Cli {
    /// Parse patterns with the legacy validation rules
    #[arg(long, global = true)]
    legacy: bool,

    /// Print JSON reports
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of each pattern, or why it was rejected
    Check {
        #[arg(required = true)]
        patterns: Vec<String>,
    },

    /// Test whether a pattern matches a URL
    Match { pattern: String, url: String },

    /// Show how pattern A relates to pattern B
    Compare { a: String, b: String },

    /// Sort patterns by precedence, most specific first
    Sort {
        #[arg(required = true)]
        patterns: Vec<String>,
    },

    /// Find the rule that applies to a URL
    Lookup {
        /// Rule list files, later files override earlier ones
        #[arg(short, long, required = true)]
        rules: Vec<String>,

        /// Primary (top-level) URL
        url: String,

        /// Secondary (requesting) URL, defaults to the primary URL
        #[arg(short, long)]
        secondary: Option<String>,
    },

    /// Print merged rule lists, most specific rule first
    Rules {
        /// Rule list files, later files override earlier ones
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Encode a pattern as a hex wire message
    Encode { pattern: String },
}

struct Options {
    mode: ValidationMode,
    json: bool,
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    EnvLoggerBuilder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let opts = Options {
        mode: if cli.legacy { ValidationMode::Legacy } else { ValidationMode::Strict },
        json: cli.json,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Commands::Check { patterns } => cmd_check(&patterns, &opts),
        Commands::Match { pattern, url } => cmd_match(&pattern, &url, &opts),
        Commands::Compare { a, b } => cmd_compare(&a, &b, &opts),
        Commands::Sort { patterns } => cmd_sort(&patterns, &opts),
        Commands::Lookup { rules, url, secondary } => cmd_lookup(&rules, &url, secondary.as_deref(), &opts),
        Commands::Rules { files } => cmd_rules(&files, &opts),
        Commands::Encode { pattern } => cmd_encode(&pattern, &opts),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn parse_pattern(spec: &str, opts: &Options) -> Result<Pattern, String> {
    let pattern = parser::parse(spec, opts.mode);
    if pattern.is_valid() {
        Ok(pattern)
    } else {
        Err(format!("Invalid pattern '{}'", spec))
    }
}

fn parse_url(input: &str) -> Result<Url, String> {
    Url::parse(input).map_err(|e| format!("Invalid URL '{}': {}", input, e))
}

fn cmd_check(patterns: &[String], opts: &Options) -> Result<(), String> {
    let reports: Vec<CheckReport> = patterns.iter().map(|p| CheckReport::new(p, opts.mode)).collect();
    let rejected = reports.iter().filter(|r| !r.valid).count();

    if opts.json {
        print_json(&reports)?;
    } else {
        for report in &reports {
            match (&report.canonical, &report.error) {
                (Some(canonical), _) => println!("{:<40} {}", report.input, canonical),
                (None, Some(error)) => println!("{:<40} INVALID ({})", report.input, error),
                (None, None) => println!("{:<40} INVALID", report.input),
            }
        }
    }

    if rejected > 0 {
        return Err(format!("{} of {} patterns rejected", rejected, reports.len()));
    }
    Ok(())
}

fn cmd_match(spec: &str, url: &str, opts: &Options) -> Result<(), String> {
    let pattern = parse_pattern(spec, opts)?;
    let parsed = parse_url(url)?;
    let report = MatchReport {
        matches: pattern.matches(&parsed),
        url: parsed.to_string(),
        pattern,
    };

    if opts.json {
        print_json(&report)
    } else {
        println!("{}", if report.matches { "match" } else { "no match" });
        Ok(())
    }
}

fn cmd_compare(a: &str, b: &str, opts: &Options) -> Result<(), String> {
    let a = parse_pattern(a, opts)?;
    let b = parse_pattern(b, opts)?;
    let report = CompareReport::new(&a, &b);

    if opts.json {
        print_json(&report)
    } else {
        println!("{} {} {} ({})", report.a, report.relation, report.b, report.value);
        Ok(())
    }
}

fn cmd_sort(specs: &[String], opts: &Options) -> Result<(), String> {
    let mut patterns = specs
        .iter()
        .map(|s| parse_pattern(s, opts))
        .collect::<Result<Vec<_>, _>>()?;

    // Broadest first; compare() alone is not transitive enough to sort by.
    patterns.sort_by_cached_key(Pattern::precedence_key);
    patterns.reverse();

    if opts.json {
        print_json(&patterns)
    } else {
        for pattern in &patterns {
            println!("{pattern}");
        }
        Ok(())
    }
}

fn cmd_lookup(rule_files: &[String], url: &str, secondary: Option<&str>, opts: &Options) -> Result<(), String> {
    let (rules, stats) = read_rules(rule_files, opts.verbose && !opts.json)?;
    let primary_url = parse_url(url)?;
    let secondary_url = match secondary {
        Some(s) => parse_url(s)?,
        None => primary_url.clone(),
    };

    let rule = rules.lookup(&primary_url, &secondary_url);

    if opts.json {
        return print_json(&LookupReport::new(
            primary_url.as_str(),
            secondary_url.as_str(),
            rule,
            &stats,
        ));
    }

    if opts.verbose {
        println!(
            "Loaded {} rules from {} files ({} skipped) in {:.1}ms",
            rules.len(),
            stats.files,
            stats.parse.skipped,
            stats.total_ms
        );
    }
    match rule {
        Some(rule) => println!("{}", format_rule(rule.primary, rule.secondary, rule.setting)),
        None => println!("no matching rule"),
    }
    Ok(())
}

fn cmd_rules(files: &[String], opts: &Options) -> Result<(), String> {
    let (rules, stats) = read_rules(files, opts.verbose && !opts.json)?;

    if opts.json {
        let reports: Vec<RuleReport> = rules.iter().map(RuleReport::from).collect();
        return print_json(&reports);
    }

    print!("{}", format_rules(&rules));
    if opts.verbose {
        println!(
            "# {} rules from {} files ({} skipped, {} replaced)",
            rules.len(),
            stats.files,
            stats.parse.skipped,
            stats.parse.replaced
        );
    }
    Ok(())
}

fn cmd_encode(spec: &str, opts: &Options) -> Result<(), String> {
    // Invalid patterns have a wire form too.
    let pattern = parser::parse(spec, opts.mode);
    let hex: String = pattern.to_message().iter().map(|b| format!("{b:02x}")).collect();

    if opts.json {
        print_json(&EncodeReport {
            valid: pattern.is_valid(),
            pattern,
            hex,
        })
    } else {
        println!("{hex}");
        Ok(())
    }
}
