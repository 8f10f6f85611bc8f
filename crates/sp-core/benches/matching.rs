//! Pattern parsing, matching and rule lookup benchmarks

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sp_core::{parse_rule_list, Pattern};
use url::Url;

const SPECS: &[&str] = &[
    "*",
    "[*.]google.com",
    "https://[*.]google.com:443",
    "http://mail.google.com:8080",
    "file:///tmp/test.html",
    "chrome-extension://abcdefghijklmnop/",
    "http://[::1]:8080",
];

fn urls() -> Vec<Url> {
    [
        "https://mail.google.com/inbox",
        "http://www.example.org:8080/a/b",
        "file:///tmp/test.html",
        "http://[::1]:8080/",
    ]
    .iter()
    .filter_map(|u| Url::parse(u).ok())
    .collect()
}

fn rule_list(sites: usize) -> String {
    let mut text = String::from("* ask\n");
    for i in 0..sites {
        text.push_str(&format!("[*.]site{i}.com block\n"));
        text.push_str(&format!("https://www.site{i}.com:443 [*.]cdn{i}.net allow\n"));
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("from_string", |b| {
        b.iter(|| {
            for spec in SPECS {
                black_box(Pattern::from_string(black_box(spec)));
            }
        })
    });
}

fn bench_matches(c: &mut Criterion) {
    let patterns: Vec<Pattern> = SPECS.iter().map(|s| Pattern::from_string(s)).collect();
    let urls = urls();

    c.bench_function("matches", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for pattern in &patterns {
                for url in &urls {
                    if pattern.matches(black_box(url)) {
                        hits += 1;
                    }
                }
            }
            hits
        })
    });
}

fn bench_compare(c: &mut Criterion) {
    let patterns: Vec<Pattern> = SPECS.iter().map(|s| Pattern::from_string(s)).collect();

    c.bench_function("compare", |b| {
        b.iter(|| {
            for a in &patterns {
                for other in &patterns {
                    black_box(a.compare(other));
                }
            }
        })
    });
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let primary = Url::parse("https://www.site7.com/").ok();
    let secondary = Url::parse("https://img.cdn7.net/").ok();
    let (Some(primary), Some(secondary)) = (primary, secondary) else {
        return;
    };

    for sites in [10usize, 100, 1000] {
        let (rules, _) = parse_rule_list(&rule_list(sites));
        group.bench_with_input(BenchmarkId::from_parameter(sites), &rules, |b, rules| {
            b.iter(|| black_box(rules.lookup(black_box(&primary), black_box(&secondary))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_matches, bench_compare, bench_lookup);
criterion_main!(benches);
