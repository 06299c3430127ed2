use criterion::{black_box, criterion_group, criterion_main, Criterion};

use linkgate::{evaluate, DomainRule, RuleKind, SecurityMode};

fn small_ruleset() -> Vec<DomainRule> {
    vec![
        DomainRule::new("*.example.com", RuleKind::Whitelist),
        DomainRule::new("bad.example.com", RuleKind::Blacklist),
        DomainRule::new("*.partner.org", RuleKind::Whitelist),
        DomainRule::new("tracker.net", RuleKind::Blacklist),
    ]
}

fn large_ruleset() -> Vec<DomainRule> {
    let mut rules = Vec::with_capacity(2000);
    for i in 0..1000 {
        rules.push(DomainRule::new(
            format!("site{i}.example.com"),
            RuleKind::Whitelist,
        ));
        rules.push(DomainRule::new(
            format!("*.vendor{i}.net"),
            RuleKind::Blacklist,
        ));
    }
    rules
}

fn bench_small_ruleset(c: &mut Criterion) {
    let rules = small_ruleset();

    c.bench_function("evaluate_small_ruleset_hit", |b| {
        b.iter(|| {
            evaluate(
                black_box("bad.example.com"),
                SecurityMode::Whitelist,
                black_box(&rules),
            )
        })
    });

    c.bench_function("evaluate_small_ruleset_miss", |b| {
        b.iter(|| {
            evaluate(
                black_box("unrelated.com"),
                SecurityMode::Blacklist,
                black_box(&rules),
            )
        })
    });
}

fn bench_large_ruleset(c: &mut Criterion) {
    let rules = large_ruleset();

    c.bench_function("evaluate_large_ruleset_hit", |b| {
        b.iter(|| {
            evaluate(
                black_box("deep.vendor500.net"),
                SecurityMode::Blacklist,
                black_box(&rules),
            )
        })
    });

    c.bench_function("evaluate_large_ruleset_miss", |b| {
        b.iter(|| {
            evaluate(
                black_box("unrelated.com"),
                SecurityMode::Blacklist,
                black_box(&rules),
            )
        })
    });
}

fn bench_invalid_target(c: &mut Criterion) {
    let rules = small_ruleset();

    c.bench_function("evaluate_invalid_target", |b| {
        b.iter(|| {
            evaluate(
                black_box("http://not-a-hostname/"),
                SecurityMode::Whitelist,
                black_box(&rules),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_small_ruleset,
    bench_large_ruleset,
    bench_invalid_target,
);

criterion_main!(benches);
