use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use engram::{BeliefBase, BeliefPattern, Percept, PerceptBase, PerceptPattern};

const NAMES: usize = 100;
const BELIEFS_PER_NAME: usize = 100;

fn seeded_beliefs() -> BeliefBase {
    let base = BeliefBase::new();
    for name in 0..NAMES {
        for i in 0..BELIEFS_PER_NAME {
            base.add(
                format!("belief-{name}"),
                vec![format!("arg-{i}"), (i % 7).to_string()],
            )
            .unwrap();
        }
    }
    base
}

fn seeded_percepts() -> PerceptBase {
    let base = PerceptBase::new();
    for kind in 0..NAMES {
        for i in 0..BELIEFS_PER_NAME {
            base.upsert(Percept::new(
                format!("kind-{kind}"),
                format!("obj-{i}"),
                vec![i.to_string()],
            ))
            .unwrap();
        }
    }
    base
}

fn bench_belief_bucket_search(c: &mut Criterion) {
    let base = seeded_beliefs();
    let pattern = BeliefPattern::new().name("belief-50").wildcard().arg("3");

    let mut group = c.benchmark_group("beliefs");
    group.throughput(Throughput::Elements(BELIEFS_PER_NAME as u64));
    group.bench_function("bucket_search", |b| {
        b.iter(|| base.search(&pattern).unwrap());
    });
    group.finish();
}

fn bench_belief_full_scan(c: &mut Criterion) {
    let base = seeded_beliefs();
    let pattern = BeliefPattern::new().wildcard().arg("3");

    let mut group = c.benchmark_group("beliefs");
    group.throughput(Throughput::Elements((NAMES * BELIEFS_PER_NAME) as u64));
    group.bench_function("full_scan", |b| {
        b.iter(|| base.search(&pattern).unwrap());
    });
    group.finish();
}

fn bench_percept_key_lookup(c: &mut Criterion) {
    let base = seeded_percepts();
    let pattern = PerceptPattern::new().kind("kind-50").object("obj-50");

    c.bench_function("percepts/double_key_lookup", |b| {
        b.iter(|| base.search(&pattern).unwrap());
    });
}

fn bench_percept_bucket_scan(c: &mut Criterion) {
    let base = seeded_percepts();
    let pattern = PerceptPattern::new().object("obj-50");

    let mut group = c.benchmark_group("percepts");
    group.throughput(Throughput::Elements(NAMES as u64));
    group.bench_function("secondary_bucket_scan", |b| {
        b.iter(|| base.search(&pattern).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_belief_bucket_search,
    bench_belief_full_scan,
    bench_percept_key_lookup,
    bench_percept_bucket_scan
);
criterion_main!(benches);
