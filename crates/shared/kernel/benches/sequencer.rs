use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use scopie_kernel::prelude::*;
use std::hint::black_box;

#[derive(Debug, Clone, Default)]
struct Counter(u64);

fn fixture(size: usize) -> (ScopeRegistry, OperationTable<Counter>, Params) {
    let mut registry = ScopeRegistry::new();
    let mut operations = OperationTable::new();
    let mut params = Params::new();

    for i in 0..size {
        let name = format!("scope_{i}");
        let options = match i % 3 {
            0 => ScopeOptions::builder().type_tag(ScopeType::Integer).build(),
            1 => ScopeOptions::builder().only(["index"]).default_value("asc").build(),
            _ => ScopeOptions::builder().except(["show"]).allow_blank(true).build(),
        };
        registry.declare([name.as_str()], options);
        operations.chain(name.as_str(), |c: &Counter, _| Counter(c.0 + 1));
        if i % 3 != 1 {
            params.insert(name, Param::from(i.to_string()));
        }
    }

    (registry, operations, params)
}

fn bench_apply_scopes(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_scopes");

    for size in [8usize, 64, 512] {
        let (registry, operations, params) = fixture(size);
        let sequencer = Sequencer::new(&registry, &operations);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("index", size), &params, |b, p| {
            b.iter(|| sequencer.apply_scopes(Counter::default(), black_box(p), Some("index")).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("current_scopes", size), &params, |b, p| {
            b.iter(|| sequencer.current_scopes(black_box(p), None).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_apply_scopes);
criterion_main!(benches);
