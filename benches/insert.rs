use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use scorestore::{Store, Variant};

mod support;

fn bench_insert(c: &mut Criterion) {
    let size = support::usize_env("SCOREBENCH_INSERT_SIZE", 20_000);
    let uniform = support::uniform_pairs(size);
    let hot = support::hot_pairs(size, 64);

    let mut group = c.benchmark_group("insert");
    group.measurement_time(support::duration_env("SCOREBENCH_MEASUREMENT_SECS", 10.0));
    group.sample_size(support::usize_env("SCOREBENCH_SAMPLE_SIZE", 10));
    for variant in Variant::ALL {
        for (name, pairs) in [("uniform", &uniform), ("hot_ids", &hot)] {
            group.throughput(Throughput::Elements(pairs.len() as u64));
            group.bench_with_input(BenchmarkId::new(variant.name(), name), pairs, |b, data| {
                b.iter_batched(
                    || variant.build(),
                    |mut store| {
                        support::fill(&mut store, data);
                        black_box(store.len());
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_insert);
criterion_main!(benches);
