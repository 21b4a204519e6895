//! Feed parsing benchmarks.
//!
//! Run with: `cargo bench --package quakewatch-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quakewatch_bench::{FeedConfig, synthetic_feed};
use quakewatch_fetch::parse_records;
use std::hint::black_box;

/// Benchmark configurations for different feed sizes.
fn benchmark_configs() -> Vec<(&'static str, FeedConfig)> {
    vec![
        (
            "10-clean",
            FeedConfig {
                features: 10,
                broken_every: 0,
            },
        ),
        (
            "1k-clean",
            FeedConfig {
                features: 1_000,
                broken_every: 0,
            },
        ),
        (
            "1k-10pct-broken",
            FeedConfig {
                features: 1_000,
                broken_every: 10,
            },
        ),
        (
            "20k-clean",
            FeedConfig {
                features: 20_000,
                broken_every: 0,
            },
        ),
    ]
}

fn parse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (name, config) in benchmark_configs() {
        let feed = synthetic_feed(config);
        let expected = config.expected_records();
        group.throughput(Throughput::Bytes(feed.len() as u64));

        group.bench_with_input(BenchmarkId::new("parse_records", name), &feed, |b, feed| {
            b.iter(|| {
                let records = parse_records(black_box(feed)).expect("synthetic feed parses");
                assert_eq!(records.len(), expected);
                records
            });
        });
    }

    group.finish();
}

criterion_group!(benches, parse_benchmark);
criterion_main!(benches);
