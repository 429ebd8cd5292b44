//! Throughput benchmarks for record decoding and capture assembly

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ecg_processing::{assemble, decode, RecordDecoder};

fn record(counter: usize) -> String {
    let mut text = format!("{:06X}", counter % 0x100_0000);
    for channel in 0..8 {
        let code = (counter * 31 + channel * 977) % 40_000;
        text.push_str(&format!("{:06X}", code));
    }
    text.push('\r');
    text
}

/// Single record decode, accepted and rejected paths
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let accepted = record(42);
    let too_short = accepted[..40].to_string();
    let mut over_guard = accepted.clone();
    over_guard.replace_range(6..12, "7FFFFF");

    group.bench_function("accepted", |b| b.iter(|| black_box(decode(black_box(&accepted)))));
    group.bench_function("shape_rejected", |b| b.iter(|| black_box(decode(black_box(&too_short)))));
    group.bench_function("range_rejected", |b| b.iter(|| black_box(decode(black_box(&over_guard)))));

    let decoder = RecordDecoder::default();
    group.bench_function("reused_decoder", |b| {
        b.iter(|| black_box(decoder.decode(black_box(&accepted))))
    });

    group.finish();
}

/// Whole-capture assembly at typical file sizes
fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");

    for &size in &[250usize, 1_000, 10_000] {
        let records: Vec<String> = (0..size).map(record).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| black_box(assemble(black_box(records))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_assemble);
criterion_main!(benches);
