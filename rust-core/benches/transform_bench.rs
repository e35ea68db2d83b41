//! Benchmarks for the recursive transform against rustfft
//!
//! Run with: cargo bench -p radix2-fft-core --bench transform_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use radix2_fft::harness::alternating_signal;
use radix2_fft::spectrum::{transform, ReferenceFft};

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    for size in [64usize, 256, 1024, 4096] {
        let signal = alternating_signal(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("recursive", size), &signal, |b, s| {
            b.iter(|| transform(black_box(s)))
        });

        // planned once, only the transform is timed
        let mut reference = ReferenceFft::new(size);
        group.bench_with_input(BenchmarkId::new("rustfft", size), &signal, |b, s| {
            b.iter(|| reference.process(black_box(s)))
        });
    }

    group.finish();
}

fn bench_padding(c: &mut Criterion) {
    let mut group = c.benchmark_group("padding");

    // 3000 pads to 4096
    let signal = alternating_signal(3000);
    group.bench_function("pad_3000", |b| b.iter(|| transform(black_box(&signal))));

    group.finish();
}

criterion_group!(benches, bench_transform, bench_padding);
criterion_main!(benches);
