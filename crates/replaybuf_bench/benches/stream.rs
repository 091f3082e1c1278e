//! Replay stream benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use replaybuf_bench::utils::{drain, file_stream, memory_stream, random_data};
use std::io::Cursor;
use tempfile::TempDir;

const SIZES: [usize; 3] = [16 * 1024, 256 * 1024, 1024 * 1024];
const READ_STEP: usize = 4096;

/// Baseline: reading the source directly.
fn bench_direct(c: &mut Criterion) {
    let mut group = c.benchmark_group("direct_read");

    for size in SIZES.iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let data = random_data(size);

            b.iter(|| {
                let mut reader = Cursor::new(data.clone());
                black_box(drain(&mut reader, READ_STEP));
            });
        });
    }

    group.finish();
}

/// First pass while recording into memory.
fn bench_recording_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("recording_memory");

    for size in SIZES.iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let data = random_data(size);

            b.iter(|| {
                let mut stream = memory_stream(&data);
                black_box(drain(&mut stream, READ_STEP));
            });
        });
    }

    group.finish();
}

/// First pass while recording into a spill file.
fn bench_recording_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("recording_file");
    group.sample_size(20);

    for size in SIZES.iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let temp_dir = TempDir::new().unwrap();
            let data = random_data(size);

            b.iter(|| {
                let mut stream = file_stream(temp_dir.path(), &data);
                black_box(drain(&mut stream, READ_STEP));
                stream.close().unwrap();
            });
        });
    }

    group.finish();
}

/// Second pass served entirely from the spill file.
fn bench_replay_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay_file");
    group.sample_size(20);

    for size in SIZES.iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let temp_dir = TempDir::new().unwrap();
            let data = random_data(size);
            let mut stream = file_stream(temp_dir.path(), &data);
            drain(&mut stream, READ_STEP);

            b.iter(|| {
                stream.reset().unwrap();
                black_box(drain(&mut stream, READ_STEP));
            });
        });
    }

    group.finish();
}

/// Sniff a header, then stop and stream the rest without spilling.
fn bench_sniff_then_passthrough(c: &mut Criterion) {
    let mut group = c.benchmark_group("sniff_then_passthrough");
    group.sample_size(20);

    for size in SIZES.iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let temp_dir = TempDir::new().unwrap();
            let data = random_data(size);

            b.iter(|| {
                let mut stream = file_stream(temp_dir.path(), &data);
                let mut header = [0u8; 512];
                stream.read(&mut header).unwrap();
                stream.reset().unwrap();
                stream.stop();
                black_box(drain(&mut stream, READ_STEP));
                stream.close().unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_direct,
    bench_recording_memory,
    bench_recording_file,
    bench_replay_file,
    bench_sniff_then_passthrough,
);
criterion_main!(benches);
