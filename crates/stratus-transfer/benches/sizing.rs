use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use stratus_transfer::core::{chunk_size, part_lengths, split_range, stream_count};
use stratus_transfer::data::{ByteRange, DownloadOptions, UploadPartPolicy};

fn bench_part_lengths(c: &mut Criterion) {
    let policy = UploadPartPolicy::default();
    let mut group = c.benchmark_group("part_lengths");
    for total in [100_000_000u64, 10_000_000_000, 1_000_000_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(total), &total, |b, &total| {
            b.iter(|| black_box(part_lengths(&policy, black_box(total))).len());
        });
    }
    group.finish();
}

fn bench_split_range(c: &mut Criterion) {
    let range = ByteRange::new(0, 10 * 1024 * 1024 * 1024 - 1);
    c.bench_function("split_range_16", |b| {
        b.iter(|| black_box(split_range(black_box(range), 16)));
    });
}

fn bench_download_sizing(c: &mut Criterion) {
    let options = DownloadOptions::default();
    c.bench_function("download_sizing", |b| {
        b.iter(|| {
            let len = black_box(3_222_111_000u64);
            let streams = stream_count(len, options.min_part_size, options.max_streams);
            (streams, chunk_size(&options, len))
        });
    });
}

criterion_group!(
    benches,
    bench_part_lengths,
    bench_split_range,
    bench_download_sizing
);
criterion_main!(benches);
