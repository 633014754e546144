use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use station_aggregator::models::Chunk;
use station_aggregator::processors::{scan_chunk, Coordinator};
use station_aggregator::readers::plan_chunks;

// Generate measurement data shaped like the real input: short UTF-8 station
// names, one decimal place, a comment line sprinkled in here and there.
fn create_measurement_buffer(lines: usize, stations: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(lines * 16);
    for i in 0..lines {
        if i % 5_000 == 0 {
            buf.extend_from_slice(b"# sensor export batch\n");
        }
        let station = i % stations;
        let value = (i % 700) as f64 / 10.0 - 35.0;
        buf.extend_from_slice(format!("Station-{station};{value:.1}\n").as_bytes());
    }
    buf
}

fn benchmark_record_scanner(c: &mut Criterion) {
    let buf = create_measurement_buffer(100_000, 400);

    c.bench_function("record_scanner_100k", |b| {
        b.iter(|| {
            let accumulator = scan_chunk(&buf, Chunk::new(0, buf.len())).unwrap();
            black_box(accumulator.len())
        })
    });
}

fn benchmark_chunk_planner(c: &mut Criterion) {
    let buf = create_measurement_buffer(100_000, 400);

    c.bench_function("chunk_planner_16_way", |b| {
        b.iter(|| {
            let chunks = plan_chunks(&buf, 16).unwrap();
            black_box(chunks.len())
        })
    });
}

fn benchmark_aggregation_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_by_size");

    for &lines in &[10_000, 100_000, 500_000] {
        let buf = create_measurement_buffer(lines, 400);
        group.bench_with_input(BenchmarkId::new("lines", lines), &buf, |b, buf| {
            let coordinator = Coordinator::default();
            b.iter(|| {
                let summary = coordinator.aggregate(buf, None).unwrap();
                black_box(summary.len())
            })
        });
    }
    group.finish();
}

fn benchmark_aggregation_by_workers(c: &mut Criterion) {
    let buf = create_measurement_buffer(200_000, 400);
    let mut group = c.benchmark_group("aggregate_by_workers");

    for &workers in &[1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("workers", workers),
            &workers,
            |b, &workers| {
                let coordinator = Coordinator::new(workers);
                b.iter(|| {
                    let summary = coordinator.aggregate(&buf, None).unwrap();
                    black_box(summary.record_count())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_record_scanner,
    benchmark_chunk_planner,
    benchmark_aggregation_by_size,
    benchmark_aggregation_by_workers
);
criterion_main!(benches);
