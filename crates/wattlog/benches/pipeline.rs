//! Benchmarks for the extraction and analysis pipeline.
//!
//! Run with:
//! ```bash
//! cargo bench --bench pipeline
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use wattlog::{analyze_measurements, compare_datasets, Config};
use wattlog_core::{extract, read_batch, MeasurementTable, QuantityColumn};

/// Power log sampled every 37 ms with a slow sine drift.
fn synthetic_table(rows: usize, phase: f64) -> MeasurementTable {
    let time_ms = (0..rows).map(|i| i as f64 * 37.0).collect();
    let watts = (0..rows)
        .map(|i| 15.0 + 3.0 * ((i as f64 / 50.0) + phase).sin())
        .collect();
    MeasurementTable::new(time_ms, QuantityColumn::CpuPower, watts)
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    for rows in [1_000, 10_000, 100_000] {
        let table = synthetic_table(rows, 0.0);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, table| {
            b.iter(|| extract(black_box(table)))
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let tables: Vec<MeasurementTable> = (0..8).map(|k| synthetic_table(20_000, k as f64)).collect();
    let names: Vec<String> = (0..8).map(|k| format!("run{}", k)).collect();

    c.bench_function("read_batch_8x20k", |b| {
        b.iter(|| read_batch(black_box(&tables), &names))
    });

    let config = Config::default();
    let first = match read_batch(&tables[..4], &names[..4]) {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("Failed to build batch: {}", e);
            return;
        }
    };
    let second = match read_batch(&tables[4..], &names[4..]) {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("Failed to build batch: {}", e);
            return;
        }
    };

    c.bench_function("analyze_4x20k", |b| {
        b.iter(|| analyze_measurements(black_box(&first), &config))
    });
    c.bench_function("compare_4x20k", |b| {
        b.iter(|| compare_datasets(black_box(&first), black_box(&second), &config))
    });
}

criterion_group!(benches, bench_extract, bench_batch);
criterion_main!(benches);
