use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use panelcraft_core::{MotifSpec, Plate};
use panelcraft_layout::{MotifGeometry, SurfaceBox, compute_layout, tile_row};
use std::hint::black_box;
use std::time::Duration;

fn build_row(count: usize) -> Vec<Plate> {
    (0..count)
        .map(|i| {
            let width = 20.0 + (i as f64 * 37.0) % 280.0;
            let height = 30.0 + (i as f64 * 13.0) % 98.0;
            Plate::new(format!("p{i}"), width, height)
        })
        .collect()
}

fn bench_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_layout");
    group.measurement_time(Duration::from_secs(5));

    let surface = SurfaceBox::new(1600.0, 400.0);
    let motif = MotifGeometry::new(MotifSpec::new(300.0, 128.0), 3000, 1280);

    for count in [2usize, 5, 10] {
        let plates = build_row(count);
        group.bench_with_input(BenchmarkId::new("compute_layout", count), &plates, |b, plates| {
            b.iter(|| black_box(compute_layout(black_box(plates), 1.0, surface)))
        });

        let Some(layout) = compute_layout(&plates, 1.0, surface) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("tile_row", count), &layout, |b, layout| {
            b.iter(|| black_box(tile_row(black_box(layout), &motif)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_row);
criterion_main!(benches);
