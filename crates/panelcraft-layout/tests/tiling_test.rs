use panelcraft_core::{MotifSpec, Plate};
use panelcraft_layout::{MotifGeometry, SurfaceBox, compute_layout, split_into_tiles, tile_plate, tile_row};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn spans_carry_on_behind_the_spacing() {
    let plates = vec![Plate::new("a", 250.0, 30.0), Plate::new("b", 30.0, 30.0)];
    let layout = compute_layout(&plates, 1.0, SurfaceBox::new(800.0, 200.0)).unwrap();
    // 2 px per cm in the source image
    let motif = MotifGeometry::new(MotifSpec::new(100.0, 128.0), 200, 256);

    let rows = tile_row(&layout, &motif);
    assert_eq!(rows.len(), 2);

    let a = &rows[0].draws;
    assert_eq!(a.len(), 3);
    assert_eq!(
        a.iter().map(|d| (d.tile_x, d.flip_x)).collect::<Vec<_>>(),
        vec![(0, false), (1, true), (2, false)]
    );
    let covered: f64 = a.iter().map(|d| d.dst.size.width).sum();
    assert!(close(covered, 711.0));
    assert!(close(a[1].dst.origin.x, 100.0 * 711.0 / 250.0));

    // Plate b starts at 251 cm: tile 2 again, 51 cm into it.
    let b = &rows[1].draws;
    assert_eq!(b.len(), 1);
    assert_eq!((b[0].tile_x, b[0].flip_x), (2, false));
    assert!(close(b[0].src.origin.x, 102.0));
    assert!(close(b[0].src.size.width, 60.0));
}

#[test]
fn vertical_sampling_is_bottom_aligned() {
    let plates = vec![Plate::new("a", 50.0, 30.0)];
    let layout = compute_layout(&plates, 1.0, SurfaceBox::new(500.0, 300.0)).unwrap();
    let motif = MotifGeometry::new(MotifSpec::new(300.0, 128.0), 600, 256);

    let draws = tile_plate(&layout.plates[0], &motif);
    assert_eq!(draws.len(), 1);
    let d = draws[0];
    assert!(!d.flip_y);
    // the lowest 30 cm of a 128 cm motif: rows 196..256
    assert!(close(d.src.origin.y, 196.0));
    assert!(close(d.src.size.height, 60.0));
    assert!(close(d.dst.max_y(), 300.0));
}

#[test]
fn rows_above_the_motif_height_are_mirrored() {
    let plates = vec![Plate::new("a", 50.0, 128.0)];
    let layout = compute_layout(&plates, 1.0, SurfaceBox::new(500.0, 256.0)).unwrap();
    let motif = MotifGeometry::new(MotifSpec::new(300.0, 100.0), 600, 200);

    let draws = tile_plate(&layout.plates[0], &motif);
    assert_eq!(draws.len(), 2);
    assert_eq!((draws[0].tile_y, draws[0].flip_y), (0, false));
    assert_eq!((draws[1].tile_y, draws[1].flip_y), (1, true));

    // The mirrored 28 cm reflect the top of the motif, which the unmirrored tile ends on.
    assert!(close(draws[1].src.origin.y, 0.0));
    assert!(close(draws[1].src.size.height, 56.0));
    // The mirrored tile sits on top of the first one.
    assert!(close(draws[1].dst.max_y(), draws[0].dst.origin.y));
}

#[test]
fn mirrored_partial_span_reads_the_reflected_source() {
    let spans = split_into_tiles(120.0, 30.0, 100.0);
    assert_eq!(spans.len(), 1);
    assert!(spans[0].mirrored);
    assert_eq!((spans[0].offset_cm, spans[0].run_cm), (20.0, 30.0));

    let plates = vec![Plate::new("a", 119.0, 30.0), Plate::new("b", 30.0, 30.0)];
    let layout = compute_layout(&plates, 1.0, SurfaceBox::new(1490.0, 300.0)).unwrap();
    let motif = MotifGeometry::new(MotifSpec::new(100.0, 128.0), 100, 128);
    let draws = tile_plate(layout.plate("b").unwrap(), &motif);
    assert_eq!(draws.len(), 1);
    assert!(draws[0].flip_x);
    // 100 - 20 - 30
    assert!(close(draws[0].src.origin.x, 50.0));
}

#[test]
fn undrawable_motif_yields_nothing() {
    let plates = vec![Plate::new("a", 50.0, 30.0)];
    let layout = compute_layout(&plates, 1.0, SurfaceBox::new(500.0, 300.0)).unwrap();
    let empty = MotifGeometry::new(MotifSpec::new(300.0, 128.0), 0, 256);
    assert!(tile_plate(&layout.plates[0], &empty).is_empty());
    let flat = MotifGeometry::new(MotifSpec::new(0.0, 128.0), 600, 256);
    assert!(tile_plate(&layout.plates[0], &flat).is_empty());
}

#[test]
fn sub_pixel_motif_is_not_tiled() {
    let plates = vec![Plate::new("a", 250.0, 128.0)];
    let layout = compute_layout(&plates, 1.0, SurfaceBox::new(800.0, 400.0)).unwrap();
    // 0.05 cm at about 3.1 px per cm is well below one pixel per period
    let tiny = MotifGeometry::new(MotifSpec::new(0.05, 0.05), 600, 256);
    assert!(tile_plate(&layout.plates[0], &tiny).is_empty());

    // at the smallest accepted size each period still covers a few pixels
    let small = MotifGeometry::new(MotifSpec::new(1.0, 1.0), 8, 8);
    let draws = tile_plate(&layout.plates[0], &small);
    assert_eq!(draws.len(), 250 * 128);
}

#[test]
fn long_segment_terminates_with_exact_coverage() {
    let spans = split_into_tiles(0.1, 1000.0, 0.3);
    let total: f64 = spans.iter().map(|s| s.run_cm).sum();
    assert!(close(total, 1000.0));
    assert!(spans.windows(2).all(|w| w[1].index == w[0].index + 1));
}
