//! Seam-free motif sampling across the assembled row.
//!
//! The motif covers `width_cm × height_cm` physically and repeats in both directions. Every odd
//! repetition is mirrored on its axis, so neighbouring tiles always meet on identical pixels and
//! diagonal neighbours are mirrored on both axes. Tile indices come from the absolute row position
//! (plate offsets and inter-plate spacing included), so the motif runs on behind the gaps.

use crate::EPSILON_CM;
use crate::layout::{PlateLayoutMeta, RowLayout};
use panelcraft_core::MotifSpec;
use panelcraft_core::geom::{ImageRect, PxRect, image_rect, px_rect};
use serde::Serialize;

/// Tiles that would be drawn narrower or shorter than this are not drawn at all.
pub const MIN_TILE_PX: f64 = 1.0;

/// Physical and pixel size of a decoded motif.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotifGeometry {
    pub width_cm: f64,
    pub height_cm: f64,
    pub image_width_px: u32,
    pub image_height_px: u32,
}

impl MotifGeometry {
    pub fn new(spec: MotifSpec, image_width_px: u32, image_height_px: u32) -> Self {
        Self {
            width_cm: spec.width_cm,
            height_cm: spec.height_cm,
            image_width_px,
            image_height_px,
        }
    }

    pub fn is_drawable(&self) -> bool {
        self.width_cm.is_finite()
            && self.height_cm.is_finite()
            && self.width_cm > 0.0
            && self.height_cm > 0.0
            && self.image_width_px > 0
            && self.image_height_px > 0
    }

    fn px_per_cm_x(&self) -> f64 {
        f64::from(self.image_width_px) / self.width_cm
    }

    fn px_per_cm_y(&self) -> f64 {
        f64::from(self.image_height_px) / self.height_cm
    }
}

/// One run of a segment that stays inside a single tile period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileSpan {
    pub index: i64,
    pub mirrored: bool,
    /// Position of the run inside its tile period.
    pub offset_cm: f64,
    pub run_cm: f64,
    /// Position of the run relative to the start of the segment.
    pub segment_offset_cm: f64,
}

impl TileSpan {
    /// Start of the run in unmirrored motif coordinates. Mirrored tiles read the reflected span so
    /// that their content continues the neighbouring tile.
    fn source_start_cm(&self, base_cm: f64) -> f64 {
        if self.mirrored {
            (base_cm - self.offset_cm - self.run_cm).max(0.0)
        } else {
            self.offset_cm
        }
    }
}

/// A single draw call: copy `src` from the motif into `dst` on the surface, flipped about the
/// centre of `dst` on the flagged axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDraw {
    pub src: ImageRect,
    pub dst: PxRect,
    pub flip_x: bool,
    pub flip_y: bool,
    pub tile_x: i64,
    pub tile_y: i64,
}

/// Tiles drawn onto one plate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateTiles {
    pub plate_id: String,
    pub draws: Vec<TileDraw>,
}

/// Index of the tile period containing `position_cm`, and whether that period is mirrored.
pub fn tile_index(position_cm: f64, base_cm: f64) -> (i64, bool) {
    let index = (position_cm / base_cm).floor() as i64;
    (index, index.rem_euclid(2) == 1)
}

/// Splits `[start_cm, start_cm + length_cm)` at every tile boundary.
///
/// Degenerate input (non-positive or non-finite length/base) yields no spans.
pub fn split_into_tiles(start_cm: f64, length_cm: f64, base_cm: f64) -> Vec<TileSpan> {
    let mut spans = Vec::new();
    if !(start_cm.is_finite() && length_cm.is_finite() && base_cm.is_finite()) {
        return spans;
    }
    if length_cm <= 0.0 || base_cm <= 0.0 {
        return spans;
    }

    let mut remaining = length_cm;
    let mut position = start_cm;
    while remaining > EPSILON_CM {
        let (mut index, _) = tile_index(position, base_cm);
        let mut offset = (position - index as f64 * base_cm).max(0.0);
        // Rounding can leave us a hair before the next boundary.
        if base_cm - offset <= EPSILON_CM {
            index += 1;
            offset = 0.0;
        }
        let run = (base_cm - offset).min(remaining);
        spans.push(TileSpan {
            index,
            mirrored: index.rem_euclid(2) == 1,
            offset_cm: offset,
            run_cm: run,
            segment_offset_cm: position - start_cm,
        });
        remaining -= run;
        position += run;
    }
    spans
}

/// Physical extent of a plate segment within the row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Absolute row position of the segment's left edge.
    pub start_x_cm: f64,
    /// Height of the segment's bottom edge above the row bottom.
    pub start_y_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

/// Decomposes one segment into per-tile draw calls targeting `dst` (the segment's pixel box).
///
/// A motif period smaller than [`MIN_TILE_PX`] on screen yields no draws, which keeps the draw
/// count bounded by the pixel size of `dst`.
pub fn tile_segment(motif: &MotifGeometry, segment: &Segment, dst: PxRect) -> Vec<TileDraw> {
    if !motif.is_drawable() || segment.width_cm <= 0.0 || segment.height_cm <= 0.0 {
        return Vec::new();
    }
    let tile_w_px = motif.width_cm * dst.size.width / segment.width_cm;
    let tile_h_px = motif.height_cm * dst.size.height / segment.height_cm;
    if !(tile_w_px >= MIN_TILE_PX && tile_h_px >= MIN_TILE_PX) {
        tracing::warn!(
            tile_w_px,
            tile_h_px,
            "motif period is below one pixel, skipping tiles"
        );
        return Vec::new();
    }

    let columns = split_into_tiles(segment.start_x_cm, segment.width_cm, motif.width_cm);
    let rows = split_into_tiles(segment.start_y_cm, segment.height_cm, motif.height_cm);
    let kx = motif.px_per_cm_x();
    let ky = motif.px_per_cm_y();
    let img_h = f64::from(motif.image_height_px);
    let dst_px_per_cm_x = dst.size.width / segment.width_cm;
    let dst_px_per_cm_y = dst.size.height / segment.height_cm;
    let dst_bottom = dst.max_y();

    let mut draws = Vec::with_capacity(columns.len() * rows.len());
    for col in &columns {
        let src_x = col.source_start_cm(motif.width_cm) * kx;
        let src_w = col.run_cm * kx;
        let dst_x = dst.origin.x + col.segment_offset_cm * dst_px_per_cm_x;
        let dst_w = col.run_cm * dst_px_per_cm_x;

        for row in &rows {
            // Motif y is measured from the image bottom; image rows run top-down.
            let src_lo = row.source_start_cm(motif.height_cm);
            let src_h = row.run_cm * ky;
            let src_y = (img_h - (src_lo + row.run_cm) * ky).max(0.0);

            let dst_h = row.run_cm * dst_px_per_cm_y;
            let dst_y = dst_bottom - (row.segment_offset_cm + row.run_cm) * dst_px_per_cm_y;

            draws.push(TileDraw {
                src: image_rect(src_x, src_y, src_w, src_h),
                dst: px_rect(dst_x, dst_y, dst_w, dst_h),
                flip_x: col.mirrored,
                flip_y: row.mirrored,
                tile_x: col.index,
                tile_y: row.index,
            });
        }
    }
    draws
}

/// Tiles covering one laid-out plate.
pub fn tile_plate(meta: &PlateLayoutMeta, motif: &MotifGeometry) -> Vec<TileDraw> {
    let segment = Segment {
        start_x_cm: meta.row_offset_cm,
        start_y_cm: 0.0,
        width_cm: meta.width_cm,
        height_cm: meta.height_cm,
    };
    tile_segment(motif, &segment, meta.rect())
}

/// Tiles for every plate of a layout, in layout order.
pub fn tile_row(layout: &RowLayout, motif: &MotifGeometry) -> Vec<PlateTiles> {
    layout
        .plates
        .iter()
        .map(|meta| {
            let draws = tile_plate(meta, motif);
            tracing::debug!(plate_id = %meta.plate_id, draws = draws.len(), "plate tiled");
            PlateTiles {
                plate_id: meta.plate_id.clone(),
                draws,
            }
        })
        .collect()
}
