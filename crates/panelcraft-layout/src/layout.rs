use panelcraft_core::Plate;
use panelcraft_core::geom::{PxRect, px_rect};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Drawing box available to the row, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceBox {
    pub width_px: f64,
    pub height_px: f64,
}

impl SurfaceBox {
    pub fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    pub fn has_area(&self) -> bool {
        self.width_px.is_finite()
            && self.height_px.is_finite()
            && self.width_px > 0.0
            && self.height_px > 0.0
    }
}

/// Pixel geometry of one plate for one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateLayoutMeta {
    pub plate_id: String,
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
    /// cm → px factor; identical for every plate of a pass.
    pub scale: f64,
    /// Where the plate starts along the assembled row, spacing included.
    pub row_offset_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl PlateLayoutMeta {
    pub fn rect(&self) -> PxRect {
        px_rect(
            self.pixel_x,
            self.pixel_y,
            self.pixel_width,
            self.pixel_height,
        )
    }

    /// Surface y of the plate's bottom edge.
    pub fn bottom_px(&self) -> f64 {
        self.pixel_y + self.pixel_height
    }
}

/// Result of a layout pass over the whole row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowLayout {
    pub scale: f64,
    pub surface: SurfaceBox,
    pub total_width_cm: f64,
    pub max_height_cm: f64,
    pub spacing_cm: f64,
    pub plates: Vec<PlateLayoutMeta>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl RowLayout {
    pub fn plate(&self, plate_id: &str) -> Option<&PlateLayoutMeta> {
        self.index.get(plate_id).map(|&i| &self.plates[i])
    }

    pub fn contains(&self, plate_id: &str) -> bool {
        self.index.contains_key(plate_id)
    }
}

/// Lays the row out inside `surface`.
///
/// Returns `None` when there is nothing drawable (no plates with a finite positive size, or a
/// surface without area). Callers treat that as "skip rendering", not as a failure.
pub fn compute_layout(plates: &[Plate], spacing_cm: f64, surface: SurfaceBox) -> Option<RowLayout> {
    let drawable: Vec<&Plate> = plates
        .iter()
        .filter(|p| {
            let ok = p.has_drawable_size();
            if !ok {
                tracing::warn!(
                    plate_id = %p.id,
                    width_cm = p.width_cm,
                    height_cm = p.height_cm,
                    "plate skipped by layout: dimensions are not drawable"
                );
            }
            ok
        })
        .collect();

    if drawable.is_empty() || !surface.has_area() {
        return None;
    }

    let spacing_cm = if spacing_cm.is_finite() {
        spacing_cm.max(0.0)
    } else {
        0.0
    };
    let gaps = (drawable.len() - 1) as f64;
    let total_width_cm = drawable.iter().map(|p| p.width_cm).sum::<f64>() + spacing_cm * gaps;
    let max_height_cm = drawable
        .iter()
        .map(|p| p.height_cm)
        .fold(0.0_f64, f64::max);
    if total_width_cm <= 0.0 || max_height_cm <= 0.0 {
        return None;
    }

    let scale = (surface.width_px / total_width_cm).min(surface.height_px / max_height_cm);
    if !(scale.is_finite() && scale > 0.0) {
        return None;
    }

    let mut metas = Vec::with_capacity(drawable.len());
    let mut index = FxHashMap::default();
    let mut cursor_cm = 0.0_f64;
    for plate in drawable {
        let pixel_width = (plate.width_cm * scale).floor().max(1.0);
        let pixel_height = (plate.height_cm * scale).floor().max(1.0);
        index.insert(plate.id.clone(), metas.len());
        metas.push(PlateLayoutMeta {
            plate_id: plate.id.clone(),
            pixel_x: (cursor_cm * scale).floor(),
            pixel_y: surface.height_px - pixel_height,
            pixel_width,
            pixel_height,
            scale,
            row_offset_cm: cursor_cm,
            width_cm: plate.width_cm,
            height_cm: plate.height_cm,
        });
        cursor_cm += plate.width_cm + spacing_cm;
    }

    tracing::debug!(
        plates = metas.len(),
        total_width_cm,
        max_height_cm,
        scale,
        "row layout computed"
    );

    Some(RowLayout {
        scale,
        surface,
        total_width_cm,
        max_height_cm,
        spacing_cm,
        plates: metas,
        index,
    })
}
