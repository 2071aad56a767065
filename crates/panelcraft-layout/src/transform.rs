//! cm ↔ px mapping for a laid-out plate.
//!
//! Centimeter y grows upward from the plate's bottom edge, surface y grows downward from the top
//! of the surface. The horizontal origin is the plate's left edge in the row.

use crate::layout::{PlateLayoutMeta, RowLayout};
use panelcraft_core::geom::{CmPoint, PxPoint, cm_point, px_point};

impl PlateLayoutMeta {
    pub fn cm_to_screen(&self, p: CmPoint) -> PxPoint {
        px_point(
            self.pixel_x + p.x * self.scale,
            self.bottom_px() - p.y * self.scale,
        )
    }

    pub fn screen_to_cm(&self, p: PxPoint) -> CmPoint {
        cm_point(
            (p.x - self.pixel_x) / self.scale,
            (self.bottom_px() - p.y) / self.scale,
        )
    }

    pub fn cm_to_px_len(&self, len_cm: f64) -> f64 {
        len_cm * self.scale
    }
}

impl RowLayout {
    /// Maps a plate-local cm point onto the surface; `None` if the plate is not in this layout.
    pub fn cm_to_screen(&self, plate_id: &str, p: CmPoint) -> Option<PxPoint> {
        Some(self.plate(plate_id)?.cm_to_screen(p))
    }

    /// Inverse of [`RowLayout::cm_to_screen`].
    pub fn screen_to_cm(&self, plate_id: &str, p: PxPoint) -> Option<CmPoint> {
        Some(self.plate(plate_id)?.screen_to_cm(p))
    }
}
