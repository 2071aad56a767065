//! Typed geometry aliases.
//!
//! Physical plate space (`Cm`, y grows upward from a plate's bottom edge), raster surface space
//! (`Px`, y grows downward from the surface top) and motif source space (`ImagePx`) are kept apart
//! at the type level so a centimeter value can never be drawn as a pixel by accident.

/// Physical centimeters on a plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cm {}

/// Pixels on the raster output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Px {}

/// Pixels of the decoded motif image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePx {}

pub type CmPoint = euclid::Point2D<f64, Cm>;
pub type CmSize = euclid::Size2D<f64, Cm>;
pub type CmBox = euclid::Box2D<f64, Cm>;

pub type PxPoint = euclid::Point2D<f64, Px>;
pub type PxRect = euclid::Rect<f64, Px>;

pub type ImageRect = euclid::Rect<f64, ImagePx>;

pub fn cm_point(x: f64, y: f64) -> CmPoint {
    euclid::point2(x, y)
}

pub fn cm_size(width: f64, height: f64) -> CmSize {
    euclid::size2(width, height)
}

pub fn px_point(x: f64, y: f64) -> PxPoint {
    euclid::point2(x, y)
}

pub fn px_rect(x: f64, y: f64, width: f64, height: f64) -> PxRect {
    euclid::rect(x, y, width, height)
}

pub fn image_rect(x: f64, y: f64, width: f64, height: f64) -> ImageRect {
    euclid::rect(x, y, width, height)
}

/// Builds a centimeter box from its lower-left corner and size.
pub fn cm_box(origin: CmPoint, size: CmSize) -> CmBox {
    CmBox::new(origin, origin + size)
}
