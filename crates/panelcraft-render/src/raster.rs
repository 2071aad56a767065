use crate::error::{RenderError, Result};
use panelcraft_core::MotifSpec;
use panelcraft_layout::MotifGeometry;
use tiny_skia::{IntSize, Pixmap, PixmapRef};

/// A decoded raster (motif or socket icon), stored premultiplied for drawing.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixmap: Pixmap,
}

impl RasterImage {
    /// Decodes PNG or JPEG bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).map_err(RenderError::Decode)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    /// Wraps straight (non-premultiplied) RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage);
        }
        for px in data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * a + 127) / 255) as u8;
            }
        }
        let size = IntSize::from_wh(width, height).ok_or(RenderError::EmptyImage)?;
        let pixmap = Pixmap::from_vec(data, size).ok_or(RenderError::PixmapAlloc)?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub(crate) fn as_ref(&self) -> PixmapRef<'_> {
        self.pixmap.as_ref()
    }
}

/// A motif image together with the physical size it represents.
#[derive(Debug, Clone)]
pub struct Motif {
    pub spec: MotifSpec,
    pub image: RasterImage,
}

impl Motif {
    pub fn new(spec: MotifSpec, image: RasterImage) -> Self {
        Self { spec, image }
    }

    pub fn geometry(&self) -> MotifGeometry {
        MotifGeometry::new(self.spec, self.image.width(), self.image.height())
    }
}

/// Whether the motif has finished loading. Rendering a pending motif is a no-op.
#[derive(Debug, Clone, Default)]
pub enum MotifState {
    #[default]
    Pending,
    Ready(Motif),
}

impl MotifState {
    pub fn ready(&self) -> Option<&Motif> {
        match self {
            MotifState::Pending => None,
            MotifState::Ready(motif) => Some(motif),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiplies_straight_alpha() {
        let img = RasterImage::from_rgba8(1, 1, vec![255, 100, 0, 128]).unwrap();
        let px = img.as_ref().pixel(0, 0).unwrap();
        assert_eq!((px.red(), px.green(), px.blue(), px.alpha()), (128, 50, 0, 128));
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!(matches!(
            RasterImage::from_rgba8(0, 4, Vec::new()),
            Err(RenderError::EmptyImage)
        ));
        assert!(matches!(
            RasterImage::decode(b"not an image"),
            Err(RenderError::Decode(_))
        ));
    }
}
