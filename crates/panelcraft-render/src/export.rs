use crate::color::style_color;
use crate::error::{RenderError, Result};
use crate::scene::{RenderOptions, Scene, render_pixmap};
use tiny_skia::Pixmap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Jpeg => "jpg",
        }
    }
}

pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    pixmap.encode_png().map_err(|_| RenderError::PngEncode)
}

/// Encodes an opaque pixmap as JPEG. The alpha channel is dropped, so the caller must have filled
/// an opaque background.
pub fn encode_jpeg(pixmap: &Pixmap, quality: u8) -> Result<Vec<u8>> {
    let (w, h) = (pixmap.width(), pixmap.height());
    let mut rgb = vec![0u8; (w as usize) * (h as usize) * 3];
    for (src, dst) in pixmap.data().chunks_exact(4).zip(rgb.chunks_exact_mut(3)) {
        dst.copy_from_slice(&src[..3]);
    }

    let mut out = Vec::new();
    let mut enc = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RenderError::JpegEncode)?;
    Ok(out)
}

/// Renders and encodes `scene`. `Ok(None)` means there was nothing to draw.
pub fn render_to(
    scene: &Scene<'_>,
    options: &RenderOptions,
    format: RasterFormat,
) -> Result<Option<Vec<u8>>> {
    if format == RasterFormat::Jpeg {
        let bg = style_color("background", &options.style.background)?;
        if !bg.is_opaque() {
            return Err(RenderError::JpegOpaqueBackgroundRequired);
        }
    }
    let Some(pixmap) = render_pixmap(scene, options)? else {
        return Ok(None);
    };
    let bytes = match format {
        RasterFormat::Png => encode_png(&pixmap)?,
        RasterFormat::Jpeg => encode_jpeg(&pixmap, options.jpeg_quality)?,
    };
    tracing::debug!(
        format = format.extension(),
        width = pixmap.width(),
        height = pixmap.height(),
        bytes = bytes.len(),
        "raster encoded"
    );
    Ok(Some(bytes))
}
