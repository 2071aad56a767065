//! Composes layout, tiling and socket geometry onto a pixmap.

use crate::color::style_color;
use crate::error::{RenderError, Result};
use crate::raster::{Motif, MotifState, RasterImage};
use panelcraft_core::{DraggingInfo, RenderStyle, SocketRules};
use panelcraft_layout::tiling::PlateTiles;
use panelcraft_layout::{
    PlateLayoutMeta, RowLayout, SocketBoard, SocketCircle, TileDraw, socket_screen_circles,
    tile_row,
};
use tiny_skia::{
    Color, FillRule, FilterQuality, Paint, PathBuilder, Pattern, Pixmap, Rect, SpreadMode,
    Stroke, Transform,
};

/// Everything one frame is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// `None` when the row has nothing drawable; rendering is then skipped.
    pub layout: Option<&'a RowLayout>,
    pub board: &'a SocketBoard,
    pub dragging: Option<&'a DraggingInfo>,
    pub rules: &'a SocketRules,
    pub motif: &'a MotifState,
    /// Drawn in place of each socket when present; otherwise sockets are filled circles.
    pub socket_icon: Option<&'a RasterImage>,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub style: RenderStyle,
    pub jpeg_quality: u8,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: RenderStyle::default(),
            jpeg_quality: 90,
        }
    }
}

/// Parsed form of [`RenderStyle`].
struct Palette {
    background: Color,
    plate_fill: Color,
    plate_stroke: Color,
    socket_fill: Color,
    socket_stroke: Color,
    socket_stroke_width: f32,
    anchor: Color,
    anchor_radius: f32,
}

impl Palette {
    fn new(style: &RenderStyle) -> Result<Self> {
        Ok(Self {
            background: style_color("background", &style.background)?,
            plate_fill: style_color("plate_fill", &style.plate_fill)?,
            plate_stroke: style_color("plate_stroke", &style.plate_stroke)?,
            socket_fill: style_color("socket_fill", &style.socket_fill)?,
            socket_stroke: style_color("socket_stroke", &style.socket_stroke)?,
            socket_stroke_width: style.socket_stroke_width_px,
            anchor: style_color("drag_anchor_color", &style.drag_anchor_color)?,
            anchor_radius: style.drag_anchor_radius_px,
        })
    }
}

/// Draws `scene` onto a fresh pixmap the size of the layout surface.
///
/// Returns `Ok(None)` when there is nothing to draw yet: no layout, or the motif is still pending.
pub fn render_pixmap(scene: &Scene<'_>, options: &RenderOptions) -> Result<Option<Pixmap>> {
    let Some(layout) = scene.layout else {
        return Ok(None);
    };
    let Some(motif) = scene.motif.ready() else {
        tracing::debug!("motif not ready, skipping render");
        return Ok(None);
    };
    let palette = Palette::new(&options.style)?;

    let width = layout.surface.width_px.ceil().max(1.0) as u32;
    let height = layout.surface.height_px.ceil().max(1.0) as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAlloc)?;
    pixmap.fill(palette.background);

    let tiles = tile_row(layout, &motif.geometry());
    for (meta, plate_tiles) in layout.plates.iter().zip(&tiles) {
        draw_plate(&mut pixmap, meta, plate_tiles, motif, &palette);
    }

    for group in scene.board.visible_groups() {
        let circles = socket_screen_circles(layout, group, scene.dragging, scene.rules);
        for circle in &circles {
            draw_socket(&mut pixmap, circle, scene.socket_icon, &palette);
        }
        if let (Some(info), Some(first)) = (scene.dragging, circles.first()) {
            if info.group_id == group.id {
                fill_circle(
                    &mut pixmap,
                    first.cx as f32,
                    first.cy as f32,
                    palette.anchor_radius,
                    palette.anchor,
                );
            }
        }
    }

    Ok(Some(pixmap))
}

fn draw_plate(
    pixmap: &mut Pixmap,
    meta: &PlateLayoutMeta,
    tiles: &PlateTiles,
    motif: &Motif,
    palette: &Palette,
) {
    let Some(rect) = plate_rect(meta) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(palette.plate_fill);
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);

    for draw in &tiles.draws {
        draw_tile(pixmap, draw, &motif.image);
    }

    let mut stroke_paint = Paint::default();
    stroke_paint.set_color(palette.plate_stroke);
    let outline = PathBuilder::from_rect(rect);
    pixmap.stroke_path(
        &outline,
        &stroke_paint,
        &Stroke::default(),
        Transform::identity(),
        None,
    );
}

fn plate_rect(meta: &PlateLayoutMeta) -> Option<Rect> {
    Rect::from_xywh(
        meta.pixel_x as f32,
        meta.pixel_y as f32,
        meta.pixel_width as f32,
        meta.pixel_height as f32,
    )
}

/// Maps the motif's `src` rectangle onto `dst`, mirrored about the centre of `dst` on the flagged
/// axes.
fn tile_transform(draw: &TileDraw) -> Option<Transform> {
    let (src, dst) = (draw.src, draw.dst);
    if src.size.width <= 0.0 || src.size.height <= 0.0 {
        return None;
    }
    let kx = dst.size.width / src.size.width;
    let ky = dst.size.height / src.size.height;
    let (sx, tx) = if draw.flip_x {
        (-kx, dst.max_x() + src.origin.x * kx)
    } else {
        (kx, dst.origin.x - src.origin.x * kx)
    };
    let (sy, ty) = if draw.flip_y {
        (-ky, dst.max_y() + src.origin.y * ky)
    } else {
        (ky, dst.origin.y - src.origin.y * ky)
    };
    if ![sx, sy, tx, ty].iter().all(|v| v.is_finite()) || kx <= 0.0 || ky <= 0.0 {
        return None;
    }
    Some(Transform::from_row(sx as f32, 0.0, 0.0, sy as f32, tx as f32, ty as f32))
}

fn draw_tile(pixmap: &mut Pixmap, draw: &TileDraw, image: &RasterImage) {
    let Some(rect) = Rect::from_xywh(
        draw.dst.origin.x as f32,
        draw.dst.origin.y as f32,
        draw.dst.size.width as f32,
        draw.dst.size.height as f32,
    ) else {
        return;
    };
    let Some(transform) = tile_transform(draw) else {
        return;
    };
    let mut paint = Paint::default();
    paint.anti_alias = false;
    paint.shader = Pattern::new(
        image.as_ref(),
        SpreadMode::Pad,
        FilterQuality::Bilinear,
        1.0,
        transform,
    );
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}

fn draw_socket(
    pixmap: &mut Pixmap,
    circle: &SocketCircle,
    icon: Option<&RasterImage>,
    palette: &Palette,
) {
    let (cx, cy, r) = (circle.cx as f32, circle.cy as f32, circle.radius as f32);

    match icon {
        Some(icon) => draw_icon(pixmap, icon, cx - r, cy - r, 2.0 * r),
        None => {
            let Some(path) = PathBuilder::from_circle(cx, cy, r) else {
                return;
            };
            let mut paint = Paint::default();
            paint.set_color(palette.socket_fill);
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            if palette.socket_stroke_width > 0.0 {
                let mut stroke_paint = Paint::default();
                stroke_paint.set_color(palette.socket_stroke);
                let stroke = Stroke {
                    width: palette.socket_stroke_width,
                    ..Stroke::default()
                };
                pixmap.stroke_path(&path, &stroke_paint, &stroke, Transform::identity(), None);
            }
        }
    }
}

/// Draws `icon` `width` pixels wide from its top-left corner `(x, y)`, keeping its aspect ratio.
fn draw_icon(pixmap: &mut Pixmap, icon: &RasterImage, x: f32, y: f32, width: f32) {
    let k = width / icon.width() as f32;
    let height = icon.height() as f32 * k;
    let Some(rect) = Rect::from_xywh(x, y, width, height) else {
        return;
    };
    let mut paint = Paint::default();
    paint.shader = Pattern::new(
        icon.as_ref(),
        SpreadMode::Pad,
        FilterQuality::Bilinear,
        1.0,
        Transform::from_row(k, 0.0, 0.0, k, x, y),
    );
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}

fn fill_circle(pixmap: &mut Pixmap, cx: f32, cy: f32, r: f32, color: Color) {
    if r <= 0.0 {
        return;
    }
    let Some(path) = PathBuilder::from_circle(cx, cy, r) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(color);
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
}
