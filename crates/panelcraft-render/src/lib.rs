#![forbid(unsafe_code)]

//! Raster output for panelcraft rows.
//!
//! Plates are filled with the mirrored motif tiles computed by `panelcraft-layout`, sockets are
//! drawn on top (icon or plain circle), and the group being dragged gets a red anchor marker.
//! Output is deterministic for unchanged input.

mod color;
pub mod error;
mod export;
mod raster;
mod scene;

pub use color::parse_color;
pub use error::{RenderError, Result};
pub use export::{RasterFormat, encode_jpeg, encode_png, render_to};
pub use raster::{Motif, MotifState, RasterImage};
pub use scene::{RenderOptions, Scene, render_pixmap};

pub use tiny_skia::Pixmap;
