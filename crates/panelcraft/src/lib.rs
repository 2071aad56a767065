#![forbid(unsafe_code)]

//! `panelcraft` is a headless configurator core for a row of wall plates.
//!
//! It sizes plates, lays them out under one shared scale, tiles a motif image across the whole row
//! with alternating mirroring, and keeps socket groups inside their plate and apart from each
//! other, including while they are dragged.
//!
//! # Features
//!
//! - `render`: raster output via `tiny-skia` (`panelcraft::render`, [`Configurator::render`])

pub use panelcraft_core::*;
pub use panelcraft_layout as geometry;
pub use panelcraft_layout::{
    DragOutcome, PointerEvent, RowLayout, SocketBoard, SocketCircle, SocketError, SurfaceBox,
};

mod session;

pub use session::{Configurator, ConfiguratorError, PlateRemoval};

#[cfg(feature = "render")]
pub mod render {
    pub use panelcraft_render::*;
}
