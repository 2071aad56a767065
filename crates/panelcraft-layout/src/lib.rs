#![forbid(unsafe_code)]

//! Headless geometry engine for a row of wall plates.
//!
//! - [`layout`]: one shared cm→px scale, plates bottom-aligned left to right
//! - [`transform`]: exact cm ↔ px mapping per plate (y flips between the two spaces)
//! - [`tiling`]: checkerboard-mirrored motif sampling across the whole row
//! - [`sockets`]: socket group geometry, edge clearance, spacing, capacity and editing rules
//! - [`drag`]: pointer-driven socket dragging as an explicit state machine
//!
//! Everything here is pure and synchronous; the only state that outlives a call is owned by the
//! caller (`SocketBoard`, `DragController`).

pub mod drag;
pub mod error;
pub mod layout;
pub mod sockets;
pub mod tiling;
pub mod transform;

pub use drag::{DragController, DragOutcome, PointerEvent, hit_test};
pub use error::{PlacementViolation, SocketError};
pub use layout::{PlateLayoutMeta, RowLayout, SurfaceBox, compute_layout};
pub use sockets::{
    SocketBoard, SocketCircle, group_bounds, group_size, is_eligible, max_count, resolve_drag,
    socket_screen_circles, validate_placement,
};
pub use tiling::{
    MIN_TILE_PX, MotifGeometry, TileDraw, TileSpan, split_into_tiles, tile_plate, tile_row,
};

/// Comparison slack for centimeter arithmetic (far below anything a user can place).
pub(crate) const EPSILON_CM: f64 = 1e-9;
