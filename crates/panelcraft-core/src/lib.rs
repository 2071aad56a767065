#![forbid(unsafe_code)]

//! Plate/socket model and editing rules for the panelcraft engine (headless).
//!
//! Design goals:
//! - centimeters are the only physical unit; pixels only appear after layout
//! - deterministic, testable outputs (no hidden global state)
//! - every rejected edit leaves prior state untouched

pub mod config;
pub mod error;
pub mod geom;
pub mod model;
pub mod plates;

pub use config::{
    ClearanceMode, EngineConfig, MotifDefaults, PlateRules, RenderStyle, SocketRules,
};
pub use error::{Dimension, Error, Result};
pub use model::{
    DraggingInfo, MIN_MOTIF_SIZE_CM, MotifSpec, Plate, SocketDirection, SocketGroup, new_id,
};
pub use plates::PlateList;
