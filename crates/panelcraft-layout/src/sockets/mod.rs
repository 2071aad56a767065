//! Socket groups: geometry, placement rules and editing.

mod board;
mod collision;
mod geometry;
mod screen;

pub use board::SocketBoard;
pub use collision::{
    boxes_conflict, expand_for_spacing, first_conflict, resolve_drag, validate_placement,
};
pub use geometry::{
    anchor_range, clamp_anchor, group_bounds, group_length_cm, group_size, is_eligible, max_count,
    max_count_along, socket_centers_cm,
};
pub use screen::{SocketCircle, socket_screen_circles};
