use super::geometry::socket_centers_cm;
use crate::layout::RowLayout;
use panelcraft_core::geom::{PxPoint, px_point};
use panelcraft_core::{DraggingInfo, SocketGroup, SocketRules};
use serde::Serialize;

/// One socket as drawn on the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocketCircle {
    pub group_id: String,
    /// Position inside the group, 0 for the anchor socket.
    pub index: u8,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl SocketCircle {
    pub fn center(&self) -> PxPoint {
        px_point(self.cx, self.cy)
    }

    pub fn contains(&self, p: PxPoint) -> bool {
        (p - self.center()).length() <= self.radius
    }
}

/// Screen circles of `group`, using the live drag position when `dragging` refers to it.
///
/// Groups whose plate is not part of `layout` have no circles.
pub fn socket_screen_circles(
    layout: &RowLayout,
    group: &SocketGroup,
    dragging: Option<&DraggingInfo>,
    rules: &SocketRules,
) -> Vec<SocketCircle> {
    let Some(meta) = layout.plate(&group.plate_id) else {
        tracing::debug!(group_id = %group.id, plate_id = %group.plate_id, "socket group not laid out");
        return Vec::new();
    };
    let anchor = DraggingInfo::anchor_for(dragging, group);
    let radius = meta.cm_to_px_len(rules.radius_cm());
    socket_centers_cm(group, anchor, rules)
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let p = meta.cm_to_screen(c);
            SocketCircle {
                group_id: group.id.clone(),
                index: i as u8,
                cx: p.x,
                cy: p.y,
                radius,
            }
        })
        .collect()
}
