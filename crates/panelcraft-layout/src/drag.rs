//! Pointer-driven socket dragging.
//!
//! The controller is either idle or dragging exactly one group. While dragging, every pointer move
//! is turned back into a plate-local anchor, clamped with the drag clearance and pushed out of
//! sibling groups before it is written to the board. Releasing the pointer (or losing capture)
//! keeps the last resolved position.

use crate::layout::RowLayout;
use crate::sockets::{SocketBoard, resolve_drag, socket_screen_circles};
use panelcraft_core::geom::{CmPoint, PxPoint};
use panelcraft_core::{DraggingInfo, Plate, SocketGroup, SocketRules};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(PxPoint),
    Move(PxPoint),
    Up,
    /// The surface lost pointer capture (window blur, pointer cancel).
    CaptureLost,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Nothing happened: no hit on pointer-down, or an event that does not apply to the state.
    Ignored,
    Started { group_id: String },
    Moved { group_id: String, anchor: CmPoint },
    /// The pointer moved but no conflict-free position exists there; the group stays put.
    Blocked { group_id: String },
    Released { group_id: String },
    /// The dragged group or its plate disappeared mid-drag.
    Cancelled { group_id: String },
}

impl DragOutcome {
    /// Whether the board changed and the surface needs a redraw.
    pub fn is_mutation(&self) -> bool {
        matches!(self, DragOutcome::Moved { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
enum DragState {
    #[default]
    Idle,
    Dragging(DraggingInfo),
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The in-flight drag, if any.
    pub fn dragging(&self) -> Option<&DraggingInfo> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(info) => Some(info),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging().is_some()
    }

    /// Drops the in-flight drag without touching the board.
    pub fn cancel(&mut self) -> Option<DraggingInfo> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging(info) => Some(info),
        }
    }

    /// Feeds one pointer event through the state machine. `layout` is the layout the surface was
    /// last drawn with; without one, pointer-down is ignored and moves are blocked.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        layout: Option<&RowLayout>,
        plates: &[Plate],
        board: &mut SocketBoard,
        rules: &SocketRules,
    ) -> DragOutcome {
        match event {
            PointerEvent::Down(point) => self.pointer_down(point, layout, board, rules),
            PointerEvent::Move(point) => self.pointer_move(point, layout, plates, board, rules),
            PointerEvent::Up | PointerEvent::CaptureLost => match self.cancel() {
                Some(info) => {
                    tracing::debug!(
                        group_id = %info.group_id,
                        x_cm = info.x_cm,
                        y_cm = info.y_cm,
                        "drag released"
                    );
                    DragOutcome::Released {
                        group_id: info.group_id,
                    }
                }
                None => DragOutcome::Ignored,
            },
        }
    }

    fn pointer_down(
        &mut self,
        point: PxPoint,
        layout: Option<&RowLayout>,
        board: &SocketBoard,
        rules: &SocketRules,
    ) -> DragOutcome {
        if self.is_dragging() {
            return DragOutcome::Ignored;
        }
        let Some(layout) = layout else {
            return DragOutcome::Ignored;
        };
        let Some(group) = hit_test(layout, board.visible_groups(), point, None, rules) else {
            return DragOutcome::Ignored;
        };
        let Some(anchor_px) = layout.cm_to_screen(&group.plate_id, group.anchor()) else {
            return DragOutcome::Ignored;
        };

        let info = DraggingInfo {
            group_id: group.id.clone(),
            x_cm: group.x_cm,
            y_cm: group.y_cm,
            screen_offset_x: point.x - anchor_px.x,
            screen_offset_y: point.y - anchor_px.y,
        };
        tracing::debug!(group_id = %info.group_id, "drag started");
        let group_id = info.group_id.clone();
        self.state = DragState::Dragging(info);
        DragOutcome::Started { group_id }
    }

    fn pointer_move(
        &mut self,
        point: PxPoint,
        layout: Option<&RowLayout>,
        plates: &[Plate],
        board: &mut SocketBoard,
        rules: &SocketRules,
    ) -> DragOutcome {
        let DragState::Dragging(info) = &mut self.state else {
            return DragOutcome::Ignored;
        };
        let group_id = info.group_id.clone();

        let group = board.get(&group_id).cloned();
        let plate = group
            .as_ref()
            .and_then(|g| plates.iter().find(|p| p.id == g.plate_id));
        let (Some(group), Some(plate)) = (group, plate) else {
            tracing::warn!(group_id = %group_id, "dragged socket group vanished");
            self.state = DragState::Idle;
            return DragOutcome::Cancelled { group_id };
        };

        let Some(meta) = layout.and_then(|l| l.plate(&plate.id)) else {
            return DragOutcome::Blocked { group_id };
        };
        let anchor_px = PxPoint::new(
            point.x - info.screen_offset_x,
            point.y - info.screen_offset_y,
        );
        let candidate = meta.screen_to_cm(anchor_px);

        match resolve_drag(plate, &group, candidate, board.groups(), rules) {
            Some(anchor) => {
                board.set_anchor(&group_id, anchor);
                info.x_cm = anchor.x;
                info.y_cm = anchor.y;
                DragOutcome::Moved { group_id, anchor }
            }
            None => DragOutcome::Blocked { group_id },
        }
    }
}

/// Topmost group with a socket under `point`. Groups later in the list are drawn later and win.
pub fn hit_test<'a>(
    layout: &RowLayout,
    groups: &'a [SocketGroup],
    point: PxPoint,
    dragging: Option<&DraggingInfo>,
    rules: &SocketRules,
) -> Option<&'a SocketGroup> {
    groups.iter().rev().find(|group| {
        socket_screen_circles(layout, group, dragging, rules)
            .iter()
            .any(|c| c.contains(point))
    })
}
