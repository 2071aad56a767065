use super::geometry::{clamp_anchor, group_bounds, group_size, max_count_along};
use crate::EPSILON_CM;
use crate::error::{PlacementViolation, SocketError};
use panelcraft_core::geom::{CmBox, CmPoint, cm_point};
use panelcraft_core::{ClearanceMode, Plate, SocketGroup, SocketRules};

/// Grows `bounds` by half the group spacing on every side.
pub fn expand_for_spacing(bounds: &CmBox, spacing_cm: f64) -> CmBox {
    let half = spacing_cm / 2.0;
    CmBox::new(
        cm_point(bounds.min.x - half, bounds.min.y - half),
        cm_point(bounds.max.x + half, bounds.max.y + half),
    )
}

/// Two groups conflict when their spacing-expanded boxes overlap on both axes.
///
/// Touching boxes (gap exactly equal to the spacing) do not conflict.
pub fn boxes_conflict(a: &CmBox, b: &CmBox, spacing_cm: f64) -> bool {
    let a = expand_for_spacing(a, spacing_cm);
    let b = expand_for_spacing(b, spacing_cm);
    a.min.x < b.max.x - EPSILON_CM
        && a.max.x > b.min.x + EPSILON_CM
        && a.min.y < b.max.y - EPSILON_CM
        && a.max.y > b.min.y + EPSILON_CM
}

/// Other groups on the same plate, in list order.
fn siblings<'a>(
    group: &SocketGroup,
    groups: &'a [SocketGroup],
) -> impl Iterator<Item = &'a SocketGroup> {
    groups
        .iter()
        .filter(move |other| other.id != group.id && other.plate_id == group.plate_id)
}

/// First sibling (in list order) that `group` would conflict with when anchored at `anchor`.
pub fn first_conflict<'a>(
    group: &SocketGroup,
    anchor: CmPoint,
    groups: &'a [SocketGroup],
    rules: &SocketRules,
) -> Option<&'a SocketGroup> {
    let mine = group_bounds(group, anchor, rules);
    siblings(group, groups).find(|other| {
        let theirs = group_bounds(other, other.anchor(), rules);
        boxes_conflict(&mine, &theirs, rules.group_spacing_cm)
    })
}

/// Checks a typed (non-interactive) edit. Nothing is adjusted: the first violated rule is
/// reported and the caller keeps its previous value.
pub fn validate_placement(
    plate: &Plate,
    group: &SocketGroup,
    groups: &[SocketGroup],
    rules: &SocketRules,
    mode: ClearanceMode,
) -> Result<(), SocketError> {
    let clearance = rules.clearance(mode);
    let along_cm = if group.direction.is_horizontal() {
        plate.width_cm
    } else {
        plate.height_cm
    };
    let max = max_count_along(along_cm, clearance, rules);
    if group.count == 0 || group.count > max {
        return Err(SocketError::Capacity {
            count: group.count,
            max,
        });
    }

    if !(group.x_cm.is_finite() && group.y_cm.is_finite()) {
        return Err(PlacementViolation::NonFinite.into());
    }

    let bounds = group_bounds(group, group.anchor(), rules);
    if bounds.min.x < clearance - EPSILON_CM {
        return Err(PlacementViolation::LeftEdge { min: clearance }.into());
    }
    if bounds.max.x > plate.width_cm - clearance + EPSILON_CM {
        return Err(PlacementViolation::RightEdge { min: clearance }.into());
    }
    if bounds.min.y < clearance - EPSILON_CM {
        return Err(PlacementViolation::BottomEdge { min: clearance }.into());
    }
    if bounds.max.y > plate.height_cm - clearance + EPSILON_CM {
        return Err(PlacementViolation::TopEdge { min: clearance }.into());
    }

    if let Some(other) = first_conflict(group, group.anchor(), groups, rules) {
        return Err(PlacementViolation::Spacing {
            other_id: other.id.clone(),
            min: rules.group_spacing_cm,
        }
        .into());
    }
    Ok(())
}

/// Resolves a dragged candidate position.
///
/// The candidate is clamped to the drag clearance, then pushed out of every sibling it collides
/// with: directly away from the offender along the axis that needs the smaller displacement (x on
/// ties), falling back to the other axis and then to the opposite sides when the edge clamp undoes
/// the push. Returns `None` when no conflict-free position was found; the caller keeps the last
/// resolved position.
pub fn resolve_drag(
    plate: &Plate,
    group: &SocketGroup,
    candidate: CmPoint,
    groups: &[SocketGroup],
    rules: &SocketRules,
) -> Option<CmPoint> {
    let clearance = rules.clearance(ClearanceMode::Drag);
    let size = group_size(group.count, group.direction, rules);
    let mut pos = clamp_anchor(plate, size, candidate, clearance)?;

    let passes = siblings(group, groups).count() + 1;
    for _ in 0..passes {
        let Some(other) = first_conflict(group, pos, groups, rules) else {
            return Some(pos);
        };
        pos = push_away(plate, group, pos, other, rules, clearance)?;
    }

    match first_conflict(group, pos, groups, rules) {
        None => Some(pos),
        Some(other) => {
            tracing::debug!(
                group_id = %group.id,
                blocking = %other.id,
                "drag position rejected: no conflict-free spot"
            );
            None
        }
    }
}

fn push_away(
    plate: &Plate,
    group: &SocketGroup,
    pos: CmPoint,
    other: &SocketGroup,
    rules: &SocketRules,
    clearance: f64,
) -> Option<CmPoint> {
    let size = group_size(group.count, group.direction, rules);
    let mine = group_bounds(group, pos, rules);
    let theirs = group_bounds(other, other.anchor(), rules);
    let spacing = rules.group_spacing_cm;

    let before_x = theirs.min.x - spacing - size.width;
    let after_x = theirs.max.x + spacing;
    let before_y = theirs.min.y - spacing - size.height;
    let after_y = theirs.max.y + spacing;

    let away_x_first = mine.center().x < theirs.center().x;
    let away_y_first = mine.center().y < theirs.center().y;
    let (away_x, toward_x) = if away_x_first {
        (before_x, after_x)
    } else {
        (after_x, before_x)
    };
    let (away_y, toward_y) = if away_y_first {
        (before_y, after_y)
    } else {
        (after_y, before_y)
    };

    let mut primary = [
        (cm_point(away_x, pos.y), (away_x - pos.x).abs()),
        (cm_point(pos.x, away_y), (away_y - pos.y).abs()),
    ];
    let mut fallback = [
        (cm_point(toward_x, pos.y), (toward_x - pos.x).abs()),
        (cm_point(pos.x, toward_y), (toward_y - pos.y).abs()),
    ];
    // Stable sort keeps x ahead of y on equal displacement.
    primary.sort_by(|a, b| a.1.total_cmp(&b.1));
    fallback.sort_by(|a, b| a.1.total_cmp(&b.1));

    primary
        .iter()
        .chain(fallback.iter())
        .filter_map(|(candidate, _)| clamp_anchor(plate, size, *candidate, clearance))
        .find(|p| {
            let moved = group_bounds(group, *p, rules);
            !boxes_conflict(&moved, &theirs, spacing)
        })
}
