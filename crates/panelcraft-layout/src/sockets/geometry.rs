use crate::EPSILON_CM;
use panelcraft_core::geom::{CmBox, CmPoint, CmSize, cm_box, cm_point, cm_size};
use panelcraft_core::{ClearanceMode, Plate, SocketDirection, SocketGroup, SocketRules};

/// Length of a group along its own direction: `D·count + G·(count − 1)`.
pub fn group_length_cm(count: u8, rules: &SocketRules) -> f64 {
    let n = f64::from(count);
    rules.diameter_cm * n + rules.gap_cm * (n - 1.0).max(0.0)
}

pub fn group_size(count: u8, direction: SocketDirection, rules: &SocketRules) -> CmSize {
    let along = group_length_cm(count, rules);
    match direction {
        SocketDirection::Horizontal => cm_size(along, rules.diameter_cm),
        SocketDirection::Vertical => cm_size(rules.diameter_cm, along),
    }
}

/// Bounding box of `group` with its lower-left corner at `anchor`.
pub fn group_bounds(group: &SocketGroup, anchor: CmPoint, rules: &SocketRules) -> CmBox {
    cm_box(anchor, group_size(group.count, group.direction, rules))
}

/// Centres of the individual sockets of `group` anchored at `anchor`, first socket first.
pub fn socket_centers_cm(group: &SocketGroup, anchor: CmPoint, rules: &SocketRules) -> Vec<CmPoint> {
    let r = rules.radius_cm();
    let step = rules.step_cm();
    (0..group.count)
        .map(|i| {
            let along = f64::from(i) * step;
            match group.direction {
                SocketDirection::Horizontal => cm_point(anchor.x + along + r, anchor.y + r),
                SocketDirection::Vertical => cm_point(anchor.x + r, anchor.y + along + r),
            }
        })
        .collect()
}

/// How many sockets fit in a run of `dimension_cm` with `clearance` kept free at both ends.
pub fn max_count_along(dimension_cm: f64, clearance: f64, rules: &SocketRules) -> u8 {
    let fit = ((dimension_cm - 2.0 * clearance + rules.gap_cm) / rules.step_cm() + EPSILON_CM).floor();
    if !fit.is_finite() || fit <= 0.0 {
        return 0;
    }
    fit.min(f64::from(rules.max_count)) as u8
}

/// Count ceiling offered for a plate: the roomier of its two axes, with commit clearance.
pub fn max_count(plate: &Plate, rules: &SocketRules) -> u8 {
    let clearance = rules.clearance(ClearanceMode::Commit);
    max_count_along(plate.width_cm, clearance, rules).max(max_count_along(
        plate.height_cm,
        clearance,
        rules,
    ))
}

/// Whether a plate is large enough to carry sockets at all.
pub fn is_eligible(plate: &Plate, rules: &SocketRules) -> bool {
    plate.has_drawable_size()
        && plate.width_cm >= rules.eligible_min_width_cm
        && plate.height_cm >= rules.eligible_min_height_cm
}

/// Region the anchor of a `size` group may occupy on `plate`; `None` if the group cannot fit.
pub fn anchor_range(plate: &Plate, size: CmSize, clearance: f64) -> Option<CmBox> {
    if !plate.has_drawable_size() {
        return None;
    }
    let min = cm_point(clearance, clearance);
    let max = cm_point(
        plate.width_cm - clearance - size.width,
        plate.height_cm - clearance - size.height,
    );
    if max.x < min.x - EPSILON_CM || max.y < min.y - EPSILON_CM {
        return None;
    }
    Some(CmBox::new(min, cm_point(max.x.max(min.x), max.y.max(min.y))))
}

/// Pulls `anchor` back inside the edge clearance on both axes.
pub fn clamp_anchor(
    plate: &Plate,
    size: CmSize,
    anchor: CmPoint,
    clearance: f64,
) -> Option<CmPoint> {
    if !(anchor.x.is_finite() && anchor.y.is_finite()) {
        return None;
    }
    let range = anchor_range(plate, size, clearance)?;
    Some(cm_point(
        anchor.x.clamp(range.min.x, range.max.x),
        anchor.y.clamp(range.min.y, range.max.y),
    ))
}
