use crate::geom::{CmPoint, CmSize, cm_point, cm_size};
use serde::{Deserialize, Serialize};

/// Returns a fresh opaque id for plates and socket groups.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// A rectangular physical panel, in centimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    pub id: String,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Plate {
    pub fn new(id: impl Into<String>, width_cm: f64, height_cm: f64) -> Self {
        Self {
            id: id.into(),
            width_cm,
            height_cm,
        }
    }

    pub fn with_random_id(width_cm: f64, height_cm: f64) -> Self {
        Self::new(new_id(), width_cm, height_cm)
    }

    pub fn size(&self) -> CmSize {
        cm_size(self.width_cm, self.height_cm)
    }

    /// Whether the dimensions can take part in layout at all (finite and strictly positive).
    ///
    /// This is weaker than the product bounds: layout only needs a drawable rectangle.
    pub fn has_drawable_size(&self) -> bool {
        self.width_cm.is_finite()
            && self.height_cm.is_finite()
            && self.width_cm > 0.0
            && self.height_cm > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocketDirection {
    #[default]
    Horizontal,
    Vertical,
}

impl SocketDirection {
    pub fn is_horizontal(self) -> bool {
        matches!(self, SocketDirection::Horizontal)
    }
}

/// A linear run of 1..=5 circular cutouts on a single plate.
///
/// `(x_cm, y_cm)` is the lower-left corner of the first socket's bounding square, measured from
/// the plate's lower-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketGroup {
    pub id: String,
    pub plate_id: String,
    pub x_cm: f64,
    pub y_cm: f64,
    pub count: u8,
    #[serde(default)]
    pub direction: SocketDirection,
}

impl SocketGroup {
    pub fn new(
        id: impl Into<String>,
        plate_id: impl Into<String>,
        x_cm: f64,
        y_cm: f64,
        count: u8,
        direction: SocketDirection,
    ) -> Self {
        Self {
            id: id.into(),
            plate_id: plate_id.into(),
            x_cm,
            y_cm,
            count,
            direction,
        }
    }

    pub fn anchor(&self) -> CmPoint {
        cm_point(self.x_cm, self.y_cm)
    }
}

/// Live state of the single in-flight socket drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraggingInfo {
    pub group_id: String,
    pub x_cm: f64,
    pub y_cm: f64,
    /// Pointer position minus the group's anchor, in surface pixels, captured on pointer-down.
    pub screen_offset_x: f64,
    pub screen_offset_y: f64,
}

impl DraggingInfo {
    pub fn anchor(&self) -> CmPoint {
        cm_point(self.x_cm, self.y_cm)
    }

    /// Resolves the anchor to draw for `group`: the live drag value if this group is the one being
    /// dragged, the committed value otherwise.
    pub fn anchor_for(dragging: Option<&DraggingInfo>, group: &SocketGroup) -> CmPoint {
        match dragging {
            Some(info) if info.group_id == group.id => info.anchor(),
            _ => group.anchor(),
        }
    }
}

/// Smallest accepted physical motif size on either axis. Tile counts grow with the inverse of the
/// motif area.
pub const MIN_MOTIF_SIZE_CM: f64 = 1.0;

/// Declared physical size of the motif image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotifSpec {
    pub width_cm: f64,
    pub height_cm: f64,
}

impl MotifSpec {
    pub fn new(width_cm: f64, height_cm: f64) -> Self {
        Self {
            width_cm,
            height_cm,
        }
    }

    /// Both sides finite and at least [`MIN_MOTIF_SIZE_CM`].
    pub fn is_valid(&self) -> bool {
        let ok = |v: f64| v.is_finite() && v >= MIN_MOTIF_SIZE_CM;
        ok(self.width_cm) && ok(self.height_cm)
    }
}

impl From<&crate::config::MotifDefaults> for MotifSpec {
    fn from(value: &crate::config::MotifDefaults) -> Self {
        Self::new(value.width_cm, value.height_cm)
    }
}
