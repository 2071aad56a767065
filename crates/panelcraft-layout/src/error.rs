/// Why a socket position was refused on commit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementViolation {
    #[error("socket position must be a finite number")]
    NonFinite,

    #[error("distance from the left edge must be at least {min} cm")]
    LeftEdge { min: f64 },

    #[error("sockets are too close to the right edge (need {min} cm clearance)")]
    RightEdge { min: f64 },

    #[error("distance from the bottom edge must be at least {min} cm")]
    BottomEdge { min: f64 },

    #[error("sockets are too close to the top edge (need {min} cm clearance)")]
    TopEdge { min: f64 },

    #[error("distance to socket group {other_id} must be at least {min} cm")]
    Spacing { other_id: String, min: f64 },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SocketError {
    #[error("no eligible plate (at least {min_width_cm}×{min_height_cm} cm) available")]
    NoEligiblePlate {
        min_width_cm: f64,
        min_height_cm: f64,
    },

    #[error("no free position left for another socket group")]
    NoFreeSpace,

    #[error("at least one socket group is required while sockets are enabled")]
    LastGroupRequired,

    #[error("plate {plate_id} is too small for sockets")]
    IneligiblePlate { plate_id: String },

    #[error("{count} sockets do not fit on this plate (at most {max})")]
    Capacity { count: u8, max: u8 },

    #[error("unknown socket group: {group_id}")]
    UnknownGroup { group_id: String },

    #[error("unknown plate: {plate_id}")]
    UnknownPlate { plate_id: String },

    #[error("duplicate socket group id: {group_id}")]
    DuplicateGroup { group_id: String },

    #[error(transparent)]
    Placement(#[from] PlacementViolation),
}

pub type Result<T> = std::result::Result<T, SocketError>;
