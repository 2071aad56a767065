use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Width => f.write_str("width"),
            Dimension::Height => f.write_str("height"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a row holds at most {max} plates")]
    PlateLimit { max: usize },

    #[error("at least one plate is required")]
    LastPlate,

    #[error("unknown plate: {plate_id}")]
    UnknownPlate { plate_id: String },

    #[error("duplicate plate id: {plate_id}")]
    DuplicatePlate { plate_id: String },

    #[error("plate {dimension} must be between {min} and {max} cm (got {value})")]
    DimensionOutOfRange {
        dimension: Dimension,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("plate index {index} is out of range for {len} plates")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid engine config: {message}")]
    InvalidConfig { message: String },

    #[error("engine config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
