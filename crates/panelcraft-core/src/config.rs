use crate::error::{Error, Result};
use crate::model::{MIN_MOTIF_SIZE_CM, MotifSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which edge clearance applies to a socket placement.
///
/// Typed edits are validated with the stricter commit clearance; continuous dragging clamps with
/// the looser drag clearance. Both are product policy values, not geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearanceMode {
    #[default]
    Commit,
    Drag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateRules {
    pub min_width_cm: f64,
    pub max_width_cm: f64,
    pub min_height_cm: f64,
    pub max_height_cm: f64,
    pub max_plates: usize,
    /// Gap between neighbouring plates in the assembled row.
    pub spacing_cm: f64,
    pub default_width_cm: f64,
    pub default_height_cm: f64,
}

impl Default for PlateRules {
    fn default() -> Self {
        Self {
            min_width_cm: 20.0,
            max_width_cm: 300.0,
            min_height_cm: 30.0,
            max_height_cm: 128.0,
            max_plates: 10,
            spacing_cm: 1.0,
            default_width_cm: 30.0,
            default_height_cm: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketRules {
    pub diameter_cm: f64,
    pub gap_cm: f64,
    /// Minimum distance between the bounding boxes of two groups on one plate.
    pub group_spacing_cm: f64,
    pub commit_edge_clearance_cm: f64,
    pub drag_edge_clearance_cm: f64,
    pub max_count: u8,
    pub eligible_min_width_cm: f64,
    pub eligible_min_height_cm: f64,
}

impl Default for SocketRules {
    fn default() -> Self {
        Self {
            diameter_cm: 7.0,
            gap_cm: 0.2,
            group_spacing_cm: 4.0,
            commit_edge_clearance_cm: 3.5,
            drag_edge_clearance_cm: 0.3,
            max_count: 5,
            eligible_min_width_cm: 30.0,
            eligible_min_height_cm: 30.0,
        }
    }
}

impl SocketRules {
    /// Distance between the anchors of two neighbouring sockets in a group.
    pub fn step_cm(&self) -> f64 {
        self.diameter_cm + self.gap_cm
    }

    pub fn radius_cm(&self) -> f64 {
        self.diameter_cm / 2.0
    }

    pub fn clearance(&self, mode: ClearanceMode) -> f64 {
        match mode {
            ClearanceMode::Commit => self.commit_edge_clearance_cm,
            ClearanceMode::Drag => self.drag_edge_clearance_cm,
        }
    }
}

/// Physical size of the motif image when none is declared by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotifDefaults {
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Default for MotifDefaults {
    fn default() -> Self {
        Self {
            width_cm: 300.0,
            height_cm: 128.0,
        }
    }
}

/// Colors and marker sizes used by the raster renderer. Colors are CSS-style strings
/// (`#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()` or a few named colors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub background: String,
    /// Plate fill while no motif is available.
    pub plate_fill: String,
    pub plate_stroke: String,
    pub socket_fill: String,
    pub socket_stroke: String,
    pub socket_stroke_width_px: f32,
    pub drag_anchor_color: String,
    pub drag_anchor_radius_px: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            plate_fill: "#f9fafb".to_string(),
            plate_stroke: "#e5e7eb".to_string(),
            socket_fill: "rgba(200,200,200,0.9)".to_string(),
            socket_stroke: "#222222".to_string(),
            socket_stroke_width_px: 1.0,
            drag_anchor_color: "#ff0000".to_string(),
            drag_anchor_radius_px: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub plates: PlateRules,
    pub sockets: SocketRules,
    pub motif: MotifDefaults,
    pub render: RenderStyle,
}

impl EngineConfig {
    /// Parses a (possibly partial) JSON config; missing keys keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let cfg: Self = serde_json::from_value(value)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, v: f64) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig {
                    message: format!("{name} must be a positive number (got {v})"),
                })
            }
        }
        fn non_negative(name: &str, v: f64) -> Result<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig {
                    message: format!("{name} must be zero or positive (got {v})"),
                })
            }
        }

        let p = &self.plates;
        positive("plates.min_width_cm", p.min_width_cm)?;
        positive("plates.min_height_cm", p.min_height_cm)?;
        non_negative("plates.spacing_cm", p.spacing_cm)?;
        if p.max_width_cm < p.min_width_cm || p.max_height_cm < p.min_height_cm {
            return Err(Error::InvalidConfig {
                message: "plate maximum dimensions must not be below the minimums".to_string(),
            });
        }
        if p.max_plates == 0 {
            return Err(Error::InvalidConfig {
                message: "plates.max_plates must be at least 1".to_string(),
            });
        }

        let s = &self.sockets;
        positive("sockets.diameter_cm", s.diameter_cm)?;
        non_negative("sockets.gap_cm", s.gap_cm)?;
        non_negative("sockets.group_spacing_cm", s.group_spacing_cm)?;
        non_negative("sockets.commit_edge_clearance_cm", s.commit_edge_clearance_cm)?;
        non_negative("sockets.drag_edge_clearance_cm", s.drag_edge_clearance_cm)?;
        if s.max_count == 0 {
            return Err(Error::InvalidConfig {
                message: "sockets.max_count must be at least 1".to_string(),
            });
        }

        if !MotifSpec::from(&self.motif).is_valid() {
            return Err(Error::InvalidConfig {
                message: format!(
                    "motif size must be at least {MIN_MOTIF_SIZE_CM} cm on both sides (got {}×{})",
                    self.motif.width_cm, self.motif.height_cm
                ),
            });
        }

        let r = &self.render;
        if !(r.socket_stroke_width_px.is_finite() && r.socket_stroke_width_px >= 0.0) {
            return Err(Error::InvalidConfig {
                message: "render.socket_stroke_width_px must be zero or positive".to_string(),
            });
        }
        if !(r.drag_anchor_radius_px.is_finite() && r.drag_anchor_radius_px >= 0.0) {
            return Err(Error::InvalidConfig {
                message: "render.drag_anchor_radius_px must be zero or positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EngineConfig::from_json_str(r#"{"sockets":{"drag_edge_clearance_cm":3.5}}"#)
            .unwrap();
        assert_eq!(cfg.sockets.drag_edge_clearance_cm, 3.5);
        assert_eq!(cfg.sockets.diameter_cm, 7.0);
        assert_eq!(cfg.plates, PlateRules::default());
    }

    #[test]
    fn rejects_non_positive_diameter() {
        let err = EngineConfig::from_json_str(r#"{"sockets":{"diameter_cm":0}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_motif_below_minimum_size() {
        let err = EngineConfig::from_json_str(r#"{"motif":{"width_cm":0.05,"height_cm":0.05}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("motif size must be at least 1 cm"));
        assert!(EngineConfig::from_json_str(r#"{"motif":{"width_cm":1,"height_cm":1}}"#).is_ok());
    }

    #[test]
    fn clearance_by_mode() {
        let rules = SocketRules::default();
        assert_eq!(rules.clearance(ClearanceMode::Commit), 3.5);
        assert_eq!(rules.clearance(ClearanceMode::Drag), 0.3);
        assert!((rules.step_cm() - 7.2).abs() < 1e-12);
    }
}
