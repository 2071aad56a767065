//! Editing rules for the ordered plate row.

use crate::config::PlateRules;
use crate::error::{Dimension, Error, Result};
use crate::model::Plate;
use serde::{Deserialize, Serialize};

/// Checks one plate dimension against the product bounds.
pub fn check_dimension(dimension: Dimension, value: f64, rules: &PlateRules) -> Result<()> {
    let (min, max) = match dimension {
        Dimension::Width => (rules.min_width_cm, rules.max_width_cm),
        Dimension::Height => (rules.min_height_cm, rules.max_height_cm),
    };
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(Error::DimensionOutOfRange {
            dimension,
            value,
            min,
            max,
        })
    }
}

/// The ordered row of plates, left to right.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlateList {
    plates: Vec<Plate>,
}

impl PlateList {
    /// Wraps an externally supplied list as-is (no bounds checks; layout degrades on bad values).
    pub fn new(plates: Vec<Plate>) -> Self {
        Self { plates }
    }

    /// The row a fresh configurator starts with.
    pub fn default_row() -> Self {
        Self::new(vec![
            Plate::with_random_id(250.0, 128.0),
            Plate::with_random_id(30.0, 30.0),
        ])
    }

    pub fn as_slice(&self) -> &[Plate] {
        &self.plates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plate> {
        self.plates.iter()
    }

    pub fn len(&self) -> usize {
        self.plates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }

    pub fn get(&self, plate_id: &str) -> Option<&Plate> {
        self.plates.iter().find(|p| p.id == plate_id)
    }

    pub fn position(&self, plate_id: &str) -> Option<usize> {
        self.plates.iter().position(|p| p.id == plate_id)
    }

    pub fn contains(&self, plate_id: &str) -> bool {
        self.position(plate_id).is_some()
    }

    pub fn add_default(&mut self, rules: &PlateRules) -> Result<&Plate> {
        let plate = Plate::with_random_id(rules.default_width_cm, rules.default_height_cm);
        self.push(plate, rules)?;
        Ok(&self.plates[self.plates.len() - 1])
    }

    pub fn push(&mut self, plate: Plate, rules: &PlateRules) -> Result<()> {
        if self.plates.len() >= rules.max_plates {
            return Err(Error::PlateLimit {
                max: rules.max_plates,
            });
        }
        if self.contains(&plate.id) {
            return Err(Error::DuplicatePlate { plate_id: plate.id });
        }
        check_dimension(Dimension::Width, plate.width_cm, rules)?;
        check_dimension(Dimension::Height, plate.height_cm, rules)?;
        tracing::debug!(plate_id = %plate.id, "plate added");
        self.plates.push(plate);
        Ok(())
    }

    pub fn remove(&mut self, plate_id: &str) -> Result<Plate> {
        let Some(idx) = self.position(plate_id) else {
            return Err(Error::UnknownPlate {
                plate_id: plate_id.to_string(),
            });
        };
        if self.plates.len() <= 1 {
            return Err(Error::LastPlate);
        }
        tracing::debug!(plate_id, "plate removed");
        Ok(self.plates.remove(idx))
    }

    /// Sets both dimensions at once; nothing changes unless both are within bounds.
    pub fn resize(
        &mut self,
        plate_id: &str,
        width_cm: f64,
        height_cm: f64,
        rules: &PlateRules,
    ) -> Result<()> {
        check_dimension(Dimension::Width, width_cm, rules)?;
        check_dimension(Dimension::Height, height_cm, rules)?;
        let plate = self.get_mut(plate_id)?;
        plate.width_cm = width_cm;
        plate.height_cm = height_cm;
        Ok(())
    }

    pub fn set_dimension(
        &mut self,
        plate_id: &str,
        dimension: Dimension,
        value: f64,
        rules: &PlateRules,
    ) -> Result<()> {
        check_dimension(dimension, value, rules)?;
        let plate = self.get_mut(plate_id)?;
        match dimension {
            Dimension::Width => plate.width_cm = value,
            Dimension::Height => plate.height_cm = value,
        }
        Ok(())
    }

    /// Moves the plate at `from` so it ends up at index `to`.
    pub fn move_plate(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.plates.len();
        for index in [from, to] {
            if index >= len {
                return Err(Error::IndexOutOfRange { index, len });
            }
        }
        let plate = self.plates.remove(from);
        self.plates.insert(to, plate);
        Ok(())
    }

    fn get_mut(&mut self, plate_id: &str) -> Result<&mut Plate> {
        self.plates
            .iter_mut()
            .find(|p| p.id == plate_id)
            .ok_or_else(|| Error::UnknownPlate {
                plate_id: plate_id.to_string(),
            })
    }
}

impl From<Vec<Plate>> for PlateList {
    fn from(plates: Vec<Plate>) -> Self {
        Self::new(plates)
    }
}

impl<'a> IntoIterator for &'a PlateList {
    type Item = &'a Plate;
    type IntoIter = std::slice::Iter<'a, Plate>;

    fn into_iter(self) -> Self::IntoIter {
        self.plates.iter()
    }
}
