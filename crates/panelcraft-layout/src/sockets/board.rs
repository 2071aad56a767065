use super::collision::validate_placement;
use super::geometry::{group_size, is_eligible};
use crate::error::{Result, SocketError};
use panelcraft_core::geom::CmPoint;
use panelcraft_core::{ClearanceMode, Plate, SocketDirection, SocketGroup, SocketRules, new_id};
use serde::{Deserialize, Serialize};

/// The committed socket groups of a configuration plus the global "sockets enabled" switch.
///
/// Every mutating method either applies completely or returns an error and leaves the board as it
/// was.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SocketBoard {
    enabled: bool,
    groups: Vec<SocketGroup>,
}

impl SocketBoard {
    /// Wraps externally supplied groups without validating them.
    pub fn new(enabled: bool, groups: Vec<SocketGroup>) -> Self {
        Self { enabled, groups }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// All groups, including those kept while sockets are switched off.
    pub fn groups(&self) -> &[SocketGroup] {
        &self.groups
    }

    /// Groups that take part in hit-testing and drawing.
    pub fn visible_groups(&self) -> &[SocketGroup] {
        if self.enabled { &self.groups } else { &[] }
    }

    pub fn get(&self, group_id: &str) -> Option<&SocketGroup> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Turns sockets on or off. Enabling an empty board seeds one group on the first eligible
    /// plate; with no eligible plate the switch stays off.
    pub fn set_enabled(
        &mut self,
        enabled: bool,
        plates: &[Plate],
        rules: &SocketRules,
    ) -> Result<()> {
        if enabled && !self.enabled && self.groups.is_empty() {
            let group = self.find_free_slot(plates, rules)?;
            tracing::debug!(group_id = %group.id, plate_id = %group.plate_id, "seeded socket group");
            self.groups.push(group);
        }
        self.enabled = enabled;
        Ok(())
    }

    /// Appends a single-socket group at the first free spot of the first eligible plate that has
    /// room for it.
    pub fn add_group(&mut self, plates: &[Plate], rules: &SocketRules) -> Result<&SocketGroup> {
        let group = self.find_free_slot(plates, rules)?;
        tracing::debug!(group_id = %group.id, plate_id = %group.plate_id, "socket group added");
        self.groups.push(group);
        Ok(&self.groups[self.groups.len() - 1])
    }

    /// Inserts a fully specified group after running the commit checks on it.
    pub fn insert(
        &mut self,
        group: SocketGroup,
        plates: &[Plate],
        rules: &SocketRules,
    ) -> Result<()> {
        if self.get(&group.id).is_some() {
            return Err(SocketError::DuplicateGroup { group_id: group.id });
        }
        self.check_commit(&group, plates, rules)?;
        self.groups.push(group);
        Ok(())
    }

    pub fn delete_group(&mut self, group_id: &str) -> Result<SocketGroup> {
        let Some(idx) = self.groups.iter().position(|g| g.id == group_id) else {
            return Err(SocketError::UnknownGroup {
                group_id: group_id.to_string(),
            });
        };
        if self.enabled && self.groups.len() <= 1 {
            return Err(SocketError::LastGroupRequired);
        }
        tracing::debug!(group_id, "socket group deleted");
        Ok(self.groups.remove(idx))
    }

    /// Replaces the stored group with the same id by `group`, provided it passes every commit rule
    /// (eligible plate, capacity, edge clearance, spacing).
    pub fn commit_edit(
        &mut self,
        group: SocketGroup,
        plates: &[Plate],
        rules: &SocketRules,
    ) -> Result<()> {
        let Some(idx) = self.groups.iter().position(|g| g.id == group.id) else {
            return Err(SocketError::UnknownGroup { group_id: group.id });
        };
        self.check_commit(&group, plates, rules)?;
        self.groups[idx] = group;
        Ok(())
    }

    /// Drops groups whose plate is no longer in `plates`; returns the removed ids.
    pub fn prune_orphans(&mut self, plates: &[Plate]) -> Vec<String> {
        let mut removed = Vec::new();
        self.groups.retain(|g| {
            let keep = plates.iter().any(|p| p.id == g.plate_id);
            if !keep {
                tracing::warn!(group_id = %g.id, plate_id = %g.plate_id, "dropping orphaned socket group");
                removed.push(g.id.clone());
            }
            keep
        });
        removed
    }

    /// Every stored group that currently breaks a commit rule, in list order. Orphaned groups are
    /// reported as `UnknownPlate`.
    pub fn violations(&self, plates: &[Plate], rules: &SocketRules) -> Vec<(String, SocketError)> {
        self.groups
            .iter()
            .filter_map(|g| {
                self.check_commit(g, plates, rules)
                    .err()
                    .map(|err| (g.id.clone(), err))
            })
            .collect()
    }

    /// Moves a group without any checks; the drag controller resolves positions itself.
    pub(crate) fn set_anchor(&mut self, group_id: &str, anchor: CmPoint) -> bool {
        match self.groups.iter_mut().find(|g| g.id == group_id) {
            Some(group) => {
                group.x_cm = anchor.x;
                group.y_cm = anchor.y;
                true
            }
            None => false,
        }
    }

    fn check_commit(
        &self,
        group: &SocketGroup,
        plates: &[Plate],
        rules: &SocketRules,
    ) -> Result<()> {
        let plate = plates
            .iter()
            .find(|p| p.id == group.plate_id)
            .ok_or_else(|| SocketError::UnknownPlate {
                plate_id: group.plate_id.clone(),
            })?;
        if !is_eligible(plate, rules) {
            return Err(SocketError::IneligiblePlate {
                plate_id: plate.id.clone(),
            });
        }
        validate_placement(plate, group, &self.groups, rules, ClearanceMode::Commit)
    }

    /// Scans the eligible plates left to right for a position where a new single socket passes the
    /// commit rules. Candidates form a grid starting at the clearance corner, one socket plus the
    /// group spacing apart.
    fn find_free_slot(&self, plates: &[Plate], rules: &SocketRules) -> Result<SocketGroup> {
        let eligible: Vec<&Plate> = plates.iter().filter(|p| is_eligible(p, rules)).collect();
        if eligible.is_empty() {
            return Err(SocketError::NoEligiblePlate {
                min_width_cm: rules.eligible_min_width_cm,
                min_height_cm: rules.eligible_min_height_cm,
            });
        }

        let clearance = rules.clearance(ClearanceMode::Commit);
        let size = group_size(1, SocketDirection::Horizontal, rules);
        let step_x = size.width + rules.group_spacing_cm;
        let step_y = size.height + rules.group_spacing_cm;
        let id = new_id();
        for plate in eligible {
            let max_x = plate.width_cm - clearance - size.width;
            let max_y = plate.height_cm - clearance - size.height;
            let mut y = clearance;
            while y <= max_y + crate::EPSILON_CM {
                let mut x = clearance;
                while x <= max_x + crate::EPSILON_CM {
                    let candidate = SocketGroup::new(
                        id.clone(),
                        plate.id.clone(),
                        x,
                        y,
                        1,
                        SocketDirection::Horizontal,
                    );
                    let placed = validate_placement(
                        plate,
                        &candidate,
                        &self.groups,
                        rules,
                        ClearanceMode::Commit,
                    );
                    if placed.is_ok() {
                        return Ok(candidate);
                    }
                    x += step_x;
                }
                y += step_y;
            }
        }
        Err(SocketError::NoFreeSpace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plates() -> Vec<Plate> {
        vec![Plate::new("small", 25.0, 128.0), Plate::new("big", 100.0, 60.0)]
    }

    #[test]
    fn enabling_seeds_group_on_first_eligible_plate() {
        let rules = SocketRules::default();
        let mut board = SocketBoard::default();
        board.set_enabled(true, &plates(), &rules).unwrap();
        assert!(board.is_enabled());
        assert_eq!(board.len(), 1);
        let g = &board.groups()[0];
        assert_eq!(g.plate_id, "big");
        assert_eq!((g.x_cm, g.y_cm, g.count), (3.5, 3.5, 1));
    }

    #[test]
    fn enabling_without_eligible_plate_is_refused() {
        let rules = SocketRules::default();
        let mut board = SocketBoard::default();
        let err = board
            .set_enabled(true, &[Plate::new("tiny", 25.0, 30.0)], &rules)
            .unwrap_err();
        assert!(matches!(err, SocketError::NoEligiblePlate { .. }));
        assert!(!board.is_enabled());
        assert!(board.is_empty());
    }

    #[test]
    fn added_groups_keep_their_distance() {
        let rules = SocketRules::default();
        let mut board = SocketBoard::default();
        board.set_enabled(true, &plates(), &rules).unwrap();
        let second = board.add_group(&plates(), &rules).unwrap().clone();
        // 3.5 + 7 + 4
        assert_eq!((second.x_cm, second.y_cm), (14.5, 3.5));
        assert!(board.violations(&plates(), &rules).is_empty());
    }

    #[test]
    fn last_group_survives_while_enabled() {
        let rules = SocketRules::default();
        let mut board = SocketBoard::default();
        board.set_enabled(true, &plates(), &rules).unwrap();
        let id = board.groups()[0].id.clone();
        assert_eq!(board.delete_group(&id), Err(SocketError::LastGroupRequired));

        board.set_enabled(false, &plates(), &rules).unwrap();
        assert!(board.visible_groups().is_empty());
        assert!(board.delete_group(&id).is_ok());
    }
}
