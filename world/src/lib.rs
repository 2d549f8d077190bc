#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative battlefield state for Skirmish.
//!
//! The [`Battlefield`] owns every deployed unit together with a dense
//! occupancy grid. Systems never hold on to units; they read immutable
//! snapshots through [`query`] and request mutations through the
//! battlefield's methods, which reject anything that would put two living
//! units on one cell.

use skirmish_core::{
    Army, CellCoord, GridDimensions, Side, UnitId, UnitSnapshot, UnitTemplate, BATTLEFIELD,
};
use thiserror::Error;
use tracing::debug;

/// Reasons an army deployment may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// A recruit was assigned a cell outside the grid.
    #[error("cell {cell} lies outside the battlefield")]
    OutOfBounds {
        /// Offending cell.
        cell: CellCoord,
    },
    /// A recruit was assigned a cell that already holds a living unit.
    #[error("cell {cell} is already occupied")]
    Occupied {
        /// Offending cell.
        cell: CellCoord,
    },
}

/// Reasons a unit move may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    /// No unit with the identifier has been deployed.
    #[error("unit {0:?} does not exist")]
    MissingUnit(UnitId),
    /// Dead units stay where they fell.
    #[error("unit {0:?} is dead")]
    DeadUnit(UnitId),
    /// The destination lies outside the grid.
    #[error("cell {0} lies outside the battlefield")]
    OutOfBounds(CellCoord),
    /// The destination holds another living unit.
    #[error("cell {0} is already occupied")]
    Occupied(CellCoord),
}

/// Deployed unit tracked by the battlefield.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    id: UnitId,
    name: String,
    side: Side,
    template: UnitTemplate,
    health: u32,
    cell: CellCoord,
}

impl Unit {
    /// Identifier assigned on deployment.
    #[must_use]
    pub const fn id(&self) -> UnitId {
        self.id
    }

    /// Display name of the unit.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Army the unit fights for.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Statistics the unit was recruited with.
    #[must_use]
    pub const fn template(&self) -> &UnitTemplate {
        &self.template
    }

    /// Remaining health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Cell the unit currently occupies.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Reports whether the unit still has health remaining.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Captures the read-only view consumed by systems.
    #[must_use]
    pub const fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            side: self.side,
            cell: self.cell,
            alive: self.is_alive(),
        }
    }
}

/// Represents the authoritative battlefield state.
#[derive(Clone, Debug)]
pub struct Battlefield {
    dimensions: GridDimensions,
    units: Vec<Unit>,
    occupancy: OccupancyGrid,
    next_id: u32,
}

impl Battlefield {
    /// Creates an empty battlefield with the provided dimensions.
    #[must_use]
    pub fn new(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            units: Vec::new(),
            occupancy: OccupancyGrid::new(dimensions),
            next_id: 0,
        }
    }

    /// Deploys every recruit of the army, assigning fresh identifiers.
    ///
    /// The whole army is validated before any unit is placed, so a rejected
    /// deployment leaves the battlefield untouched.
    pub fn deploy(&mut self, army: &Army) -> Result<Vec<UnitId>, PlacementError> {
        let mut claimed = OccupancyGrid::new(self.dimensions);
        for recruit in &army.recruits {
            let cell = recruit.cell;
            if !self.dimensions.contains(cell) {
                return Err(PlacementError::OutOfBounds { cell });
            }
            if recruit.template.health == 0 {
                continue;
            }
            if !self.occupancy.can_enter(cell) || !claimed.can_enter(cell) {
                return Err(PlacementError::Occupied { cell });
            }
            claimed.occupy(UnitId::new(0), cell);
        }

        let mut ids = Vec::with_capacity(army.recruits.len());
        for recruit in &army.recruits {
            let id = UnitId::new(self.next_id);
            self.next_id = self.next_id.saturating_add(1);

            let unit = Unit {
                id,
                name: recruit.name.clone(),
                side: army.side,
                template: recruit.template.clone(),
                health: recruit.template.health,
                cell: recruit.cell,
            };
            if unit.is_alive() {
                self.occupancy.occupy(id, unit.cell);
            }
            self.units.push(unit);
            ids.push(id);
        }

        debug!(
            side = %army.side,
            units = ids.len(),
            points = army.points,
            "deployed army"
        );
        Ok(ids)
    }

    /// Moves a living unit to a free cell.
    pub fn move_unit(&mut self, id: UnitId, destination: CellCoord) -> Result<(), MoveError> {
        if !self.dimensions.contains(destination) {
            return Err(MoveError::OutOfBounds(destination));
        }

        let index = self.unit_index(id).ok_or(MoveError::MissingUnit(id))?;
        let unit = &self.units[index];
        if !unit.is_alive() {
            return Err(MoveError::DeadUnit(id));
        }

        let from = unit.cell;
        if from == destination {
            return Ok(());
        }

        if !self.occupancy.can_enter(destination) {
            return Err(MoveError::Occupied(destination));
        }

        self.occupancy.vacate(from);
        self.occupancy.occupy(id, destination);
        self.units[index].cell = destination;
        Ok(())
    }

    /// Removes health from a unit, returning the health it has left.
    ///
    /// Returns `None` when no unit carries the identifier. A unit reduced to
    /// zero health vacates its cell.
    pub fn apply_damage(&mut self, id: UnitId, amount: u32) -> Option<u32> {
        let index = self.unit_index(id)?;
        let unit = &mut self.units[index];
        if !unit.is_alive() {
            return Some(0);
        }

        unit.health = unit.health.saturating_sub(amount);
        if unit.health == 0 {
            let cell = unit.cell;
            debug!(unit = id.get(), name = %unit.name, %cell, "unit fell");
            self.occupancy.vacate(cell);
        }

        Some(self.units[index].health)
    }

    fn unit_index(&self, id: UnitId) -> Option<usize> {
        self.units.iter().position(|unit| unit.id == id)
    }
}

impl Default for Battlefield {
    fn default() -> Self {
        Self::new(BATTLEFIELD)
    }
}

/// Query functions that provide read-only access to the battlefield state.
pub mod query {
    use super::{Battlefield, Unit};
    use skirmish_core::{CellCoord, GridDimensions, Side, UnitId, UnitSnapshot};

    /// Dimensions of the battlefield grid.
    #[must_use]
    pub fn dimensions(battlefield: &Battlefield) -> GridDimensions {
        battlefield.dimensions
    }

    /// Every deployed unit, living or dead, in deployment order.
    #[must_use]
    pub fn units(battlefield: &Battlefield) -> &[Unit] {
        &battlefield.units
    }

    /// Looks up a unit by identifier.
    #[must_use]
    pub fn unit(battlefield: &Battlefield, id: UnitId) -> Option<&Unit> {
        battlefield.units.iter().find(|unit| unit.id == id)
    }

    /// Snapshots of every deployed unit sorted by identifier.
    #[must_use]
    pub fn snapshots(battlefield: &Battlefield) -> Vec<UnitSnapshot> {
        let mut snapshots: Vec<UnitSnapshot> =
            battlefield.units.iter().map(Unit::snapshot).collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        snapshots
    }

    /// Identifiers of the side's living units in ascending order.
    #[must_use]
    pub fn living_units(battlefield: &Battlefield, side: Side) -> Vec<UnitId> {
        let mut ids: Vec<UnitId> = battlefield
            .units
            .iter()
            .filter(|unit| unit.side == side && unit.is_alive())
            .map(|unit| unit.id)
            .collect();
        ids.sort();
        ids
    }

    /// Reports whether the side still has at least one living unit.
    #[must_use]
    pub fn has_living(battlefield: &Battlefield, side: Side) -> bool {
        battlefield
            .units
            .iter()
            .any(|unit| unit.side == side && unit.is_alive())
    }

    /// Living unit standing on the cell, if any.
    #[must_use]
    pub fn occupant(battlefield: &Battlefield, cell: CellCoord) -> Option<UnitId> {
        battlefield.occupancy.occupant(cell)
    }
}

#[derive(Clone, Debug)]
struct OccupancyGrid {
    dimensions: GridDimensions,
    cells: Vec<Option<UnitId>>,
}

impl OccupancyGrid {
    fn new(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            cells: vec![None; dimensions.cell_count()],
        }
    }

    fn can_enter(&self, cell: CellCoord) -> bool {
        self.occupant(cell).is_none()
    }

    fn occupant(&self, cell: CellCoord) -> Option<UnitId> {
        self.dimensions
            .index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    fn occupy(&mut self, id: UnitId, cell: CellCoord) {
        if let Some(index) = self.dimensions.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = Some(id);
            }
        }
    }

    fn vacate(&mut self, cell: CellCoord) {
        if let Some(index) = self.dimensions.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = None;
            }
        }
    }
}
