#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that decides which enemy units are exposed to attack.
//!
//! Armies face each other across the battlefield: the left army's front is
//! its right-hand edge and the right army's front is its left-hand edge. In
//! every row only the living unit nearest the front can be attacked; anything
//! standing behind it is screened.

use skirmish_core::{GridDimensions, Side, UnitSnapshot, BATTLEFIELD};
use tracing::debug;

/// Returns the exposed units of `target_side`, one per occupied row, in row
/// order.
///
/// Each row lists the target army's cells from column zero upward, with
/// `None` for empty cells. Dead units are treated as empty cells, so they
/// never screen the living units behind them.
#[must_use]
pub fn suitable_targets(
    rows: &[Vec<Option<UnitSnapshot>>],
    target_side: Side,
) -> Vec<UnitSnapshot> {
    rows.iter()
        .filter_map(|row| exposed_in_row(row, target_side))
        .collect()
}

fn exposed_in_row(row: &[Option<UnitSnapshot>], target_side: Side) -> Option<UnitSnapshot> {
    let mut living = row.iter().flatten().filter(|unit| unit.alive);
    match target_side {
        Side::Left => living.next_back().copied(),
        Side::Right => living.next().copied(),
    }
}

/// Targeting system that reuses its row buffers between calls.
#[derive(Debug)]
pub struct Targeting {
    dimensions: GridDimensions,
    rows: Vec<Vec<Option<UnitSnapshot>>>,
}

impl Targeting {
    /// Creates a targeting system for grids of the provided dimensions.
    #[must_use]
    pub fn new(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            rows: Vec::new(),
        }
    }

    /// Computes the exposed units of `target_side` from a flat snapshot list.
    ///
    /// The output buffer is cleared before populating it.
    pub fn handle(
        &mut self,
        units: &[UnitSnapshot],
        target_side: Side,
        out: &mut Vec<UnitSnapshot>,
    ) {
        out.clear();
        self.prepare_rows(units, target_side);
        out.extend(
            self.rows
                .iter()
                .filter_map(|row| exposed_in_row(row, target_side)),
        );

        debug!(
            %target_side,
            exposed = out.len(),
            "selected exposed targets"
        );
    }

    fn prepare_rows(&mut self, units: &[UnitSnapshot], target_side: Side) {
        let width = usize::try_from(self.dimensions.width()).unwrap_or(0);
        let height = usize::try_from(self.dimensions.height()).unwrap_or(0);

        self.rows.resize_with(height, Vec::new);
        for row in &mut self.rows {
            row.clear();
            row.resize(width, None);
        }

        for unit in units {
            if unit.side != target_side || !unit.alive {
                continue;
            }
            if !self.dimensions.contains(unit.cell) {
                continue;
            }

            let Ok(row) = usize::try_from(unit.cell.row()) else {
                continue;
            };
            let Ok(column) = usize::try_from(unit.cell.column()) else {
                continue;
            };
            if let Some(slot) = self
                .rows
                .get_mut(row)
                .and_then(|cells| cells.get_mut(column))
            {
                *slot = Some(*unit);
            }
        }
    }
}

impl Default for Targeting {
    fn default() -> Self {
        Self::new(BATTLEFIELD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{CellCoord, UnitId};

    fn unit(id: u32, column: u32, row: u32, alive: bool) -> UnitSnapshot {
        UnitSnapshot {
            id: UnitId::new(id),
            side: Side::Left,
            cell: CellCoord::new(column, row),
            alive,
        }
    }

    #[test]
    fn left_army_exposes_rightmost_unit() {
        let back = unit(1, 0, 0, true);
        let front = unit(2, 2, 0, true);
        let rows = vec![vec![Some(back), None, Some(front), None]];

        let exposed = suitable_targets(&rows, Side::Left);

        assert_eq!(exposed, vec![front]);
    }

    #[test]
    fn right_army_exposes_leftmost_unit() {
        let front = unit(1, 1, 0, true);
        let back = unit(2, 2, 0, true);
        let rows = vec![vec![None, Some(front), Some(back)]];

        let exposed = suitable_targets(&rows, Side::Right);

        assert_eq!(exposed, vec![front]);
    }

    #[test]
    fn dead_units_do_not_screen() {
        let rows = vec![vec![Some(unit(1, 0, 0, true)), Some(unit(2, 1, 0, false))]];

        let exposed = suitable_targets(&rows, Side::Left);

        assert_eq!(exposed, vec![unit(1, 0, 0, true)]);
    }

    #[test]
    fn empty_rows_contribute_nothing() {
        let fallen = unit(3, 0, 2, false);
        let rows = vec![vec![None, None], Vec::new(), vec![Some(fallen)]];

        assert!(suitable_targets(&rows, Side::Left).is_empty());
        assert!(suitable_targets(&rows, Side::Right).is_empty());
    }
}
