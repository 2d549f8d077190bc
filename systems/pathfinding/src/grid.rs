//! Traversability model consulted by the path search.

use skirmish_core::{CellCoord, GridDimensions, UnitSnapshot};

/// Fixed-extent grid whose blocked cells are derived from live unit positions.
///
/// A grid is built once per search call and never mutated afterwards. Cells
/// held by living units block movement, except the attacker's and the
/// target's own cells, which always stay open even when the snapshot that
/// produced the grid is stale.
#[derive(Clone, Debug)]
pub struct Grid {
    dimensions: GridDimensions,
    blocked: Vec<bool>,
    blocked_count: usize,
}

impl Grid {
    /// Derives the blocked cells for a search from `attacker` to `target`.
    #[must_use]
    pub fn new(
        dimensions: GridDimensions,
        units: &[UnitSnapshot],
        attacker: CellCoord,
        target: CellCoord,
    ) -> Self {
        let mut blocked = vec![false; dimensions.cell_count()];
        let mut blocked_count = 0;

        for unit in units {
            if !unit.alive || unit.cell == attacker || unit.cell == target {
                continue;
            }

            let Some(index) = dimensions.index(unit.cell) else {
                continue;
            };

            if !blocked[index] {
                blocked[index] = true;
                blocked_count += 1;
            }
        }

        Self {
            dimensions,
            blocked,
            blocked_count,
        }
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Number of distinct blocked cells.
    #[must_use]
    pub const fn blocked_count(&self) -> usize {
        self.blocked_count
    }

    /// Reports whether the cell lies inside the grid and is not blocked.
    #[must_use]
    pub fn is_traversable(&self, cell: CellCoord) -> bool {
        self.dimensions
            .index(cell)
            .and_then(|index| self.blocked.get(index))
            .map_or(false, |blocked| !blocked)
    }

    /// In-bounds orthogonal neighbours ordered left, right, up, down.
    ///
    /// Blocked neighbours are included; callers filter with
    /// [`Grid::is_traversable`].
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> {
        let width = self.dimensions.width();
        let height = self.dimensions.height();
        let mut candidates = [None; 4];
        let mut count = 0;

        if let Some(column) = cell.column().checked_sub(1) {
            candidates[count] = Some(CellCoord::new(column, cell.row()));
            count += 1;
        }

        if let Some(column) = cell.column().checked_add(1) {
            if column < width {
                candidates[count] = Some(CellCoord::new(column, cell.row()));
                count += 1;
            }
        }

        if let Some(row) = cell.row().checked_sub(1) {
            candidates[count] = Some(CellCoord::new(cell.column(), row));
            count += 1;
        }

        if let Some(row) = cell.row().checked_add(1) {
            if row < height {
                candidates[count] = Some(CellCoord::new(cell.column(), row));
                count += 1;
            }
        }

        candidates.into_iter().take(count).flatten()
    }
}
