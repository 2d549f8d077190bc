//! Predecessor bookkeeping and route reconstruction.

use skirmish_core::{CellCoord, GridDimensions, Route};

/// Dense map recording the cell each relaxed cell was reached from.
#[derive(Clone, Debug)]
pub(crate) struct PredecessorMap {
    dimensions: GridDimensions,
    cells: Vec<Option<CellCoord>>,
}

impl PredecessorMap {
    pub(crate) fn new(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            cells: vec![None; dimensions.cell_count()],
        }
    }

    /// Overwrites the predecessor of `cell`.
    pub(crate) fn record(&mut self, cell: CellCoord, from: CellCoord) {
        if let Some(index) = self.dimensions.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = Some(from);
            }
        }
    }

    pub(crate) fn get(&self, cell: CellCoord) -> Option<CellCoord> {
        self.dimensions
            .index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }
}

/// Walks the predecessor chain from `target` back to `attacker`.
///
/// A chain that breaks before reaching the attacker means the search never
/// reached the target, which yields an empty route.
pub(crate) fn reconstruct(
    predecessors: &PredecessorMap,
    attacker: CellCoord,
    target: CellCoord,
) -> Route {
    let mut cells = Vec::new();
    let mut current = target;

    while current != attacker {
        cells.push(current);
        let Some(previous) = predecessors.get(current) else {
            return Route::unreachable();
        };
        current = previous;
    }

    cells.push(attacker);
    cells.reverse();
    Route::from_cells(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_chain_back_to_attacker() {
        let mut predecessors = PredecessorMap::new(GridDimensions::new(3, 3));
        predecessors.record(CellCoord::new(1, 0), CellCoord::new(0, 0));
        predecessors.record(CellCoord::new(1, 1), CellCoord::new(1, 0));
        predecessors.record(CellCoord::new(2, 1), CellCoord::new(1, 1));

        let route = reconstruct(&predecessors, CellCoord::new(0, 0), CellCoord::new(2, 1));

        assert_eq!(
            route.cells(),
            &[
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(1, 1),
                CellCoord::new(2, 1),
            ]
        );
    }

    #[test]
    fn broken_chain_yields_empty_route() {
        let mut predecessors = PredecessorMap::new(GridDimensions::new(3, 3));
        predecessors.record(CellCoord::new(2, 2), CellCoord::new(2, 1));

        let route = reconstruct(&predecessors, CellCoord::new(0, 0), CellCoord::new(2, 2));

        assert!(route.is_empty());
    }

    #[test]
    fn attacker_on_target_yields_single_cell() {
        let predecessors = PredecessorMap::new(GridDimensions::new(3, 3));

        let route = reconstruct(&predecessors, CellCoord::new(1, 1), CellCoord::new(1, 1));

        assert_eq!(route.cells(), &[CellCoord::new(1, 1)]);
    }

    #[test]
    fn later_records_overwrite_earlier_ones() {
        let mut predecessors = PredecessorMap::new(GridDimensions::new(2, 2));
        predecessors.record(CellCoord::new(1, 1), CellCoord::new(0, 1));
        predecessors.record(CellCoord::new(1, 1), CellCoord::new(1, 0));

        assert_eq!(
            predecessors.get(CellCoord::new(1, 1)),
            Some(CellCoord::new(1, 0))
        );
    }
}
