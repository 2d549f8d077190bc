#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shortest-path search that routes a unit toward its chosen target.
//!
//! Every call builds its own [`Grid`] from the supplied unit snapshots, runs a
//! uniform-cost search over four-connected movement, and reconstructs the
//! route from the predecessor chain. No state survives between calls, so a
//! [`PathFinder`] can be shared freely across threads.

mod grid;
mod route;
mod search;

use skirmish_core::{CellCoord, GridDimensions, Route, UnitSnapshot, BATTLEFIELD};
use tracing::debug;

pub use grid::Grid;

/// Path search configured for a fixed grid extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathFinder {
    dimensions: GridDimensions,
}

impl PathFinder {
    /// Creates a path finder for grids of the provided dimensions.
    #[must_use]
    pub const fn new(dimensions: GridDimensions) -> Self {
        Self { dimensions }
    }

    /// Dimensions of the grids searched by this path finder.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Computes a shortest route from `attacker` to `target`.
    ///
    /// Cells held by living units in `units` are impassable, apart from the
    /// attacker's and the target's own cells. The returned route lists every
    /// cell from `attacker` to `target` inclusive, or is empty when the target
    /// cannot be reached. When several shortest routes exist, which one is
    /// returned is unspecified.
    ///
    /// # Panics
    ///
    /// Panics when either cell lies outside the grid. Callers own cell
    /// assignment, so an out-of-bounds cell is a caller bug.
    #[must_use]
    pub fn find_path(
        &self,
        attacker: CellCoord,
        target: CellCoord,
        units: &[UnitSnapshot],
    ) -> Route {
        assert!(
            self.dimensions.contains(attacker),
            "attacker cell {attacker} lies outside the {} grid",
            self.dimensions
        );
        assert!(
            self.dimensions.contains(target),
            "target cell {target} lies outside the {} grid",
            self.dimensions
        );

        let grid = Grid::new(self.dimensions, units, attacker, target);
        let outcome = search::run(&grid, attacker, target);
        let route = route::reconstruct(&outcome.predecessors, attacker, target);

        debug!(
            %attacker,
            %target,
            blocked = grid.blocked_count(),
            settled = outcome.settled,
            edges = route.edge_count(),
            reachable = !route.is_empty(),
            "path search finished"
        );

        route
    }
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new(BATTLEFIELD)
    }
}

/// Computes a shortest route on the standard 27×21 battlefield.
///
/// See [`PathFinder::find_path`].
#[must_use]
pub fn find_path(attacker: CellCoord, target: CellCoord, units: &[UnitSnapshot]) -> Route {
    PathFinder::default().find_path(attacker, target, units)
}
