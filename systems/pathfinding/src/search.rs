//! Uniform-cost search over a [`Grid`].

use std::{cmp::Reverse, collections::BinaryHeap};

use skirmish_core::CellCoord;

use crate::{grid::Grid, route::PredecessorMap};

const UNREACHED: u32 = u32::MAX;

/// Frontier entry ordered by distance, then column, then row.
///
/// Wrapped in [`Reverse`] so the max-heap pops the smallest entry first;
/// equal distances therefore pop in lexicographic coordinate order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    distance: u32,
    cell: CellCoord,
}

/// State left behind by a finished search.
#[derive(Debug)]
pub(crate) struct SearchOutcome {
    pub(crate) predecessors: PredecessorMap,
    /// Number of cells finalized before the search stopped.
    pub(crate) settled: usize,
}

/// Runs Dijkstra's algorithm with unit edge costs from `origin`, stopping as
/// soon as `destination` is finalized.
///
/// The frontier never decreases keys in place. Improved distances push a
/// fresh entry and superseded entries are skipped when popped.
pub(crate) fn run(grid: &Grid, origin: CellCoord, destination: CellCoord) -> SearchOutcome {
    let dimensions = grid.dimensions();
    let cell_count = dimensions.cell_count();
    let mut distances = vec![UNREACHED; cell_count];
    let mut visited = vec![false; cell_count];
    let mut predecessors = PredecessorMap::new(dimensions);
    let mut frontier = BinaryHeap::new();
    let mut settled = 0;

    if let Some(index) = dimensions.index(origin) {
        distances[index] = 0;
        frontier.push(Reverse(FrontierEntry {
            distance: 0,
            cell: origin,
        }));
    }

    while let Some(Reverse(current)) = frontier.pop() {
        let Some(current_index) = dimensions.index(current.cell) else {
            continue;
        };

        if visited[current_index] {
            continue;
        }
        visited[current_index] = true;
        settled += 1;

        if current.cell == destination {
            break;
        }

        let next_distance = distances[current_index].saturating_add(1);

        for neighbor in grid.neighbors(current.cell) {
            if !grid.is_traversable(neighbor) {
                continue;
            }

            let Some(neighbor_index) = dimensions.index(neighbor) else {
                continue;
            };

            if next_distance >= distances[neighbor_index] {
                continue;
            }

            distances[neighbor_index] = next_distance;
            predecessors.record(neighbor, current.cell);
            frontier.push(Reverse(FrontierEntry {
                distance: next_distance,
                cell: neighbor,
            }));
        }
    }

    SearchOutcome {
        predecessors,
        settled,
    }
}
