use fxhash::FxHashMap;
use log::{log_enabled, trace, Level};

use crate::{
    coordinate::Coordinate,
    grid::{Grid, GridView, VisitedOverlay},
    reconstruct_path,
    solver::GridSolver,
    Path,
};

/// Depth-first search with an explicit stack. Finds a path whenever one exists but gives no
/// guarantee on its length. Neighbours are pushed up, down, left, right, so the right
/// neighbour is explored first. Cells are never revisited once popped.
#[derive(Clone, Debug, Default)]
pub struct DfsSolver;

impl DfsSolver {
    pub fn new() -> DfsSolver {
        DfsSolver
    }
}

impl GridSolver for DfsSolver {
    fn name(&self) -> &'static str {
        "DFS"
    }

    fn search(&self, grid: &Grid, start: Coordinate, goal: Coordinate) -> Path {
        let mut stack = vec![start];
        let mut visited = VisitedOverlay::new(grid);
        let mut parents: FxHashMap<Coordinate, Option<Coordinate>> = FxHashMap::default();
        parents.insert(start, None);

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if log_enabled!(Level::Trace) {
                trace!("Visiting {}\n{}", current, GridView::new(grid).with_visited(&visited));
            }
            if current == goal {
                return reconstruct_path(current, parents.len(), |node| {
                    parents.get(node).copied().flatten()
                });
            }
            for neighbor in grid.neighbors(current) {
                if visited.contains(neighbor) {
                    continue;
                }
                // The latest push is popped first, so its parent is the one that counts
                parents.insert(neighbor, Some(current));
                stack.push(neighbor);
            }
        }
        Vec::new()
    }
}
