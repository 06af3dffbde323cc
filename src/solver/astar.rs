use log::{log_enabled, trace, Level};

use crate::{
    astar::astar,
    coordinate::Coordinate,
    grid::{Grid, GridView, VisitedOverlay},
    solver::GridSolver,
    Path,
};

use super::heuristic;

/// A* with unit move costs and the Manhattan heuristic, which makes the found paths shortest
/// paths. Among equally promising cells the deepest one is expanded first, then the one
/// discovered first.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GridSolver for AstarSolver {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn search(&self, grid: &Grid, start: Coordinate, goal: Coordinate) -> Path {
        let mut expanded = VisitedOverlay::new(grid);
        astar(
            &start,
            |node| {
                expanded.insert(*node);
                if log_enabled!(Level::Trace) {
                    trace!("Expanding {}\n{}", node, GridView::new(grid).with_visited(&expanded));
                }
                grid.neighbors(*node).into_iter().map(|n| (n, 1u32))
            },
            |node| heuristic(node, &goal),
            |node| *node == goal,
        )
        .map(|(path, _cost)| path)
        .unwrap_or_default()
    }
}
