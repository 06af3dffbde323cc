use log::{debug, info};

use crate::{coordinate::Coordinate, grid::Grid, Path};

pub mod astar;
pub mod dfs;
pub mod walk;

/// The [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two cells.
/// Admissible and consistent for unit-cost 4-directional movement.
pub fn heuristic(a: &Coordinate, b: &Coordinate) -> u32 {
    a.manhattan_distance(b)
}

/// Outcome of the checks every solver performs before searching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Precheck {
    /// The answer is known without searching.
    Resolved(Path),
    Search,
}

pub trait GridSolver {
    fn name(&self) -> &'static str;

    /// Searches the grid for a route. The grid itself is never modified, so the same grid can
    /// be handed to any number of solvers.
    fn search(&self, grid: &Grid, start: Coordinate, goal: Coordinate) -> Path;

    /// Computes a path from start to goal. An empty path means no path exists.
    fn find_path(&self, grid: &Grid, start: Coordinate, goal: Coordinate) -> Path {
        match precheck(grid, &start, &goal) {
            Precheck::Resolved(path) => path,
            Precheck::Search => {
                let path = self.search(grid, start, goal);
                info!(
                    "{} found a path of {} cells from {} to {}",
                    self.name(),
                    path.len(),
                    start,
                    goal
                );
                path
            }
        }
    }
}

/// Handles the trivial cases: endpoints outside the map or on impassable cells, start equal to
/// goal, and start and goal on different connected components.
pub fn precheck(grid: &Grid, start: &Coordinate, goal: &Coordinate) -> Precheck {
    if !grid.in_bounds(*start) || !grid.in_bounds(*goal) {
        debug!("{} or {} lies outside the grid", start, goal);
        return Precheck::Resolved(Vec::new());
    }
    if start == goal {
        return Precheck::Resolved(vec![*start]);
    }
    if !grid.is_free(*start) || !grid.is_free(*goal) {
        debug!("{} or {} is not passable", start, goal);
        return Precheck::Resolved(Vec::new());
    }
    if grid.components_dirty {
        debug!("Components are dirty, searching without reachability check");
    } else if grid.unreachable(start, goal) {
        info!("{} is not reachable from {}", goal, start);
        return Precheck::Resolved(Vec::new());
    }
    Precheck::Search
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_spot_checks() {
        let a = Coordinate::new(1, 1);
        let b = Coordinate::new(4, 3);
        assert_eq!(heuristic(&a, &a), 0);
        assert_eq!(heuristic(&a, &b), 5);
        assert_eq!(heuristic(&a, &b), heuristic(&b, &a));
    }

    #[test]
    fn precheck_trivial_cases() {
        let grid: Grid = "0,1,0\n0,1,0".parse().unwrap();
        let c = Coordinate::new;
        assert_eq!(
            precheck(&grid, &c(0, 0), &c(0, 0)),
            Precheck::Resolved(vec![c(0, 0)])
        );
        assert_eq!(
            precheck(&grid, &c(0, 0), &c(0, 5)),
            Precheck::Resolved(vec![])
        );
        assert_eq!(
            precheck(&grid, &c(0, 0), &c(0, 1)),
            Precheck::Resolved(vec![])
        );
        assert_eq!(
            precheck(&grid, &c(0, 0), &c(0, 2)),
            Precheck::Resolved(vec![])
        );
        assert_eq!(precheck(&grid, &c(0, 0), &c(1, 0)), Precheck::Search);
    }
}
