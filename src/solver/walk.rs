use log::{debug, log_enabled, trace, Level};

use crate::{
    coordinate::{Coordinate, Direction},
    error::{Error, Result},
    grid::{Grid, GridView, VisitedOverlay},
    reconstruct_path, FxIndexMap, Path,
};

/// Order in which the walk tries to leave the current cell.
const WALK_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

/// A greedy walk without backtracking. From the most recently discovered cell it moves in the
/// first direction of [WALK_ORDER] that leads to the goal or to an unvisited free cell. It
/// only finds a path on forgiving maps, which makes it a useful baseline for the real searches.
#[derive(Clone, Debug)]
pub struct DirectionalWalk {
    pub max_steps: usize,
}

impl Default for DirectionalWalk {
    fn default() -> DirectionalWalk {
        DirectionalWalk { max_steps: 1024 }
    }
}

impl DirectionalWalk {
    pub fn new(max_steps: usize) -> DirectionalWalk {
        DirectionalWalk { max_steps }
    }

    pub fn name(&self) -> &'static str {
        "walk"
    }

    /// Walks from start towards goal. Fails with [Error::WalkStuck] on a dead end and with
    /// [Error::WalkExhausted] once `max_steps` cells have been left without reaching the goal.
    ///
    /// Like the searches, the walk returns an empty path without walking if start or goal lies
    /// outside the grid or on an impassable cell.
    pub fn run(&self, grid: &Grid, start: Coordinate, goal: Coordinate) -> Result<Path> {
        if !grid.is_free(start) || !grid.is_free(goal) {
            debug!("{} or {} is outside the grid or not passable", start, goal);
            return Ok(Vec::new());
        }
        if start == goal {
            return Ok(vec![start]);
        }
        let mut visited = VisitedOverlay::new(grid);
        visited.insert(start);
        // Insertion ordered, so the last entry is the cell the walk stands on
        let mut nodes: FxIndexMap<Coordinate, Option<Coordinate>> = FxIndexMap::default();
        nodes.insert(start, None);

        for step in 0..self.max_steps {
            let current = match nodes.last() {
                Some((&cell, _)) => cell,
                None => break,
            };
            debug!("Step {}: walking from {}", step, current);
            let mut advanced = false;
            for direction in WALK_ORDER {
                let next = current.step(direction);
                if !grid.in_bounds(next) {
                    continue;
                }
                if next == goal {
                    debug!("{:?}: reached goal {}", direction, goal);
                    nodes.insert(goal, Some(current));
                    return Ok(reconstruct_path(goal, nodes.len(), |cell| {
                        nodes.get(cell).copied().flatten()
                    }));
                }
                if grid.is_free(next) && visited.insert(next) {
                    trace!("{:?}: marking {} visited", direction, next);
                    nodes.insert(next, Some(current));
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                return Err(Error::WalkStuck { at: current });
            }
            if log_enabled!(Level::Trace) {
                trace!("\n{}", GridView::new(grid).with_visited(&visited));
            }
        }
        Err(Error::WalkExhausted {
            steps: self.max_steps,
        })
    }
}
