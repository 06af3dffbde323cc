//! # grid_route
//!
//! Route finding on 4-connected grid maps. A map is loaded from a comma-separated file, start
//! and goal are read from accompanying notes, and a route is searched with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm), depth-first search or a simple
//! direction-priority walk. Found routes are translated into movement [Command]s and can be
//! replayed frame by frame in the terminal.
//!
//! Uniform move costs are assumed. [Connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! are pre-computed so that searches return immediately if no path exists.
mod astar;
pub mod command;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod grid;
pub mod map;
pub mod replay;
pub mod solver;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;

pub use crate::command::{apply_commands, path_to_commands, Command};
pub use crate::coordinate::{Coordinate, Direction};
pub use crate::error::{Error, Result};
pub use crate::grid::{CellState, Grid, GridView, VisitedOverlay};
pub use crate::solver::{
    astar::AstarSolver, dfs::DfsSolver, heuristic, walk::DirectionalWalk, GridSolver,
};

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// An ordered route from start to goal, both inclusive. Empty if no route exists.
pub type Path = Vec<Coordinate>;

/// Walks parent links from `terminal` back to the node without a parent and returns the nodes
/// in forward order. More than `bound` links means the links form a cycle, which is a bug in
/// the caller and panics.
pub fn reconstruct_path<N, F>(terminal: N, bound: usize, mut parent_of: F) -> Vec<N>
where
    N: Clone,
    F: FnMut(&N) -> Option<N>,
{
    let mut path: Vec<N> = std::iter::successors(Some(terminal), |node| parent_of(node))
        .enumerate()
        .map(|(i, node)| {
            assert!(i <= bound, "parent links form a cycle");
            node
        })
        .collect();
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxhash::FxHashMap;

    #[test]
    fn reconstruct_follows_parents() {
        let mut parents: FxHashMap<u32, Option<u32>> = FxHashMap::default();
        parents.insert(0, None);
        parents.insert(1, Some(0));
        parents.insert(2, Some(1));
        parents.insert(7, Some(2));
        let path = reconstruct_path(7, parents.len(), |n| parents[n]);
        assert_eq!(path, vec![0, 1, 2, 7]);
        assert_eq!(reconstruct_path(0, parents.len(), |n| parents[n]), vec![0]);
    }

    #[test]
    #[should_panic(expected = "cycle")]
    fn reconstruct_panics_on_cycle() {
        let mut parents: FxHashMap<u32, Option<u32>> = FxHashMap::default();
        parents.insert(1, Some(2));
        parents.insert(2, Some(1));
        reconstruct_path(1, parents.len(), |n| parents[n]);
    }
}
