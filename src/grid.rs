use core::fmt;

use log::{debug, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::coordinate::{Coordinate, Direction};
use crate::error::{Error, Result};

/// State of a single map cell. The numeric symbols are those used by map files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
    Free,
    Blocked,
    Visited,
    Start,
    Goal,
}

impl CellState {
    pub fn from_symbol(symbol: &str) -> Option<CellState> {
        match symbol {
            "0" => Some(CellState::Free),
            "1" => Some(CellState::Blocked),
            "2" => Some(CellState::Visited),
            "3" => Some(CellState::Start),
            "4" => Some(CellState::Goal),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            CellState::Free => '0',
            CellState::Blocked => '1',
            CellState::Visited => '2',
            CellState::Start => '3',
            CellState::Goal => '4',
        }
    }

    /// Blocked cells and cells already marked visited in the map file cannot be entered.
    pub fn is_passable(self) -> bool {
        matches!(self, CellState::Free | CellState::Start | CellState::Goal)
    }
}

/// [Grid] stores the cell states of a rectangular map in row-major order. In addition it
/// maintains a [UnionFind] over passable cells so that searches can bail out early when start
/// and goal lie on different connected components.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    /// Creates a `rows` x `cols` grid filled with `fill`. Both dimensions must be non-zero.
    pub fn new(rows: usize, cols: usize, fill: CellState) -> Result<Grid> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyMap);
        }
        let mut grid = Grid {
            rows,
            cols,
            cells: vec![fill; rows * cols],
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Builds a grid from rows of cells, rejecting empty and non-rectangular input.
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Grid> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(Error::EmptyMap);
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(Error::RaggedRow {
                line: i + 1,
                found: row.len(),
                expected: cols,
            });
        }
        let n_rows = rows.len();
        let mut grid = Grid {
            rows: n_rows,
            cols,
            cells: rows.into_iter().flatten().collect(),
            components: UnionFind::new(n_rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, cell: Coordinate) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    /// Row-major index of an in-bounds cell.
    pub fn index(&self, cell: Coordinate) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.row as usize * self.cols + cell.col as usize)
    }

    pub fn get(&self, cell: Coordinate) -> Option<CellState> {
        self.index(cell).map(|ix| self.cells[ix])
    }

    /// Checks whether `cell` is inside the map and can be entered.
    pub fn is_free(&self, cell: Coordinate) -> bool {
        self.get(cell).is_some_and(CellState::is_passable)
    }

    pub fn is_goal(&self, cell: Coordinate) -> bool {
        self.get(cell) == Some(CellState::Goal)
    }

    /// The in-bounds passable cells one cardinal step away from `cell`, in
    /// [Direction::CARDINAL] order.
    pub fn neighbors(&self, cell: Coordinate) -> SmallVec<[Coordinate; 4]> {
        Direction::CARDINAL
            .iter()
            .map(|&dir| cell.step(dir))
            .filter(|&n| self.is_free(n))
            .collect()
    }

    /// Updates a cell. Joins newly connected components and flags the components as dirty if
    /// they are (potentially) broken apart into multiple.
    pub fn set(&mut self, cell: Coordinate, state: CellState) -> Result<()> {
        let ix = self.index(cell).ok_or_else(|| Error::OutOfBounds {
            label: "cell",
            coordinate: cell,
            rows: self.rows,
            cols: self.cols,
        })?;
        let was_passable = self.cells[ix].is_passable();
        self.cells[ix] = state;
        if was_passable && !state.is_passable() {
            self.components_dirty = true;
        } else if state.is_passable() {
            for n in self.neighbors(cell) {
                if let Some(n_ix) = self.index(n) {
                    self.components.union(ix, n_ix);
                }
            }
        }
        Ok(())
    }

    /// Writes the start and goal markers into the map. Endpoints outside the map are rejected.
    /// If start and goal coincide the cell is marked as start only.
    pub fn mark_endpoints(&mut self, start: Coordinate, goal: Coordinate) -> Result<()> {
        for (label, cell) in [("start", start), ("goal", goal)] {
            if !self.in_bounds(cell) {
                return Err(Error::OutOfBounds {
                    label,
                    coordinate: cell,
                    rows: self.rows,
                    cols: self.cols,
                });
            }
            if self.get(cell) == Some(CellState::Blocked) {
                warn!("{} {} is on a blocked cell, clearing it", label, cell);
            }
        }
        self.set(start, CellState::Start)?;
        if goal != start {
            self.set(goal, CellState::Goal)?;
        }
        self.update();
        Ok(())
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Coordinate, goal: &Coordinate) -> bool {
        match (self.index(*start), self.index(*goal)) {
            (Some(start_ix), Some(goal_ix)) => self.components.equiv(start_ix, goal_ix),
            _ => false,
        }
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Coordinate, goal: &Coordinate) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours to the same
    /// components. Only the right and lower neighbour need to be visited per cell.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components for {}x{} grid", self.rows, self.cols);
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let cell = Coordinate::new(row, col);
                if !self.is_free(cell) {
                    continue;
                }
                let ix = row as usize * self.cols + col as usize;
                for n in [cell.step(Direction::Down), cell.step(Direction::Right)] {
                    if self.is_free(n) {
                        let n_ix = n.row as usize * self.cols + n.col as usize;
                        self.components.union(ix, n_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let values = row.iter().map(|c| c.symbol()).collect::<Vec<char>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}

/// Per-search record of visited cells. Keeps traversal bookkeeping out of the [Grid] so that
/// one grid can serve any number of searches.
#[derive(Clone, Debug)]
pub struct VisitedOverlay {
    cols: usize,
    visited: Vec<bool>,
}

impl VisitedOverlay {
    pub fn new(grid: &Grid) -> VisitedOverlay {
        VisitedOverlay {
            cols: grid.cols,
            visited: vec![false; grid.len()],
        }
    }

    fn index(&self, cell: Coordinate) -> Option<usize> {
        let rows = self.visited.len() / self.cols;
        (cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < rows
            && (cell.col as usize) < self.cols)
            .then(|| cell.row as usize * self.cols + cell.col as usize)
    }

    pub fn contains(&self, cell: Coordinate) -> bool {
        self.index(cell).is_some_and(|ix| self.visited[ix])
    }

    /// Marks `cell` as visited. Returns false if it was already marked or lies outside the grid.
    pub fn insert(&mut self, cell: Coordinate) -> bool {
        match self.index(cell) {
            Some(ix) if !self.visited[ix] => {
                self.visited[ix] = true;
                true
            }
            _ => false,
        }
    }

    pub fn count(&self) -> usize {
        self.visited.iter().filter(|v| **v).count()
    }
}

/// Character rendering of a [Grid] with an optional visited overlay and path on top.
pub struct GridView<'a> {
    pub grid: &'a Grid,
    pub visited: Option<&'a VisitedOverlay>,
    pub path: &'a [Coordinate],
}

impl<'a> GridView<'a> {
    pub fn new(grid: &'a Grid) -> GridView<'a> {
        GridView {
            grid,
            visited: None,
            path: &[],
        }
    }

    pub fn with_visited(mut self, visited: &'a VisitedOverlay) -> GridView<'a> {
        self.visited = Some(visited);
        self
    }

    pub fn with_path(mut self, path: &'a [Coordinate]) -> GridView<'a> {
        self.path = path;
        self
    }
}

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.grid.rows as i32 {
            let line = (0..self.grid.cols as i32)
                .map(|col| {
                    let cell = Coordinate::new(row, col);
                    match self.grid.get(cell) {
                        Some(CellState::Start) => 'S',
                        Some(CellState::Goal) => 'G',
                        _ if self.path.contains(&cell) => 'o',
                        _ if self.visited.is_some_and(|v| v.contains(cell)) => '*',
                        Some(CellState::Blocked) => '#',
                        Some(CellState::Visited) => '*',
                        _ => '.',
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_grid() -> Grid {
        // |. # .|
        // |. # .|
        // |. . .|
        "0,1,0\n0,1,0\n0,0,0".parse().unwrap()
    }

    #[test]
    fn neighbors_respect_bounds_and_walls() {
        let grid = wall_grid();
        let corner = grid.neighbors(Coordinate::new(0, 0));
        assert_eq!(corner.as_slice(), &[Coordinate::new(1, 0)]);
        let bottom = grid.neighbors(Coordinate::new(2, 1));
        assert_eq!(
            bottom.as_slice(),
            &[Coordinate::new(2, 0), Coordinate::new(2, 2)]
        );
        assert!(grid.neighbors(Coordinate::new(-1, 0)).iter().all(|n| grid.in_bounds(*n)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![vec![CellState::Free; 3], vec![CellState::Free; 2]];
        assert!(matches!(
            Grid::from_rows(rows),
            Err(Error::RaggedRow { line: 2, found: 2, expected: 3 })
        ));
        assert!(matches!(Grid::from_rows(vec![]), Err(Error::EmptyMap)));
    }

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // |. # .|
        // |. # .|
        let grid: Grid = "0,1,0\n0,1,0".parse().unwrap();
        assert!(grid.reachable(&Coordinate::new(0, 0), &Coordinate::new(1, 0)));
        assert!(grid.unreachable(&Coordinate::new(0, 0), &Coordinate::new(0, 2)));
        assert!(grid.unreachable(&Coordinate::new(0, 0), &Coordinate::new(0, 1)));
        assert!(grid.unreachable(&Coordinate::new(0, 0), &Coordinate::new(5, 5)));
    }

    #[test]
    fn set_tracks_dirty_components() {
        let mut grid = wall_grid();
        let top_left = Coordinate::new(0, 0);
        let top_right = Coordinate::new(0, 2);
        assert!(grid.reachable(&top_left, &top_right));
        grid.set(Coordinate::new(2, 1), CellState::Blocked).unwrap();
        assert!(grid.components_dirty);
        grid.update();
        assert!(grid.unreachable(&top_left, &top_right));
        grid.set(Coordinate::new(0, 1), CellState::Free).unwrap();
        assert!(!grid.components_dirty);
        assert!(grid.reachable(&top_left, &top_right));
    }

    #[test]
    fn mark_endpoints_rejects_out_of_bounds() {
        let mut grid = wall_grid();
        let err = grid
            .mark_endpoints(Coordinate::new(0, 0), Coordinate::new(3, 0))
            .unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { label: "goal", .. }));
        grid.mark_endpoints(Coordinate::new(0, 0), Coordinate::new(0, 2))
            .unwrap();
        assert_eq!(grid.get(Coordinate::new(0, 0)), Some(CellState::Start));
        assert!(grid.is_goal(Coordinate::new(0, 2)));
    }

    #[test]
    fn mark_endpoints_on_one_cell_keeps_start() {
        let mut grid = wall_grid();
        let cell = Coordinate::new(2, 1);
        grid.mark_endpoints(cell, cell).unwrap();
        assert_eq!(grid.get(cell), Some(CellState::Start));
        assert_eq!(grid.to_string(), "['0', '1', '0']\n['0', '1', '0']\n['0', '3', '0']\n");
    }

    #[test]
    fn overlay_is_separate_from_grid() {
        let grid = wall_grid();
        let mut visited = VisitedOverlay::new(&grid);
        assert!(visited.insert(Coordinate::new(1, 0)));
        assert!(!visited.insert(Coordinate::new(1, 0)));
        assert!(!visited.insert(Coordinate::new(9, 0)));
        assert!(visited.contains(Coordinate::new(1, 0)));
        assert_eq!(visited.count(), 1);
        assert_eq!(grid.get(Coordinate::new(1, 0)), Some(CellState::Free));
    }

    #[test]
    fn view_renders_overlay_and_path() {
        let grid = wall_grid();
        let mut visited = VisitedOverlay::new(&grid);
        visited.insert(Coordinate::new(2, 2));
        let path = [Coordinate::new(0, 0), Coordinate::new(1, 0)];
        let view = GridView::new(&grid).with_visited(&visited).with_path(&path);
        assert_eq!(view.to_string(), "o#.\no#.\n..*\n");
    }

    #[test]
    fn display_dumps_symbols() {
        let grid: Grid = "0,1\n3,4".parse().unwrap();
        assert_eq!(grid.to_string(), "['0', '1']\n['3', '4']\n");
    }
}
