use core::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A cell position on a [Grid](crate::grid::Grid), addressed as (row, column) with the origin
/// in the top-left corner. Signed so that stepping off the top or left edge yields a
/// coordinate that bounds checks can reject.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

/// The four cardinal moves. Rows grow downwards, columns grow to the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbour order used by every search in this crate.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, column) delta of a single move in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl Coordinate {
    pub const fn new(row: i32, col: i32) -> Coordinate {
        Coordinate { row, col }
    }

    /// The neighbouring coordinate in `direction`. Saturates at the `i32` limits, which lie far
    /// outside any grid.
    pub fn step(&self, direction: Direction) -> Coordinate {
        let (dr, dc) = direction.delta();
        Coordinate::new(self.row.saturating_add(dr), self.col.saturating_add(dc))
    }

    /// Saturates at [u32::MAX] for coordinates more than that far apart.
    pub fn manhattan_distance(&self, other: &Coordinate) -> u32 {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col))
    }

    /// The direction leading from `self` to `other`, if they are exactly one cardinal step apart.
    pub fn direction_to(&self, other: &Coordinate) -> Option<Direction> {
        let dr = other.row.checked_sub(self.row)?;
        let dc = other.col.checked_sub(self.col)?;
        match (dr, dc) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, col): (i32, i32)) -> Self {
        Coordinate::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Parses `"row,col"`, surrounding whitespace allowed.
impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidCoordinate(s.to_owned());
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse::<i32>().map_err(|_| invalid())?;
        let col = col.trim().parse::<i32>().map_err(|_| invalid())?;
        Ok(Coordinate::new(row, col))
    }
}
