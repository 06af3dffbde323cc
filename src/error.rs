//! Error types for grid_route

use std::path::PathBuf;

use thiserror::Error;

use crate::coordinate::Coordinate;

/// Everything that can go wrong while loading inputs, translating a path or walking a grid.
/// A search that finds no path is not an error; it yields an empty path.
#[derive(Error, Debug)]
pub enum Error {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed map file: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown cell symbol {symbol:?} at line {line}, column {column}")]
    UnknownCell {
        symbol: String,
        line: usize,
        column: usize,
    },

    #[error("map contains no cells")]
    EmptyMap,

    #[error("line {line} has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("notes do not contain the {0} coordinate")]
    MissingCoordinate(&'static str),

    #[error("invalid coordinate {0:?}, expected \"row,col\"")]
    InvalidCoordinate(String),

    #[error("{label} {coordinate} lies outside the {rows}x{cols} map")]
    OutOfBounds {
        label: &'static str,
        coordinate: Coordinate,
        rows: usize,
        cols: usize,
    },

    #[error("could not list map directories: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("no map directories found under {}", .0.display())]
    NoMaps(PathBuf),

    #[error("no map given, pass --map or --maps-root")]
    NoMapGiven,

    #[error("step from {from} to {to} is not a single cardinal move")]
    InvalidStep { from: Coordinate, to: Coordinate },

    #[error("walk gave up after {steps} steps")]
    WalkExhausted { steps: usize },

    #[error("walk is stuck at {at}, no unvisited neighbour is free")]
    WalkStuck { at: Coordinate },
}

pub type Result<T> = std::result::Result<T, Error>;
