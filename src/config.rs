use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::coordinate::Coordinate;

/// Endpoints used when neither notes nor explicit coordinates are given.
pub const DEFAULT_START: Coordinate = Coordinate::new(2, 2);
pub const DEFAULT_GOAL: Coordinate = Coordinate::new(7, 2);

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    Astar,
    Dfs,
    Walk,
    All,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Map file with comma-separated cell symbols
    #[arg(long, conflicts_with = "maps_root")]
    pub map: Option<PathBuf>,

    /// Notes file naming the Origin and Destiny coordinates
    #[arg(long, requires = "map")]
    pub notes: Option<PathBuf>,

    /// Directory of map directories, one of which is picked at random
    #[arg(long)]
    pub maps_root: Option<PathBuf>,

    /// Start as "row,col", overrides the notes
    #[arg(long)]
    pub start: Option<Coordinate>,

    /// Goal as "row,col", overrides the notes
    #[arg(long)]
    pub goal: Option<Coordinate>,

    #[arg(long, value_enum, default_value_t = Algorithm::All)]
    pub algorithm: Algorithm,

    /// Delay between replay frames
    #[arg(long, default_value_t = 100)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    /// Step budget of the direction-priority walk
    #[arg(long, default_value_t = 1024)]
    pub walk_steps: usize,
}

impl Config {
    pub fn runs(&self, algorithm: Algorithm) -> bool {
        self.algorithm == Algorithm::All || self.algorithm == algorithm
    }
}
