//! Loading of map files, their notes and directories of maps.
//!
//! A map directory `<root>/<name>/` holds the grid as `<name>.csv`, one row per line with
//! comma-separated cell symbols, and a `README.md` whose text names the endpoints as
//! `Origin: Line L, Column C` and `Destiny: Line L, Column C` (0-based).
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use walkdir::WalkDir;

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::grid::{CellState, Grid};

pub const NOTES_FILE_NAME: &str = "README.md";

/// Reads a grid from comma-separated rows of cell symbols.
pub fn read_grid<R: Read>(reader: R) -> Result<Grid> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = record
            .iter()
            .enumerate()
            .map(|(j, symbol)| {
                CellState::from_symbol(symbol).ok_or_else(|| Error::UnknownCell {
                    symbol: symbol.to_owned(),
                    line: i + 1,
                    column: j + 1,
                })
            })
            .collect::<Result<Vec<CellState>>>()?;
        rows.push(row);
    }
    Grid::from_rows(rows)
}

/// Loads a grid from a map file.
pub fn load_grid<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    let grid = read_grid(file)?;
    info!(
        "Loaded {}x{} map from {}",
        grid.rows(),
        grid.cols(),
        path.display()
    );
    Ok(grid)
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        read_grid(s.as_bytes())
    }
}

fn endpoint_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(Origin|Destiny): Line (\d+), Column (\d+)").expect("valid endpoint pattern")
    })
}

/// Extracts the start (`Origin`) and goal (`Destiny`) coordinates from notes text. The first
/// mention of each label counts.
pub fn parse_endpoints(text: &str) -> Result<(Coordinate, Coordinate)> {
    let mut start = None;
    let mut goal = None;
    for captures in endpoint_pattern().captures_iter(text) {
        let slot = match &captures[1] {
            "Origin" => &mut start,
            _ => &mut goal,
        };
        if slot.is_some() {
            continue;
        }
        let number = |i: usize| {
            captures[i]
                .parse::<i32>()
                .map_err(|_| Error::InvalidCoordinate(captures[0].to_owned()))
        };
        *slot = Some(Coordinate::new(number(2)?, number(3)?));
    }
    let start = start.ok_or(Error::MissingCoordinate("Origin"))?;
    let goal = goal.ok_or(Error::MissingCoordinate("Destiny"))?;
    debug!("Notes name start {} and goal {}", start, goal);
    Ok((start, goal))
}

/// Reads the start and goal coordinates from a notes file.
pub fn load_endpoints<P: AsRef<Path>>(path: P) -> Result<(Coordinate, Coordinate)> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_endpoints(&text)
}

/// One map directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapEntry {
    pub name: String,
    pub grid_path: PathBuf,
    pub notes_path: PathBuf,
}

impl MapEntry {
    /// Loads the grid and its endpoints.
    pub fn load(&self) -> Result<(Grid, Coordinate, Coordinate)> {
        let (start, goal) = load_endpoints(&self.notes_path)?;
        let grid = load_grid(&self.grid_path)?;
        Ok((grid, start, goal))
    }
}

/// The map directories found directly below a root directory, sorted by name.
#[derive(Clone, Debug)]
pub struct MapSet {
    pub root: PathBuf,
    entries: Vec<MapEntry>,
}

impl MapSet {
    /// Collects every subdirectory of `root` that contains both a `<name>.csv` map and notes.
    pub fn discover<P: AsRef<Path>>(root: P) -> Result<MapSet> {
        let root = root.as_ref().to_owned();
        let mut entries = Vec::new();
        for entry in WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let grid_path = entry.path().join(format!("{name}.csv"));
            let notes_path = entry.path().join(NOTES_FILE_NAME);
            if grid_path.is_file() && notes_path.is_file() {
                entries.push(MapEntry {
                    name,
                    grid_path,
                    notes_path,
                });
            } else {
                debug!("Skipping {}, no map or notes", entry.path().display());
            }
        }
        if entries.is_empty() {
            return Err(Error::NoMaps(root));
        }
        info!("Found {} maps under {}", entries.len(), root.display());
        Ok(MapSet { root, entries })
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&MapEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Picks one of the maps at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&MapEntry> {
        self.entries.choose(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_trimmed_rows() {
        let grid = read_grid("0, 1 ,0\n3,0,4\n".as_bytes()).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(Coordinate::new(0, 1)), Some(CellState::Blocked));
        assert_eq!(grid.get(Coordinate::new(1, 0)), Some(CellState::Start));
        assert!(grid.is_goal(Coordinate::new(1, 2)));
    }

    #[test]
    fn rejects_bad_maps() {
        assert!(matches!(
            "0,1\n0,x".parse::<Grid>(),
            Err(Error::UnknownCell { line: 2, column: 2, .. })
        ));
        assert!(matches!(
            "0,1,0\n0,1".parse::<Grid>(),
            Err(Error::RaggedRow { line: 2, found: 2, expected: 3 })
        ));
        assert!(matches!("".parse::<Grid>(), Err(Error::EmptyMap)));
    }

    #[test]
    fn parses_endpoints_from_notes() {
        let notes = "# Map 3\n\nOrigin: Line 2, Column 2\nDestiny: Line 7, Column 12\n";
        let (start, goal) = parse_endpoints(notes).unwrap();
        assert_eq!(start, Coordinate::new(2, 2));
        assert_eq!(goal, Coordinate::new(7, 12));
    }

    #[test]
    fn first_mention_of_each_endpoint_counts() {
        let notes = "Destiny: Line 1, Column 4\nOrigin: Line 0, Column 3\nOrigin: Line 9, Column 9";
        let (start, goal) = parse_endpoints(notes).unwrap();
        assert_eq!(start, Coordinate::new(0, 3));
        assert_eq!(goal, Coordinate::new(1, 4));
    }

    #[test]
    fn oversized_number_is_invalid() {
        let notes = "Origin: Line 99999999999, Column 0\nDestiny: Line 1, Column 1";
        assert!(matches!(parse_endpoints(notes), Err(Error::InvalidCoordinate(_))));
    }

    #[test]
    fn missing_endpoint_is_an_error() {
        let err = parse_endpoints("Origin: Line 2, Column 2").unwrap_err();
        assert!(matches!(err, Error::MissingCoordinate("Destiny")));
        let err = parse_endpoints("Destiny: Line 2, Column 2").unwrap_err();
        assert!(matches!(err, Error::MissingCoordinate("Origin")));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_grid("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, Error::Io { ref path, .. } if path.ends_with("exist.csv")));
    }
}
