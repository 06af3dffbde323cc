use crate::{
    coordinate::Coordinate,
    grid::{Grid, GridView},
};

/// Renders the progressive replay of a path: frame `k` shows the grid with the first `k + 1`
/// cells of the path drawn on it. An empty path yields no frames.
pub fn replay_frames<'a>(
    grid: &'a Grid,
    path: &'a [Coordinate],
) -> impl Iterator<Item = String> + 'a {
    (1..=path.len()).map(move |k| GridView::new(grid).with_path(&path[..k]).to_string())
}
