//! Text output helpers for lit grids and recorded distances

use crate::grid::Grid;
use crate::visibility::VisibleTiles;
use std::fs::File;
use std::io::{self, Write};

/// Join the rows of a grid with newlines (no trailing newline)
pub fn grid_to_string(grid: &Grid) -> String {
    grid.to_string()
}

/// Converts recorded distances to a formatted string for debugging.
/// Unseen cells print as `.`
pub fn distances_to_string(tiles: &VisibleTiles) -> String {
    let mut result = String::new();

    for row in 0..tiles.height() {
        for col in 0..tiles.width() {
            match tiles.distance_at((col, row).into()) {
                Some(d) => result.push_str(&format!("{:3} ", d)),
                None => result.push_str("  . "),
            }
        }
        result.push('\n');
    }
    result
}

/// Save a lit grid as a plain text frame, one row per line
pub fn save_frame(grid: &Grid, filename: &str) -> io::Result<()> {
    let mut file = File::create(filename)?;
    for row in grid.rows() {
        writeln!(file, "{}", row)?;
    }
    Ok(())
}
