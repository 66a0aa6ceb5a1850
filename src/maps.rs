//! Built-in sample maps for the demo and benchmark drivers.
//!
//! `#` is wall, space is open floor and `@` marks the observer.

use crate::error::LightingError;
use crate::grid::{Grid, Position};

/// A small walled dungeon with rooms, pillars and a doorway.
pub const DUNGEON: &[&str] = &[
    "########################################",
    "#          #              #            #",
    "#          #              #     ##     #",
    "#    ##           @             ##     #",
    "#    ##    #              #            #",
    "#          ####### ########            #",
    "#######  ###                    ########",
    "#                      #               #",
    "#        ####          #      ###      #",
    "#        #  #                 # #      #",
    "#        ####          #      ###      #",
    "########################################",
];

pub fn dungeon() -> Result<Grid, LightingError> {
    Grid::from_rows(DUNGEON)
}

/// First cell holding `marker`, scanning row by row.
pub fn find_marker(grid: &Grid, marker: char) -> Option<Position> {
    grid.cells().find(|&(_, c)| c == marker).map(|(pos, _)| pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dungeon_is_rectangular() {
        let grid = dungeon().unwrap();
        assert_eq!((grid.width(), grid.height()), (40, 12));
    }

    #[test]
    fn test_find_marker() {
        let grid = dungeon().unwrap();
        assert_eq!(find_marker(&grid, '@'), Some(Position::new(18, 3)));
        assert_eq!(find_marker(&grid, 'x'), None);
    }
}
