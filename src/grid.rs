//! Character grids and cell positions.
//!
//! Cells are stored in a flat row-major `Vec<char>` (index = row * width + col)
//! for cache locality; the engine only ever walks rows and single cells.

use std::fmt;

use crate::error::LightingError;

/// A cell address. `col` grows to the right, `row` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    pub fn new(col: usize, row: usize) -> Self {
        Position { col, row }
    }
}

impl From<(usize, usize)> for Position {
    fn from((col, row): (usize, usize)) -> Self {
        Position { col, row }
    }
}

/// A rectangular grid of display symbols with at least one row and one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<char>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Build a grid from text rows. Every row must have the same number of
    /// characters (not bytes), and there must be at least one of each.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, LightingError> {
        let height = rows.len();
        if height == 0 {
            return Err(LightingError::InvalidGrid {
                reason: "grid has no rows".to_string(),
            });
        }

        let width = rows[0].as_ref().chars().count();
        if width == 0 {
            return Err(LightingError::InvalidGrid {
                reason: "grid has no columns".to_string(),
            });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, line) in rows.iter().enumerate() {
            let before = cells.len();
            cells.extend(line.as_ref().chars());
            let len = cells.len() - before;
            if len != width {
                return Err(LightingError::InvalidGrid {
                    reason: format!("row {row} has {len} columns, expected {width}"),
                });
            }
        }

        Ok(Grid {
            cells,
            width,
            height,
        })
    }

    /// A `width` x `height` grid with every cell set to `symbol`.
    pub fn filled(width: usize, height: usize, symbol: char) -> Result<Self, LightingError> {
        if width == 0 || height == 0 {
            return Err(LightingError::InvalidGrid {
                reason: format!("grid dimensions {width}x{height} must be non-zero"),
            });
        }
        Ok(Grid {
            cells: vec![symbol; width * height],
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, pos: Position) -> Option<char> {
        if pos.col < self.width && pos.row < self.height {
            Some(self.cells[pos.row * self.width + pos.col])
        } else {
            None
        }
    }

    /// Overwrite one cell. Returns `false` (and changes nothing) when `pos`
    /// is outside the grid.
    pub fn set(&mut self, pos: Position, symbol: char) -> bool {
        if pos.col < self.width && pos.row < self.height {
            self.cells[pos.row * self.width + pos.col] = symbol;
            true
        } else {
            false
        }
    }

    /// Map signed coordinates to a position, or `None` if they fall outside.
    pub fn checked_position(&self, col: i64, row: i64) -> Option<Position> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then_some(Position { col, row })
    }

    /// Like [`Grid::checked_position`] but reports the miss as `OutOfBounds`.
    pub fn position(&self, col: i64, row: i64) -> Result<Position, LightingError> {
        self.checked_position(col, row)
            .ok_or(LightingError::OutOfBounds {
                col,
                row,
                width: self.width,
                height: self.height,
            })
    }

    pub fn row(&self, row: usize) -> Option<&[char]> {
        (row < self.height).then(|| &self.cells[row * self.width..(row + 1) * self.width])
    }

    /// The grid as owned text rows, ready for a display collaborator.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().collect())
            .collect()
    }

    /// Every position with its symbol, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (Position::new(i % width, i / width), c))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.width).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for c in row {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_dimensions() {
        let grid = Grid::from_rows(&["#####", "#.@.#", "#####"]).unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 3));
        assert_eq!(grid.get(Position::new(2, 1)), Some('@'));
        assert_eq!(grid.get(Position::new(5, 1)), None);
        assert_eq!(grid.row(1), Some(&['#', '.', '@', '.', '#'][..]));
    }

    #[test]
    fn test_ragged_and_empty_grids_rejected() {
        let ragged = Grid::from_rows(&["###", "##"]);
        assert!(matches!(ragged, Err(LightingError::InvalidGrid { .. })));

        let no_rows: [&str; 0] = [];
        assert!(matches!(
            Grid::from_rows(&no_rows),
            Err(LightingError::InvalidGrid { .. })
        ));
        assert!(matches!(
            Grid::from_rows(&["", ""]),
            Err(LightingError::InvalidGrid { .. })
        ));
        assert!(Grid::filled(0, 3, '#').is_err());
    }

    #[test]
    fn test_width_counts_chars_not_bytes() {
        let grid = Grid::from_rows(&["░▒▓", "abc"]).unwrap();
        assert_eq!(grid.width(), 3);
    }

    #[test]
    fn test_position_bounds() {
        let grid = Grid::filled(4, 3, ' ').unwrap();
        assert_eq!(grid.checked_position(3, 2), Some(Position::new(3, 2)));
        assert_eq!(grid.checked_position(-1, 0), None);
        assert_eq!(grid.checked_position(4, 0), None);
        assert_eq!(
            grid.position(0, 3),
            Err(LightingError::OutOfBounds {
                col: 0,
                row: 3,
                width: 4,
                height: 3
            })
        );
    }

    #[test]
    fn test_set_and_display() {
        let mut grid = Grid::filled(3, 2, '?').unwrap();
        assert!(grid.set(Position::new(1, 1), '@'));
        assert!(!grid.set(Position::new(3, 0), '@'));
        assert_eq!(grid.to_string(), "???\n?@?");
        assert_eq!(grid.rows(), vec!["???".to_string(), "?@?".to_string()]);
    }
}
