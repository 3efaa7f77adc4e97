//! Fixed-size toroidal board of alive/dead cells.

use std::fmt;
use std::str::FromStr;

use crate::error::{LifeError, Result};

/// Character used for a live cell in the text format.
pub const ALIVE_CHAR: char = '*';
/// Character used for a dead cell in the text format.
pub const DEAD_CHAR: char = ' ';

/// Largest width or height; coordinates are wrapped as `i64`.
const MAX_AXIS: usize = i64::MAX as usize;

/// A `width` x `height` board stored row-major.
///
/// Every coordinate is wrapped toroidally before lookup, so `-1` addresses the
/// last column or row and `width` addresses the first column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Creates a board with every cell dead.
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::InvalidDimensions`] if either dimension is zero,
    /// if either exceeds the signed coordinate range, or if the cell count
    /// does not fit in a single allocation.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let invalid = LifeError::InvalidDimensions { width, height };
        if width == 0 || height == 0 || width > MAX_AXIS || height > MAX_AXIS {
            return Err(invalid);
        }
        let cells = width
            .checked_mul(height)
            .filter(|&count| count <= isize::MAX as usize)
            .ok_or(invalid)?;
        Ok(Self {
            cells: vec![false; cells],
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

    fn index(&self, x: i64, y: i64) -> usize {
        let nx = x.rem_euclid(self.width as i64) as usize;
        let ny = y.rem_euclid(self.height as i64) as usize;
        ny * self.width + nx
    }

    /// Sets the cell at `(x, y)`, wrapping both coordinates.
    pub fn set(&mut self, x: i64, y: i64, alive: bool) {
        let idx = self.index(x, y);
        self.cells[idx] = alive;
    }

    /// Reports whether the cell at `(x, y)` is alive, wrapping both coordinates.
    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    pub fn is_extinct(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Iterates the rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut line = String::with_capacity(self.width + 1);
        for row in self.rows() {
            line.clear();
            line.extend(row.iter().map(|&cell| if cell { ALIVE_CHAR } else { DEAD_CHAR }));
            line.push('\n');
            f.write_str(&line)?;
        }
        Ok(())
    }
}

/// Parses the render format: one line per row, `*` for alive, anything else dead.
///
/// Short rows are padded with dead cells up to the widest row.
impl FromStr for Grid {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s.lines().collect();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut grid = Grid::new(width, lines.len())?;
        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if ch == ALIVE_CHAR {
                    grid.set(x as i64, y as i64, true);
                }
            }
        }
        Ok(grid)
    }
}
