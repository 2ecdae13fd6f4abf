//! The grid store: a fixed-size matrix of cells holding the program text.
//!
//! The dimensions are fixed when the grid is created. Cell values change
//! during execution (store and input opcodes write to neighbors), but the
//! grid never grows or shrinks.

use crate::direction::Position;
use crate::error::GridError;
use crate::instruction::Cell;

/// Reference grid width in columns.
pub const DEFAULT_WIDTH: usize = 69;

/// Reference grid height in rows.
pub const DEFAULT_HEIGHT: usize = 42;

/// The value every cell starts with: an ASCII space (a no-op).
pub const BLANK: Cell = b' ' as Cell;

/// A `width x height` matrix of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid filled with spaces.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    /// Build a grid from text rows, padding short rows with spaces.
    ///
    /// Bytes are copied as-is; rows longer than `width` and rows past
    /// `height` are truncated. Validation is the loader's job.
    pub fn from_rows<R: AsRef<[u8]>>(width: usize, height: usize, rows: &[R]) -> Self {
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().take(height).enumerate() {
            for (x, &byte) in row.as_ref().iter().take(width).enumerate() {
                grid.cells[y * width + x] = Cell::from(byte);
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True if `(x, y)` addresses a cell of this grid.
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Read the cell at `(x, y)`.
    pub fn get(&self, x: isize, y: isize) -> Result<Cell, GridError> {
        let index = self.index(x, y)?;
        Ok(self.cells[index])
    }

    /// Write the cell at `(x, y)`.
    pub fn set(&mut self, x: isize, y: isize, value: Cell) -> Result<(), GridError> {
        let index = self.index(x, y)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Read the cell at a position known to lie inside the grid.
    ///
    /// Returns `None` only if the position is out of bounds.
    pub fn at(&self, pos: Position) -> Option<Cell> {
        if pos.x < self.width && pos.y < self.height {
            Some(self.cells[pos.y * self.width + pos.x])
        } else {
            None
        }
    }

    /// One row of cells, left to right.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y < self.height {
            Some(&self.cells[y * self.width..(y + 1) * self.width])
        } else {
            None
        }
    }

    /// Iterate over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // `chunks_exact(0)` panics, so a zero-width grid yields no rows.
        self.cells.chunks_exact(self.width.max(1)).take(self.height)
    }

    /// Blake3 fingerprint of the dimensions and every cell, as lowercase hex.
    ///
    /// Two grids with the same fingerprint hold the same program state.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.width as u64).to_le_bytes());
        hasher.update(&(self.height as u64).to_le_bytes());
        for cell in &self.cells {
            hasher.update(&cell.to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }

    fn index(&self, x: isize, y: isize) -> Result<usize, GridError> {
        if self.contains(x, y) {
            Ok(y as usize * self.width + x as usize)
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}
