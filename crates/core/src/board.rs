//! Board module - manages the game grid
//!
//! The board is a `height x width` grid of boolean cells: `true` means the cell
//! holds a settled block or a block of the piece currently in play.
//! Uses a flat row-major vector so rows can be shifted with `copy_within`.
//! Coordinates: (x, y) where x ranges 0..width (left to right), y ranges 0..height (top to bottom)

use thiserror::Error;

/// Reasons a grid cannot be turned into a [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must have at least one row and one column")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// The game board using flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<bool>,
}

impl Board {
    /// Create a new empty board
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero. Use [`Board::from_rows`] for
    /// dimensions that come from outside the program.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board must be at least 1x1");
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Build a board from explicit rows (row 0 is the top).
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, BoardError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(BoardError::Empty);
        }

        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(BoardError::Ragged {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Get width of the board
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<bool> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, filled: bool) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = filled;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).unwrap_or(false)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|&filled| filled)
    }

    /// Indices of every full row, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove row `y`, shift every row above it down by one and insert an
    /// empty row at the top. Rows below `y` keep their positions.
    ///
    /// Returns false if `y` is out of bounds.
    pub fn clear_row(&mut self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }

        let width = self.width;
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(false);
        true
    }

    /// Borrow one row of cells
    ///
    /// # Panics
    ///
    /// Panics if `y` is out of bounds.
    pub fn row(&self, y: usize) -> &[bool] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Copy the grid out as rows (row 0 is the top)
    pub fn rows(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks_exact(self.width)
            .map(<[bool]>::to_vec)
            .collect()
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&filled| filled).count()
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}
