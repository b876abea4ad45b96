//! Dense cell grid and the sparse cell set it is built from

use crate::error::{Error, Result};

/// A dense, rectangular table of cell text.
///
/// Cells live in a single row-major arena; the cell at `(row, col)` sits at
/// offset `row * cols + col`. Every in-range coordinate holds a value, empty
/// cells hold the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<String>,
}

impl Grid {
    /// Create a grid of `rows` x `cols` empty cells.
    ///
    /// A grid with zero rows or zero columns is normalized to `0 x 0`.
    /// Fails with [`Error::GridTooLarge`] when the arena cannot be allocated.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Ok(Self::default());
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(Error::GridTooLarge(rows, cols))?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| Error::GridTooLarge(rows, cols))?;
        cells.resize(len, String::new());

        Ok(Self { rows, cols, cells })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in every row
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the grid has no cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Get the text at `(row, col)`, or `None` when out of range
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.offset(row, col).map(|i| self.cells[i].as_str())
    }

    /// Replace the text at `(row, col)`
    pub fn set<S: Into<String>>(&mut self, row: usize, col: usize, value: S) -> Result<()> {
        let i = self
            .offset(row, col)
            .ok_or(Error::OutOfGrid(row, col, self.rows, self.cols))?;
        self.cells[i] = value.into();
        Ok(())
    }

    /// Get one row as a slice
    pub fn row(&self, row: usize) -> Option<&[String]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// Iterate over rows in ascending order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        (0..self.rows).filter_map(move |r| self.row(r))
    }

    /// Copy the grid into nested vectors (mostly useful in tests)
    pub fn to_vecs(&self) -> Vec<Vec<String>> {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }
}

/// The sparse set of occupied cells seen while scanning a worksheet.
///
/// Tracks the running row/column maxima so [`SparseCells::into_grid`] can
/// allocate the dense [`Grid`] once, at its final size.
#[derive(Debug, Clone, Default)]
pub struct SparseCells {
    entries: Vec<(u32, u16, String)>,
    max_row: Option<u32>,
    max_col: Option<u16>,
}

impl SparseCells {
    /// Create an empty cell set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cell value. A later insert at the same coordinate wins.
    pub fn insert<S: Into<String>>(&mut self, row: u32, col: u16, value: S) {
        self.max_row = Some(self.max_row.map_or(row, |m| m.max(row)));
        self.max_col = Some(self.max_col.map_or(col, |m| m.max(col)));
        self.entries.push((row, col, value.into()));
    }

    /// Number of recorded cells, duplicates included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no cell has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(rows, cols)` of the grid this set materializes into
    pub fn dimensions(&self) -> (usize, usize) {
        match (self.max_row, self.max_col) {
            (Some(r), Some(c)) => (r as usize + 1, c as usize + 1),
            _ => (0, 0),
        }
    }

    /// Materialize the dense grid
    pub fn into_grid(self) -> Result<Grid> {
        let (rows, cols) = self.dimensions();
        let mut grid = Grid::new(rows, cols)?;
        for (row, col, value) in self.entries {
            // In range by construction: the maxima cover every entry
            grid.cells[row as usize * cols + col as usize] = value;
        }
        Ok(grid)
    }
}
