//! Error types for xml2csv-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in xml2csv-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Position outside a grid's dimensions
    #[error("Cell ({0}, {1}) outside {2}x{3} grid")]
    OutOfGrid(usize, usize, usize, usize),

    /// The dense grid for these dimensions cannot be allocated
    #[error("Grid of {0}x{1} cells is too large to allocate")]
    GridTooLarge(usize, usize),
}
