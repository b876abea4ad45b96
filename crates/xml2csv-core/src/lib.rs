//! # xml2csv-core
//!
//! Core data structures shared by the xml2csv crates:
//! - [`CellAddress`] and the column letter codec ([`column_to_letters`],
//!   [`letters_to_column`])
//! - [`Grid`] - a dense, rectangular table of resolved cell text
//! - [`SparseCells`] - the sparse cell set a [`Grid`] is materialized from
//!
//! ## Example
//!
//! ```rust
//! use xml2csv_core::{CellAddress, SparseCells};
//!
//! let mut cells = SparseCells::new();
//! let b2 = CellAddress::parse("B2").unwrap();
//! cells.insert(b2.row, b2.col, "hello");
//!
//! let grid = cells.into_grid().unwrap();
//! assert_eq!(grid.rows(), 2);
//! assert_eq!(grid.cols(), 2);
//! assert_eq!(grid.get(1, 1), Some("hello"));
//! assert_eq!(grid.get(0, 0), Some(""));
//! ```

pub mod cell;
pub mod error;
pub mod grid;

pub use cell::{column_prefix, column_to_letters, letters_to_column, CellAddress};
pub use error::{Error, Result};
pub use grid::{Grid, SparseCells};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
