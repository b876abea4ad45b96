//! Cell addressing
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - the bijective base-26 column codec used by A1-style addresses

mod address;

pub use address::{column_prefix, column_to_letters, letters_to_column, CellAddress};
