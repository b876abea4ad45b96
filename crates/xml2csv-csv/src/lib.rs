//! # xml2csv-csv
//!
//! Writes a dense [`Grid`](xml2csv_core::Grid) as delimited text.

mod error;
mod options;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvWriteOptions, LineTerminator};
pub use writer::CsvWriter;
