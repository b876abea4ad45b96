//! CSV writer

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvWriteOptions;
use xml2csv_core::Grid;

/// CSV writer for grids
pub struct CsvWriter;

impl CsvWriter {
    /// Write a grid to a CSV file.
    ///
    /// The whole table is serialized before the file is created, so a
    /// failure never leaves a truncated file behind.
    pub fn write_file<P: AsRef<Path>>(
        grid: &Grid,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let bytes = Self::to_bytes(grid, options)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize a grid into memory
    pub fn to_bytes(grid: &Grid, options: &CsvWriteOptions) -> CsvResult<Vec<u8>> {
        let mut buf = Vec::new();
        Self::write(grid, &mut buf, options)?;
        Ok(buf)
    }

    /// Write a grid to a writer, one record per row
    pub fn write<W: Write>(grid: &Grid, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(options.line_terminator.to_csv())
            .from_writer(writer);

        for row in grid.iter_rows() {
            csv_writer.write_record(row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
