//! # xml2csv
//!
//! Convert a single SpreadsheetML worksheet XML document (as found at
//! `xl/worksheets/sheetN.xml` inside an unpacked `.xlsx`) to CSV.
//!
//! ## Features
//!
//! - Shared-string cells resolved against an optional `sharedStrings.xml`
//! - Inline rich-text cells
//! - Hyperlink display text replacing the cell value
//! - Sparse cells filled into a dense, rectangular table
//!
//! ## Example
//!
//! ```rust,no_run
//! use xml2csv::prelude::*;
//! use std::path::Path;
//!
//! let converter = Converter::new(ConvertOptions::default());
//! let report = converter
//!     .convert_to_file(
//!         Path::new("sheet1.xml"),
//!         Some(Path::new("sharedStrings.xml")),
//!         Path::new("sheet1.csv"),
//!     )
//!     .unwrap();
//! println!("{} rows x {} columns", report.rows, report.columns);
//! ```

pub mod prelude;

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

// Re-export core types
pub use xml2csv_core::{
    column_to_letters, letters_to_column, CellAddress, Error, Grid, Result, SparseCells,
};

// Re-export I/O types
pub use xml2csv_csv::{CsvError, CsvWriteOptions, CsvWriter, LineTerminator};
pub use xml2csv_sheet::{
    HyperlinkIndex, NamespaceTable, ReadOptions, SharedStrings, SheetError, Worksheet,
    WorksheetReader,
};

/// Errors that abort a conversion
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The worksheet document does not exist
    #[error("Worksheet file '{}' not found", .0.display())]
    MissingInput(PathBuf),

    /// The worksheet could not be read or is not well-formed
    #[error("Failed to read worksheet: {0}")]
    Sheet(#[from] SheetError),

    /// The table could not be written
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] CsvError),
}

/// Options for a conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// How the XML documents are read
    pub read: ReadOptions,
    /// How the table is written
    pub write: CsvWriteOptions,
}

/// Summary of a finished conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionReport {
    /// Number of rows written
    pub rows: usize,
    /// Length of the first row (0 when there are no rows)
    pub columns: usize,
    /// Number of cells read from the worksheet
    pub cells: usize,
    /// Size of the shared strings table used
    pub shared_strings: usize,
    /// Number of hyperlink overrides found
    pub hyperlinks: usize,
}

impl ConversionReport {
    fn new(sheet: &Worksheet) -> Self {
        Self {
            rows: sheet.grid.rows(),
            columns: sheet.grid.row(0).map_or(0, |r| r.len()),
            cells: sheet.cells,
            shared_strings: sheet.shared_strings,
            hyperlinks: sheet.hyperlinks,
        }
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows \u{d7} {} columns", self.rows, self.columns)
    }
}

/// Worksheet-to-CSV converter
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with the given options
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Read a worksheet (and optional shared strings) into memory.
    ///
    /// A missing worksheet fails before anything is parsed. Missing or
    /// unusable shared strings only produce a warning.
    pub fn load(
        &self,
        worksheet: &Path,
        shared_strings: Option<&Path>,
    ) -> std::result::Result<Worksheet, ConvertError> {
        if !worksheet.exists() {
            return Err(ConvertError::MissingInput(worksheet.to_path_buf()));
        }

        let shared_strings = shared_strings.filter(|path| {
            let exists = path.exists();
            if !exists {
                log::warn!("Shared strings file '{}' not found", path.display());
            }
            exists
        });

        log::info!("Parsing worksheet: {}", worksheet.display());
        if let Some(path) = shared_strings {
            log::info!("Using shared strings: {}", path.display());
        }

        let sheet = WorksheetReader::read_file(worksheet, shared_strings, &self.options.read)?;
        log::debug!(
            "{} cells, {} shared strings, {} hyperlinks",
            sheet.cells,
            sheet.shared_strings,
            sheet.hyperlinks
        );
        Ok(sheet)
    }

    /// Convert a worksheet to a CSV file.
    ///
    /// Nothing is written unless the worksheet was read successfully.
    pub fn convert_to_file(
        &self,
        worksheet: &Path,
        shared_strings: Option<&Path>,
        output: &Path,
    ) -> std::result::Result<ConversionReport, ConvertError> {
        let sheet = self.load(worksheet, shared_strings)?;
        CsvWriter::write_file(&sheet.grid, output, &self.options.write)?;
        log::info!("CSV saved to: {}", output.display());
        Ok(ConversionReport::new(&sheet))
    }

    /// Convert a worksheet, writing the CSV to `writer`
    pub fn convert_to_writer<W: Write>(
        &self,
        worksheet: &Path,
        shared_strings: Option<&Path>,
        writer: W,
    ) -> std::result::Result<ConversionReport, ConvertError> {
        let sheet = self.load(worksheet, shared_strings)?;
        CsvWriter::write(&sheet.grid, writer, &self.options.write)?;
        Ok(ConversionReport::new(&sheet))
    }
}

/// Convert a worksheet to a CSV file with default options
pub fn convert(
    worksheet: &Path,
    shared_strings: Option<&Path>,
    output: &Path,
) -> std::result::Result<ConversionReport, ConvertError> {
    Converter::default().convert_to_file(worksheet, shared_strings, output)
}
