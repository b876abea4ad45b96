//! Prelude module - common imports for xml2csv users
//!
//! ```rust
//! use xml2csv::prelude::*;
//! ```

pub use crate::{
    // Conversion
    convert,
    CellAddress,
    ConversionReport,
    ConvertError,
    ConvertOptions,
    Converter,

    // I/O types
    CsvWriteOptions,
    CsvWriter,
    Grid,
    HyperlinkIndex,
    LineTerminator,
    NamespaceTable,
    ReadOptions,
    SharedStrings,
    WorksheetReader,
};
