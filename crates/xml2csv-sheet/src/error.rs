//! Worksheet reading error types

use thiserror::Error;

/// Result type for worksheet reading
pub type SheetResult<T> = std::result::Result<T, SheetError>;

/// Errors that can occur while reading worksheet documents
#[derive(Debug, Error)]
pub enum SheetError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML error reported by the parser
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document is not well-formed
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] xml2csv_core::Error),
}
