//! # xml2csv-sheet
//!
//! Reader for a single SpreadsheetML worksheet document and its optional
//! shared-strings document.
//!
//! The pieces run in this order:
//! 1. [`SharedStrings::load`] and [`HyperlinkIndex::build`] (independent)
//! 2. [`WorksheetReader::read`], which resolves each cell through
//!    [`resolve`] and materializes a dense [`Grid`](xml2csv_core::Grid)

pub mod error;
pub mod escape;
pub mod hyperlinks;
pub mod namespace;
pub mod options;
pub mod reader;
pub mod resolver;
pub mod shared_strings;

mod scan;

pub use error::{SheetError, SheetResult};
pub use escape::decode_excel_escapes;
pub use hyperlinks::HyperlinkIndex;
pub use namespace::NamespaceTable;
pub use options::ReadOptions;
pub use reader::{Worksheet, WorksheetReader};
pub use resolver::{resolve, CellKind, LiteralKind, RawCell};
pub use shared_strings::SharedStrings;
